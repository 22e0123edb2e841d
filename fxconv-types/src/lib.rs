//! # Fxconv Types
//!
//! Domain types, conversion math and port traits for the currency converter.
//! This crate has ZERO IO dependencies - only data structures, business
//! rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (CurrencyPair, CachedRate, ConversionResult)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Fetch, conversion and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use currencies::CurrencyCode;
pub use domain::{CachedRate, ConversionResult, CurrencyPair, HistoryEntry, calculator};
pub use dto::*;
pub use error::{AppError, ConversionError, ErrorKind, FetchError};
pub use ports::{Clock, RateFetcher, SystemClock};
