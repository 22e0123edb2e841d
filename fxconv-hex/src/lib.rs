//! # Fxconv Hex
//!
//! Application service layer and inbound adapters for the currency converter.
//!
//! ## Architecture
//!
//! - `service/` - Conversion service (rate cache, fallback, conversion math)
//! - `history/` - Bounded log of recent conversions
//! - `inbound/` - HTTP adapter (Axum server) and interactive console
//!
//! The service is generic over `F: RateFetcher` and `C: Clock`, allowing
//! different upstream APIs and time sources to be injected.

pub mod history;
pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use history::{HISTORY_CAPACITY, HistoryService};
pub use service::{ConversionService, DEFAULT_TTL};
