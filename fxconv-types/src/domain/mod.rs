//! Domain models for the currency converter.

pub mod calculator;
pub mod conversion;
pub mod pair;

pub use conversion::{ConversionResult, HistoryEntry};
pub use pair::{CachedRate, CurrencyPair};
