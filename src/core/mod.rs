//! Core conversion logic and state

pub mod config;
pub mod convert;
pub mod converter;
pub mod currency;
pub mod log;
pub mod rates;
pub mod refresh;
pub mod sanitize;
pub mod view;

// Re-export main types for cleaner imports
pub use converter::Converter;
pub use currency::{CURRENCIES, Currency, CurrencyRateProvider};
pub use rates::RateTable;
pub use refresh::{RateState, RefreshOutcome};
pub use view::ConversionView;
