//! Display snapshot of the converter

use crate::core::currency::Currency;
use chrono::{DateTime, Local};

/// Fee charged on every conversion. The converter never charges one.
pub const CONVERSION_FEE: f64 = 0.0;

/// Everything a front end needs to draw the converter at one instant.
#[derive(Debug, Clone)]
pub struct ConversionView {
    pub amount_text: String,
    pub source: &'static Currency,
    pub target: &'static Currency,
    pub fee: f64,
    pub amount_to_convert: f64,
    pub rate: f64,
    pub converted: f64,
    pub can_continue: bool,
    pub can_refresh: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Local>>,
}

impl ConversionView {
    pub fn fee_display(&self) -> String {
        format!("-{}{:.2}", self.source.symbol, self.fee)
    }

    pub fn amount_to_convert_display(&self) -> String {
        format!("={}{:.2}", self.source.symbol, self.amount_to_convert)
    }

    pub fn rate_display(&self) -> String {
        format!("@{:.4}", self.rate)
    }

    pub fn converted_display(&self) -> String {
        format!("{}{:.2}", self.target.symbol, self.converted)
    }

    pub fn last_updated_display(&self) -> Option<String> {
        self.last_updated
            .map(|t| format!("Rates last updated: {}", t.format("%H:%M:%S")))
    }
}
