//! Supported currencies and the rate source abstraction

use crate::core::rates::RateTable;
use anyhow::Result;
use async_trait::async_trait;

/// A currency the converter can offer in its selection lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub flag: &'static str,
}

pub static CURRENCIES: [Currency; 8] = [
    Currency {
        code: "USD",
        name: "United States Dollar",
        symbol: "$",
        flag: "🇺🇸",
    },
    Currency {
        code: "EUR",
        name: "Euro",
        symbol: "€",
        flag: "🇪🇺",
    },
    Currency {
        code: "GBP",
        name: "British Pound",
        symbol: "£",
        flag: "🇬🇧",
    },
    Currency {
        code: "NGN",
        name: "Nigerian Naira",
        symbol: "₦",
        flag: "🇳🇬",
    },
    Currency {
        code: "GHS",
        name: "Ghanaian Cedi",
        symbol: "₵",
        flag: "🇬🇭",
    },
    Currency {
        code: "CAD",
        name: "Canadian Dollar",
        symbol: "C$",
        flag: "🇨🇦",
    },
    Currency {
        code: "JPY",
        name: "Japanese Yen",
        symbol: "¥",
        flag: "🇯🇵",
    },
    Currency {
        code: "AUD",
        name: "Australian Dollar",
        symbol: "A$",
        flag: "🇦🇺",
    },
];

impl Currency {
    /// Finds a supported currency by its code, ignoring case.
    pub fn find(code: &str) -> Option<&'static Currency> {
        CURRENCIES
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code.trim()))
    }

    /// Display lookup: unknown codes fall back to the first listed currency.
    pub fn info(code: &str) -> &'static Currency {
        Self::find(code).unwrap_or(&CURRENCIES[0])
    }

    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }
}

/// Source of reference-relative exchange rates.
#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    /// Returns every rate the source knows, expressed as units of each
    /// currency per one unit of `reference`.
    async fn fetch_rates(&self, reference: &str) -> Result<RateTable>;
}
