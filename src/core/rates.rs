//! Reference-relative rate table

use anyhow::{Result, bail};
use std::collections::HashMap;

/// Units of each currency per one unit of the reference currency.
///
/// A table is only ever built whole; refreshes replace it rather than
/// updating individual entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    reference: Option<String>,
    rates: HashMap<String, f64>,
}

impl RateTable {
    /// Builds a table, checking that all rates are finite and positive and
    /// that the reference currency maps to exactly 1.
    pub fn new(reference: &str, rates: HashMap<String, f64>) -> Result<Self> {
        for (code, rate) in &rates {
            if !rate.is_finite() || *rate <= 0.0 {
                bail!("Invalid rate {rate} for currency {code}");
            }
        }
        match rates.get(reference) {
            Some(rate) if *rate == 1.0 => {}
            Some(rate) => bail!("Reference currency {reference} has rate {rate}, expected 1"),
            None => bail!("Reference currency {reference} missing from rate table"),
        }
        Ok(Self {
            reference: Some(reference.to_string()),
            rates,
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates(entries: &[(&str, f64)]) -> HashMap<String, f64> {
        entries.iter().map(|(c, r)| (c.to_string(), *r)).collect()
    }

    #[test]
    fn test_valid_table() {
        let table = RateTable::new("USD", rates(&[("USD", 1.0), ("NGN", 1630.5)])).unwrap();
        assert_eq!(table.get("NGN"), Some(1630.5));
        assert_eq!(table.reference(), Some("USD"));
        assert_eq!(table.len(), 2);
        assert!(table.get("EUR").is_none());
    }

    #[test]
    fn test_rejects_bad_reference() {
        let err = RateTable::new("USD", rates(&[("USD", 2.0)])).unwrap_err();
        assert!(err.to_string().contains("expected 1"));

        let err = RateTable::new("USD", rates(&[("EUR", 0.92)])).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_rejects_non_positive_rates() {
        assert!(RateTable::new("USD", rates(&[("USD", 1.0), ("EUR", 0.0)])).is_err());
        assert!(RateTable::new("USD", rates(&[("USD", 1.0), ("EUR", -1.0)])).is_err());
        assert!(RateTable::new("USD", rates(&[("USD", 1.0), ("EUR", f64::NAN)])).is_err());
    }

    #[test]
    fn test_empty_table() {
        let table = RateTable::empty();
        assert!(table.is_empty());
        assert!(table.reference().is_none());
    }
}
