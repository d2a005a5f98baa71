//! Converter state driven by input events

use crate::core::convert::{conversion_rate, convert, parse_amount};
use crate::core::currency::{Currency, CurrencyRateProvider};
use crate::core::rates::RateTable;
use crate::core::refresh::{RateState, RefreshOutcome};
use crate::core::sanitize::sanitize;
use crate::core::view::{CONVERSION_FEE, ConversionView};
use anyhow::{Result, anyhow};
use std::time::Duration;
use tracing::debug;

/// Owns the amount, the currency pair and the rate state. Derived values
/// are recomputed from these on every `view()`.
#[derive(Debug, Clone)]
pub struct Converter {
    amount: String,
    source: &'static str,
    target: &'static str,
    state: RateState,
}

impl Default for Converter {
    fn default() -> Self {
        Self {
            amount: String::new(),
            source: "USD",
            target: "EUR",
            state: RateState::new(),
        }
    }
}

impl Converter {
    pub fn new(source: &str, target: &str) -> Result<Self> {
        let mut converter = Self::default();
        converter.select_source(source)?;
        converter.select_target(target)?;
        Ok(converter)
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn source(&self) -> &'static str {
        self.source
    }

    pub fn target(&self) -> &'static str {
        self.target
    }

    pub fn state(&self) -> &RateState {
        &self.state
    }

    /// Applies an amount edit. Returns whether the edit was accepted.
    pub fn edit_amount(&mut self, candidate: &str) -> bool {
        let accepted = sanitize(candidate, &self.amount);
        let changed = accepted == candidate;
        if !changed {
            debug!(candidate, "Rejected amount edit");
        }
        self.amount = accepted;
        changed
    }

    pub fn select_source(&mut self, code: &str) -> Result<()> {
        self.source = lookup(code)?;
        Ok(())
    }

    pub fn select_target(&mut self, code: &str) -> Result<()> {
        self.target = lookup(code)?;
        Ok(())
    }

    pub fn begin_refresh(&mut self) -> bool {
        self.state.begin_refresh()
    }

    pub fn finish_refresh(&mut self, result: Result<RateTable>) -> RefreshOutcome {
        self.state.finish_refresh(result)
    }

    pub async fn refresh(
        &mut self,
        provider: &dyn CurrencyRateProvider,
        reference: &str,
        timeout: Duration,
    ) -> RefreshOutcome {
        self.state.refresh(provider, reference, timeout).await
    }

    pub fn converted(&self) -> f64 {
        convert(&self.amount, self.source, self.target, self.state.rates())
    }

    pub fn rate(&self) -> f64 {
        conversion_rate(self.source, self.target, self.state.rates())
    }

    /// Continue needs a positive amount and no refresh in flight.
    pub fn can_continue(&self) -> bool {
        !self.amount.is_empty() && parse_amount(&self.amount) > 0.0 && !self.state.is_loading()
    }

    pub fn view(&self) -> ConversionView {
        ConversionView {
            amount_text: self.amount.clone(),
            source: Currency::info(self.source),
            target: Currency::info(self.target),
            fee: CONVERSION_FEE,
            amount_to_convert: parse_amount(&self.amount),
            rate: self.rate(),
            converted: self.converted(),
            can_continue: self.can_continue(),
            can_refresh: !self.state.is_loading(),
            loading: self.state.is_loading(),
            error: self.state.error().map(str::to_string),
            last_updated: self.state.last_updated(),
        }
    }
}

fn lookup(code: &str) -> Result<&'static str> {
    Currency::find(code)
        .map(|c| c.code)
        .ok_or_else(|| anyhow!("Unsupported currency: {}", code.trim()))
}
