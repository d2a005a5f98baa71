use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::currency::CurrencyRateProvider;
use crate::core::rates::RateTable;

/// Built-in quotes, in units per US dollar.
pub const FIXTURE_RATES: [(&str, f64); 8] = [
    ("USD", 1.0),
    ("EUR", 0.92),
    ("GBP", 0.79),
    ("NGN", 1630.5),
    ("GHS", 12.05),
    ("CAD", 1.36),
    ("JPY", 149.5),
    ("AUD", 1.52),
];

/// Serves the built-in quotes after a fixed delay standing in for a network
/// round trip.
pub struct FixtureRateProvider {
    delay: Duration,
}

impl FixtureRateProvider {
    pub fn new(delay: Duration) -> Self {
        FixtureRateProvider { delay }
    }
}

/// Re-expresses the USD quotes against `reference`.
fn rebase(reference: &str) -> Result<HashMap<String, f64>> {
    let reference_rate = FIXTURE_RATES
        .iter()
        .find(|(code, _)| *code == reference)
        .map(|(_, rate)| *rate)
        .ok_or_else(|| anyhow!("No fixture rate for reference currency: {}", reference))?;

    Ok(FIXTURE_RATES
        .iter()
        .map(|(code, rate)| {
            let rebased = if *code == reference {
                1.0
            } else {
                rate / reference_rate
            };
            (code.to_string(), rebased)
        })
        .collect())
}

#[async_trait]
impl CurrencyRateProvider for FixtureRateProvider {
    #[instrument(name = "FixtureRateFetch", skip(self))]
    async fn fetch_rates(&self, reference: &str) -> Result<RateTable> {
        debug!(delay = ?self.delay, "Simulating rate fetch");
        tokio::time::sleep(self.delay).await;
        RateTable::new(reference, rebase(reference)?)
    }
}
