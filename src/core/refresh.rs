//! Rate refresh lifecycle: loading flag, error banner and last update time

use crate::core::currency::CurrencyRateProvider;
use crate::core::rates::RateTable;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch exchange rates. Please try again.";

/// What happened to a refresh request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Updated,
    Failed,
    /// Another refresh was still in flight.
    Ignored,
}

/// Current rates plus the status of the most recent refresh.
#[derive(Debug, Clone, Default)]
pub struct RateState {
    rates: RateTable,
    loading: bool,
    error: Option<String>,
    last_updated: Option<DateTime<Local>>,
}

impl RateState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    /// Marks a refresh as started. Returns false, leaving state untouched,
    /// when one is already pending.
    pub fn begin_refresh(&mut self) -> bool {
        if self.loading {
            debug!("Refresh already in flight, ignoring request");
            return false;
        }
        self.loading = true;
        self.error = None;
        true
    }

    /// Applies the result of a fetch in one step. On failure the previous
    /// table is kept. The loading flag is cleared last either way.
    pub fn finish_refresh(&mut self, result: Result<RateTable>) -> RefreshOutcome {
        let outcome = match result {
            Ok(rates) => {
                info!(count = rates.len(), "Exchange rates updated");
                self.rates = rates;
                self.last_updated = Some(Local::now());
                RefreshOutcome::Updated
            }
            Err(e) => {
                warn!(error = %e, "Exchange rate refresh failed");
                self.error = Some(FETCH_FAILED_MESSAGE.to_string());
                RefreshOutcome::Failed
            }
        };
        self.loading = false;
        outcome
    }

    /// Runs a full refresh cycle against `provider`.
    pub async fn refresh(
        &mut self,
        provider: &dyn CurrencyRateProvider,
        reference: &str,
        timeout: Duration,
    ) -> RefreshOutcome {
        if !self.begin_refresh() {
            return RefreshOutcome::Ignored;
        }
        let result = fetch_rates(provider, reference, timeout).await;
        self.finish_refresh(result)
    }
}

/// Fetches a fresh table, failing if the provider takes longer than `timeout`.
/// The reference code is upper-cased before it reaches the provider.
pub async fn fetch_rates(
    provider: &dyn CurrencyRateProvider,
    reference: &str,
    timeout: Duration,
) -> Result<RateTable> {
    let reference = reference.trim().to_ascii_uppercase();
    debug!(reference = %reference, ?timeout, "Fetching exchange rates");
    tokio::time::timeout(timeout, provider.fetch_rates(&reference))
        .await
        .with_context(|| format!("Rate fetch timed out after {timeout:?}"))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockProvider {
        fail: bool,
        delay: Duration,
        call_count: AtomicUsize,
    }

    impl MockProvider {
        fn new(fail: bool, delay: Duration) -> Self {
            Self {
                fail,
                delay,
                call_count: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CurrencyRateProvider for MockProvider {
        async fn fetch_rates(&self, reference: &str) -> Result<RateTable> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if self.fail {
                return Err(anyhow!("connection refused"));
            }
            let rates = HashMap::from([(reference.to_string(), 1.0), ("NGN".to_string(), 1630.5)]);
            RateTable::new(reference, rates)
        }
    }

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[tokio::test(start_paused = true)]
    async fn test_successful_refresh() {
        let provider = MockProvider::new(false, Duration::from_millis(1000));
        let mut state = RateState::new();

        let outcome = state.refresh(&provider, "USD", TIMEOUT).await;

        assert_eq!(outcome, RefreshOutcome::Updated);
        assert!(!state.is_loading());
        assert!(state.error().is_none());
        assert!(state.last_updated().is_some());
        assert_eq!(state.rates().get("NGN"), Some(1630.5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_lowercase_reference_is_upper_cased() {
        let provider = MockProvider::new(false, Duration::ZERO);
        let mut state = RateState::new();

        let outcome = state.refresh(&provider, " usd", TIMEOUT).await;

        assert_eq!(outcome, RefreshOutcome::Updated);
        assert_eq!(state.rates().reference(), Some("USD"));
        assert_eq!(state.rates().get("USD"), Some(1.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_first_refresh_leaves_empty_table() {
        let provider = MockProvider::new(true, Duration::from_millis(1000));
        let mut state = RateState::new();

        let outcome = state.refresh(&provider, "USD", TIMEOUT).await;

        assert_eq!(outcome, RefreshOutcome::Failed);
        assert!(!state.is_loading());
        assert_eq!(state.error(), Some(FETCH_FAILED_MESSAGE));
        assert!(state.rates().is_empty());
        assert!(state.last_updated().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refresh_keeps_previous_rates() {
        let mut state = RateState::new();
        state
            .refresh(&MockProvider::new(false, Duration::ZERO), "USD", TIMEOUT)
            .await;
        let before = state.rates().clone();
        let updated_at = state.last_updated();

        let outcome = state
            .refresh(&MockProvider::new(true, Duration::ZERO), "USD", TIMEOUT)
            .await;

        assert_eq!(outcome, RefreshOutcome::Failed);
        assert_eq!(state.rates(), &before);
        assert_eq!(state.last_updated(), updated_at);
        assert!(state.error().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_refresh_clears_error() {
        let mut state = RateState::new();
        state
            .refresh(&MockProvider::new(true, Duration::ZERO), "USD", TIMEOUT)
            .await;
        assert!(state.error().is_some());

        assert!(state.begin_refresh());
        assert!(state.is_loading());
        assert!(state.error().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_a_failure() {
        let provider = MockProvider::new(false, Duration::from_secs(60));
        let mut state = RateState::new();

        let outcome = state
            .refresh(&provider, "USD", Duration::from_secs(5))
            .await;

        assert_eq!(outcome, RefreshOutcome::Failed);
        assert!(state.rates().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_request_is_ignored() {
        let provider = MockProvider::new(false, Duration::ZERO);
        let mut state = RateState::new();

        assert!(state.begin_refresh());
        let outcome = state.refresh(&provider, "USD", TIMEOUT).await;

        assert_eq!(outcome, RefreshOutcome::Ignored);
        assert_eq!(provider.call_count.load(Ordering::SeqCst), 0);
        assert!(state.is_loading());
    }
}
