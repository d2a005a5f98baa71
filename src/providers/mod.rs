pub mod exchange_rate_api;
pub mod fixture;

use crate::core::config::{AppConfig, RateSource};
use crate::core::currency::CurrencyRateProvider;
use exchange_rate_api::ExchangeRateApiProvider;
use fixture::FixtureRateProvider;

/// Builds the rate source selected in the config.
pub fn from_config(config: &AppConfig) -> Box<dyn CurrencyRateProvider> {
    match config.source {
        RateSource::Fixture => Box::new(FixtureRateProvider::new(config.fixture_delay())),
        RateSource::ExchangeRateApi => {
            Box::new(ExchangeRateApiProvider::new(config.exchange_rate_api_url()))
        }
    }
}
