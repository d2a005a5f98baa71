use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::currency::CurrencyRateProvider;
use crate::core::rates::RateTable;

/// Live quotes from an exchangerate-api compatible service.
pub struct ExchangeRateApiProvider {
    base_url: String,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    base: Option<String>,
    rates: HashMap<String, f64>,
}

#[async_trait]
impl CurrencyRateProvider for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateApiFetch", skip(self))]
    async fn fetch_rates(&self, reference: &str) -> Result<RateTable> {
        let url = format!("{}/v4/latest/{}", self.base_url, reference);
        debug!("Requesting exchange rates from {}", url);

        let client = reqwest::Client::builder().user_agent("curconv/0.1").build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for reference: {}", e, reference))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for reference: {}",
                response.status(),
                reference
            ));
        }

        let text = response.text().await?;
        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", reference, e))?;

        if let Some(base) = data.base.as_deref() {
            if !base.eq_ignore_ascii_case(reference) {
                return Err(anyhow!(
                    "Expected rates against {}, got {}",
                    reference,
                    base
                ));
            }
        }

        debug!(count = data.rates.len(), "Received exchange rates");
        RateTable::new(reference, data.rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_server(status: u16, body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/latest/USD"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_fetch_rates_success() {
        let body = r#"{
            "base": "USD",
            "date": "2024-06-01",
            "rates": {"USD": 1, "EUR": 0.92, "NGN": 1630.5, "CHF": 0.9}
        }"#;
        let server = mock_server(200, body).await;
        let provider = ExchangeRateApiProvider::new(&server.uri());

        let table = provider.fetch_rates("USD").await.unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(table.get("EUR"), Some(0.92));
        assert_eq!(table.get("CHF"), Some(0.9));
    }

    #[tokio::test]
    async fn test_fetch_rates_http_error() {
        let server = mock_server(503, "unavailable").await;
        let provider = ExchangeRateApiProvider::new(&server.uri());

        let err = provider.fetch_rates("USD").await.unwrap_err();
        assert!(err.to_string().contains("HTTP error"));
    }

    #[tokio::test]
    async fn test_fetch_rates_malformed_json() {
        let server = mock_server(200, r#"{"rates": "nope"}"#).await;
        let provider = ExchangeRateApiProvider::new(&server.uri());

        let err = provider.fetch_rates("USD").await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }

    #[tokio::test]
    async fn test_fetch_rates_wrong_base() {
        let server = mock_server(200, r#"{"base": "EUR", "rates": {"EUR": 1}}"#).await;
        let provider = ExchangeRateApiProvider::new(&server.uri());

        let err = provider.fetch_rates("USD").await.unwrap_err();
        assert!(err.to_string().contains("got EUR"));
    }

    #[tokio::test]
    async fn test_fetch_rates_missing_reference_entry() {
        let server = mock_server(200, r#"{"rates": {"EUR": 0.92}}"#).await;
        let provider = ExchangeRateApiProvider::new(&server.uri());

        assert!(provider.fetch_rates("USD").await.is_err());
    }
}
