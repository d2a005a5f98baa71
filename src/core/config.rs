use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    #[default]
    Fixture,
    ExchangeRateApi,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FixtureProviderConfig {
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeRateApiConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub fixture: Option<FixtureProviderConfig>,
    pub exchange_rate_api: Option<ExchangeRateApiConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            fixture: Some(FixtureProviderConfig {
                delay_ms: default_delay_ms(),
            }),
            exchange_rate_api: Some(ExchangeRateApiConfig {
                base_url: "https://api.exchangerate-api.com".to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_reference")]
    pub reference_currency: String,
    #[serde(default = "default_from")]
    pub default_from: String,
    #[serde(default = "default_to")]
    pub default_to: String,
    #[serde(default)]
    pub source: RateSource,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

fn default_reference() -> String {
    "USD".to_string()
}

fn default_from() -> String {
    "USD".to_string()
}

fn default_to() -> String {
    "EUR".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_delay_ms() -> u64 {
    1000
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            reference_currency: default_reference(),
            default_from: default_from(),
            default_to: default_to(),
            source: RateSource::default(),
            timeout_secs: default_timeout_secs(),
            providers: ProvidersConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, or built-in defaults if
    /// no file has been set up there.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "curconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config.normalized())
    }

    /// Currency codes are matched in upper case everywhere downstream.
    pub fn normalized(mut self) -> Self {
        for code in [
            &mut self.reference_currency,
            &mut self.default_from,
            &mut self.default_to,
        ] {
            *code = code.trim().to_ascii_uppercase();
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn fixture_delay(&self) -> Duration {
        let delay_ms = self
            .providers
            .fixture
            .as_ref()
            .map_or(default_delay_ms(), |p| p.delay_ms);
        Duration::from_millis(delay_ms)
    }

    pub fn exchange_rate_api_url(&self) -> &str {
        self.providers
            .exchange_rate_api
            .as_ref()
            .map_or("https://api.exchangerate-api.com", |p| &p.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
reference_currency: "EUR"
default_from: "GBP"
default_to: "NGN"
source: exchange_rate_api
timeout_secs: 3
providers:
  fixture:
    delay_ms: 250
  exchange_rate_api:
    base_url: "http://example.com/rates"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.reference_currency, "EUR");
        assert_eq!(config.default_from, "GBP");
        assert_eq!(config.default_to, "NGN");
        assert_eq!(config.source, RateSource::ExchangeRateApi);
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.fixture_delay(), Duration::from_millis(250));
        assert_eq!(config.exchange_rate_api_url(), "http://example.com/rates");
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config: AppConfig = serde_yaml::from_str("default_to: JPY\n").unwrap();
        assert_eq!(config.reference_currency, "USD");
        assert_eq!(config.default_from, "USD");
        assert_eq!(config.default_to, "JPY");
        assert_eq!(config.source, RateSource::Fixture);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.fixture_delay(), Duration::from_millis(1000));
        assert_eq!(
            config.exchange_rate_api_url(),
            "https://api.exchangerate-api.com"
        );
    }

    #[test]
    fn test_providers_without_fixture_section() {
        let yaml_str = r#"
providers:
  exchange_rate_api:
    base_url: "http://localhost:9000"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        assert!(config.providers.fixture.is_none());
        assert_eq!(config.fixture_delay(), Duration::from_millis(1000));
    }

    #[test]
    fn test_lowercase_codes_are_normalized() -> Result<()> {
        let config_file = tempfile::NamedTempFile::new()?;
        fs::write(
            config_file.path(),
            "reference_currency: usd\ndefault_from: \" gbp\"\ndefault_to: ngn\n",
        )?;

        let config = AppConfig::load_from_path(config_file.path())?;

        assert_eq!(config.reference_currency, "USD");
        assert_eq!(config.default_from, "GBP");
        assert_eq!(config.default_to, "NGN");
        Ok(())
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let err = AppConfig::load_from_path("/nonexistent/curconv/config.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
