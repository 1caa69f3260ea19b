//! Application configuration.

use ratio_alerts::TelegramNotifier;
use ratio_core::PairConfig;
use ratio_feeds::DexScreenerClient;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Application configuration.
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Numerator pair.
    pub first: PairConfig,
    /// Denominator pair.
    pub second: PairConfig,
    /// Ratio above which an alert is sent.
    #[serde(with = "rust_decimal::serde::str")]
    pub threshold: Decimal,
    /// Delay between poll cycles in seconds.
    pub poll_interval_secs: u64,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
    /// File holding the last notified prices.
    pub data_file: PathBuf,
    /// Price API base URL.
    pub dexscreener_url: String,
    /// Telegram Bot API base URL.
    pub telegram_api_url: String,
    /// Logging level.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            first: PairConfig::default_first(),
            second: PairConfig::default_second(),
            threshold: Decimal::from(3),
            poll_interval_secs: 9,
            request_timeout_secs: 10,
            data_file: PathBuf::from("data.json"),
            dexscreener_url: DexScreenerClient::BASE_URL.to_string(),
            telegram_api_url: TelegramNotifier::API_URL.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from a JSON file, falling back to defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.first.key == self.second.key {
            return Err(ConfigError::Invalid(format!(
                "pairs must have distinct keys, both are {}",
                self.first.key
            )));
        }
        if self.threshold.is_sign_negative() {
            return Err(ConfigError::Invalid(format!(
                "threshold must not be negative: {}",
                self.threshold
            )));
        }
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "poll_interval_secs must be positive".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratio_core::Chain;
    use std::str::FromStr;
    use tempfile::TempDir;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.threshold, Decimal::from(3));
        assert_eq!(config.poll_interval(), Duration::from_secs(9));
        assert_eq!(config.first.chain, Chain::Ethereum);
        assert_eq!(config.second.chain, Chain::Polygon);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_urls_are_public_endpoints() {
        let config = AppConfig::default();
        assert_eq!(config.dexscreener_url, "https://api.dexscreener.com");
        assert_eq!(config.dexscreener_url, DexScreenerClient::BASE_URL);
        assert_eq!(config.telegram_api_url, TelegramNotifier::API_URL);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"threshold": "2.75", "poll_interval_secs": 30, "data_file": "state/prices.json"}"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.threshold, Decimal::from_str("2.75").unwrap());
        assert_eq!(config.poll_interval_secs, 30);
        assert_eq!(config.data_file, PathBuf::from("state/prices.json"));
        assert_eq!(config.first, PairConfig::default_first());
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_keys() {
        let mut config = AppConfig::default();
        config.second.key = config.first.key.clone();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_zero_durations() {
        let mut config = AppConfig::default();
        config.poll_interval_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.request_timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""threshold":"3""#));
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
