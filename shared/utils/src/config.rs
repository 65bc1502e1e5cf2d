use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub import: ImportConfig,
    pub forex: ForexConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_request_size: usize,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

/// Knobs of the spreadsheet import pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Leading rows of a tech card searched for product name and order size.
    pub meta_scan_rows: usize,
    /// Leading rows of a price list searched for a header row.
    pub catalog_header_window: usize,
    pub default_unit: String,
    pub default_product_name: String,
    /// Column positions assumed when a price list has no recognizable header.
    pub catalog_fallback: FallbackColumnsConfig,
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackColumnsConfig {
    pub name: usize,
    pub price: usize,
    pub unit: Option<usize>,
    pub category: Option<usize>,
    pub article: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForexConfig {
    pub host: String,
    pub port: u16,
    /// Quote endpoint; the base currency code is appended as the last path segment.
    pub api_url: String,
    pub ttl_seconds: u64,
    pub request_timeout_seconds: u64,
    /// Currencies reported for every base, in display order.
    pub tracked_currencies: Vec<String>,
    /// JSON file the cached quotes are restored from on start and saved to on shutdown.
    pub snapshot_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let defaults = Config::try_from(&AppConfig::default())?;

        let config = Config::builder()
            .add_source(defaults)
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                File::with_name(&format!(
                    "config/{}",
                    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // Add local config (gitignored)
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("MEBEL")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("forex.tracked_currencies")
                    .with_list_parse_key("import.allowed_extensions")
                    .try_parsing(true),
            );

        config.build()?.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                max_request_size: 16 * 1024 * 1024, // 16MB
                timeout_seconds: 30,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
                file_path: None,
            },
            import: ImportConfig::default(),
            forex: ForexConfig::default(),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            meta_scan_rows: 15,
            catalog_header_window: 6,
            default_unit: mebel_models::DEFAULT_UNIT.to_string(),
            default_product_name: mebel_models::DEFAULT_PRODUCT_NAME.to_string(),
            catalog_fallback: FallbackColumnsConfig {
                name: 0,
                price: 2,
                unit: Some(1),
                category: Some(3),
                article: None,
            },
            allowed_extensions: vec!["xlsx".to_string(), "xls".to_string(), "csv".to_string()],
        }
    }
}

impl Default for ForexConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8082,
            api_url: "https://open.er-api.com/v6/latest".to_string(),
            ttl_seconds: 600,
            request_timeout_seconds: 10,
            tracked_currencies: ["USD", "EUR", "CNY", "RUB", "KZT", "BYN"]
                .iter()
                .map(|code| code.to_string())
                .collect(),
            snapshot_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_forex_ttl_is_ten_minutes() {
        let config = AppConfig::default();
        assert_eq!(config.forex.ttl_seconds, 600);
        assert!(config.forex.tracked_currencies.contains(&"RUB".to_string()));
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        let config = AppConfig::load().unwrap();
        assert_eq!(config.import.catalog_header_window, 6);
        assert_eq!(config.import.catalog_fallback.price, 2);
    }
}
