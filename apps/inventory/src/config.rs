//! # Inventory Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line flags (`--db`, `--low-stock`)
//! 2. Environment variables (`TELLER_*`)
//! 3. Defaults (this file)
//!
//! Read-only after startup, so the shell holds it by value.

use std::path::PathBuf;

use directories::ProjectDirs;
use teller_core::validation::validate_low_stock_threshold;
use teller_core::DEFAULT_LOW_STOCK_THRESHOLD;

pub const ENV_DB_PATH: &str = "TELLER_DB_PATH";
pub const ENV_LOW_STOCK_THRESHOLD: &str = "TELLER_LOW_STOCK_THRESHOLD";
pub const ENV_CURRENCY_SYMBOL: &str = "TELLER_CURRENCY_SYMBOL";

/// File name of the database inside the platform data directory.
pub const DATABASE_FILE: &str = "inventory.db";

/// Inventory application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryConfig {
    /// SQLite database file.
    pub database_path: PathBuf,

    /// Products with a quantity strictly below this show in the low stock
    /// report. Default: 5
    pub low_stock_threshold: i64,

    /// Currency symbol for display. Default: "$"
    pub currency_symbol: String,
}

impl InventoryConfig {
    /// Loads configuration from the process environment.
    ///
    /// ## Environment Variables
    /// - `TELLER_DB_PATH`: database file (default: platform data dir)
    /// - `TELLER_LOW_STOCK_THRESHOLD`: non-negative integer (default: 5)
    /// - `TELLER_CURRENCY_SYMBOL`: display symbol (default: `$`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_path = match lookup(ENV_DB_PATH) {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_database_path()?,
        };

        let low_stock_threshold = match lookup(ENV_LOW_STOCK_THRESHOLD) {
            Some(raw) => parse_threshold(ENV_LOW_STOCK_THRESHOLD, &raw)?,
            None => DEFAULT_LOW_STOCK_THRESHOLD,
        };

        let currency_symbol = lookup(ENV_CURRENCY_SYMBOL).unwrap_or_else(|| "$".to_string());

        Ok(InventoryConfig {
            database_path,
            low_stock_threshold,
            currency_symbol,
        })
    }

    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    pub fn with_low_stock_threshold(mut self, threshold: i64) -> Result<Self, ConfigError> {
        validate_low_stock_threshold(threshold).map_err(|_| ConfigError::InvalidValue {
            key: "--low-stock".to_string(),
            value: threshold.to_string(),
        })?;
        self.low_stock_threshold = threshold;
        Ok(self)
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use teller_inventory::InventoryConfig;
    ///
    /// let config = InventoryConfig::for_database("inventory.db");
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// assert_eq!(config.format_currency(-5), "-$0.05");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        format!(
            "{}{}{}.{:02}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            (cents / 100).unsigned_abs(),
            (cents % 100).unsigned_abs()
        )
    }

    /// Default settings with an explicit database path.
    pub fn for_database(path: impl Into<PathBuf>) -> Self {
        InventoryConfig {
            database_path: path.into(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            currency_symbol: "$".to_string(),
        }
    }
}

/// Platform-specific location of the database.
///
/// - **Linux**: `~/.local/share/teller-inventory/inventory.db`
/// - **macOS**: `~/Library/Application Support/com.teller.inventory/inventory.db`
/// - **Windows**: `%APPDATA%\teller\inventory\data\inventory.db`
pub fn default_database_path() -> Result<PathBuf, ConfigError> {
    let dirs = ProjectDirs::from("com", "teller", "inventory").ok_or(ConfigError::NoDataDir)?;
    Ok(dirs.data_dir().join(DATABASE_FILE))
}

fn parse_threshold(key: &str, raw: &str) -> Result<i64, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    };

    let threshold: i64 = raw.trim().parse().map_err(|_| invalid())?;
    validate_low_stock_threshold(threshold).map_err(|_| invalid())?;
    Ok(threshold)
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("Could not determine the application data directory; set {ENV_DB_PATH}")]
    NoDataDir,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_values_are_used() {
        let config = InventoryConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, "/tmp/shop.db"),
            (ENV_LOW_STOCK_THRESHOLD, "12"),
            (ENV_CURRENCY_SYMBOL, "€"),
        ]))
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/shop.db"));
        assert_eq!(config.low_stock_threshold, 12);
        assert_eq!(config.format_currency(250), "€2.50");
    }

    #[test]
    fn test_defaults() {
        let config = InventoryConfig::from_lookup(lookup(&[(ENV_DB_PATH, "x.db")])).unwrap();
        assert_eq!(config.low_stock_threshold, 5);
        assert_eq!(config.currency_symbol, "$");
    }

    #[test]
    fn test_invalid_threshold_is_an_error() {
        for raw in ["abc", "-1", "5.5", ""] {
            let result = InventoryConfig::from_lookup(lookup(&[
                (ENV_DB_PATH, "x.db"),
                (ENV_LOW_STOCK_THRESHOLD, raw),
            ]));
            assert!(
                matches!(result, Err(ConfigError::InvalidValue { .. })),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_overrides() {
        let config = InventoryConfig::for_database("a.db")
            .with_database_path("b.db")
            .with_low_stock_threshold(0)
            .unwrap();
        assert_eq!(config.database_path, PathBuf::from("b.db"));
        assert_eq!(config.low_stock_threshold, 0);

        assert!(InventoryConfig::for_database("a.db")
            .with_low_stock_threshold(-3)
            .is_err());
    }

    #[test]
    fn test_debug_lists_every_setting() {
        let config = InventoryConfig::for_database("/tmp/shop.db")
            .with_low_stock_threshold(3)
            .unwrap();
        let logged = format!("{config:?}");
        assert!(logged.contains("/tmp/shop.db"));
        assert!(logged.contains("low_stock_threshold: 3"));
        assert!(logged.contains("currency_symbol: \"$\""));
    }

    #[test]
    fn test_format_currency() {
        let config = InventoryConfig::for_database("x.db");
        assert_eq!(config.format_currency(1234), "$12.34");
        assert_eq!(config.format_currency(100), "$1.00");
        assert_eq!(config.format_currency(1), "$0.01");
        assert_eq!(config.format_currency(0), "$0.00");
        assert_eq!(config.format_currency(-1234), "-$12.34");
    }
}
