//! # Configuration State
//!
//! Application configuration read once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CARDCALC_*`)
//! 2. Defaults (this file)
//!
//! Read-only after initialization, so no lock.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use cardcalc_core::DEFAULT_CURRENCY_SYMBOL;

const DB_FILE_NAME: &str = "cardcalc.db";
const DEFAULT_RECEIPT_WIDTH: usize = 32;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// SQLite database file.
    pub db_path: PathBuf,

    /// Currency symbol prefixed to every amount.
    pub currency_symbol: String,

    /// Width of the plain-text receipt in characters.
    pub receipt_width: usize,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Database: `<platform data dir>/cardcalc.db`
    /// - Currency: naira (₦)
    /// - Receipt: 32 columns
    fn default() -> Self {
        ConfigState {
            db_path: default_database_path(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            receipt_width: DEFAULT_RECEIPT_WIDTH,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `CARDCALC_DB_PATH`: database file
    /// - `CARDCALC_CURRENCY_SYMBOL`: currency symbol
    /// - `CARDCALC_RECEIPT_WIDTH`: text receipt width (ignored unless a
    ///   positive integer)
    pub fn from_env() -> Self {
        ConfigState::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ConfigState::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(path) = lookup("CARDCALC_DB_PATH") {
            config.db_path = PathBuf::from(path);
        }

        if let Some(symbol) = lookup("CARDCALC_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(width) = lookup("CARDCALC_RECEIPT_WIDTH") {
            match width.trim().parse::<usize>() {
                Ok(width) if width > 0 => config.receipt_width = width,
                _ => warn!(value = %width, "Ignoring invalid CARDCALC_RECEIPT_WIDTH"),
            }
        }

        config
    }

    /// Formats an amount with the configured symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(1234.5), "₦1,234.5");
    /// ```
    pub fn format_currency(&self, value: f64) -> String {
        cardcalc_core::format_currency(&self.currency_symbol, value)
    }
}

/// Platform data directory for the database.
///
/// - **macOS**: `~/Library/Application Support/com.cardcalc.cardcalc/cardcalc.db`
/// - **Windows**: `%APPDATA%\cardcalc\cardcalc\data\cardcalc.db`
/// - **Linux**: `~/.local/share/cardcalc/cardcalc.db`
///
/// Falls back to the working directory when no home directory is known.
fn default_database_path() -> PathBuf {
    match ProjectDirs::from("com", "cardcalc", "cardcalc") {
        Some(dirs) => dirs.data_dir().join(DB_FILE_NAME),
        None => PathBuf::from(DB_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::from_lookup(lookup(&[]));

        assert_eq!(config.currency_symbol, "₦");
        assert_eq!(config.receipt_width, 32);
        assert!(config.db_path.ends_with("cardcalc.db"));
    }

    #[test]
    fn test_env_overrides() {
        let config = ConfigState::from_lookup(lookup(&[
            ("CARDCALC_DB_PATH", "/tmp/dev.db"),
            ("CARDCALC_CURRENCY_SYMBOL", "NGN "),
            ("CARDCALC_RECEIPT_WIDTH", "48"),
        ]));

        assert_eq!(config.db_path, PathBuf::from("/tmp/dev.db"));
        assert_eq!(config.currency_symbol, "NGN ");
        assert_eq!(config.receipt_width, 48);
    }

    #[test]
    fn test_invalid_width_keeps_default() {
        let config = ConfigState::from_lookup(lookup(&[("CARDCALC_RECEIPT_WIDTH", "wide")]));
        assert_eq!(config.receipt_width, 32);

        let config = ConfigState::from_lookup(lookup(&[("CARDCALC_RECEIPT_WIDTH", "0")]));
        assert_eq!(config.receipt_width, 32);
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(1234.0), "₦1,234");
        assert_eq!(config.format_currency(1234.5), "₦1,234.5");
        assert_eq!(config.format_currency(f64::NAN), "₦0");
    }
}
