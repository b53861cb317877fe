//! Application configuration management.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::AppResult;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Chart of accounts configuration.
    #[serde(default)]
    pub accounts: AccountsConfig,
    /// Validation thresholds.
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Importer defaults.
    #[serde(default)]
    pub importer: ImporterConfig,
}

/// Chart of accounts configuration.
///
/// Account numbers are valid when they fall inside one of the class ranges.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountsConfig {
    /// Account number ranges per account class.
    #[serde(default = "default_account_classes")]
    pub classes: Vec<AccountClassRange>,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            classes: default_account_classes(),
        }
    }
}

/// Inclusive account number range belonging to one account class.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountClassRange {
    /// Class number (first digit in the BAS chart).
    pub class: u8,
    /// Human readable class name.
    pub name: String,
    /// First account number in the class.
    pub first: u32,
    /// Last account number in the class.
    pub last: u32,
}

impl AccountClassRange {
    fn new(class: u8, name: &str, first: u32, last: u32) -> Self {
        Self {
            class,
            name: name.to_string(),
            first,
            last,
        }
    }
}

// Swedish BAS chart, classes 1-8.
fn default_account_classes() -> Vec<AccountClassRange> {
    vec![
        AccountClassRange::new(1, "Assets", 1000, 1999),
        AccountClassRange::new(2, "Equity and liabilities", 2000, 2999),
        AccountClassRange::new(3, "Operating revenue", 3000, 3999),
        AccountClassRange::new(4, "Goods and materials", 4000, 4999),
        AccountClassRange::new(5, "Other external expenses", 5000, 5999),
        AccountClassRange::new(6, "Other external expenses", 6000, 6999),
        AccountClassRange::new(7, "Personnel expenses", 7000, 7999),
        AccountClassRange::new(8, "Financial items", 8000, 8999),
    ]
}

/// Validation thresholds.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    /// Minimum length of verification names.
    #[serde(default = "default_name_min_length")]
    pub name_min_length: usize,
    /// Earliest accepted creation timestamp in epoch milliseconds.
    #[serde(default = "default_earliest_timestamp_ms")]
    pub earliest_timestamp_ms: i64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            name_min_length: default_name_min_length(),
            earliest_timestamp_ms: default_earliest_timestamp_ms(),
        }
    }
}

fn default_name_min_length() -> usize {
    3
}

fn default_earliest_timestamp_ms() -> i64 {
    946_684_800_000 // 2000-01-01T00:00:00Z
}

/// Importer defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ImporterConfig {
    /// User the imported verifications belong to.
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// Local (reporting) currency of that user.
    #[serde(default = "default_local_currency")]
    pub local_currency: String,
    /// Static exchange rates into the local currency, keyed by currency code.
    #[serde(default)]
    pub exchange_rates: BTreeMap<String, String>,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            local_currency: default_local_currency(),
            exchange_rates: BTreeMap::new(),
        }
    }
}

fn default_user_id() -> String {
    "1".to_string()
}

fn default_local_currency() -> String {
    "SEK".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("KASSABOK").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
