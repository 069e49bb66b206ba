//! Runtime configuration: where expenses are stored and how amounts display.

use std::path::PathBuf;

use crate::dto::from_minor_units;

pub const DEFAULT_DATA_DIR: &str = ".iexpense";
pub const DEFAULT_KEY: &str = "Items";
pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding one JSON file per storage key.
    pub data_dir: PathBuf,
    /// Storage key the expense list is saved under.
    pub key: String,
    /// Currency code shown in front of amounts.
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            key: DEFAULT_KEY.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl Config {
    /// Formats a minor-unit amount, e.g. `350` as `USD 3.50`.
    pub fn format_amount(&self, minor_units: i64) -> String {
        format!("{} {}", self.currency, from_minor_units(minor_units))
    }
}
