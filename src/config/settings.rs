use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `[api] base_url`
pub const API_URL_ENV: &str = "GINUM_API_URL";

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub api: ApiSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub documents: DocumentSettings,
}

impl Config {
    /// Apply environment overrides on top of the file values.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url.trim().to_string();
            }
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DisplaySettings {
    pub currency_symbol: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DocumentSettings {
    /// Tax percentage applied to new quotation and purchase drafts
    #[serde(default)]
    pub default_tax_percent: Decimal,
}
