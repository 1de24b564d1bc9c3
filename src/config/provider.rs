//! Weather provider configuration.

use std::env;

/// Connection settings for the Open-Meteo forecast API
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    /// Timezone the provider uses to align daily values
    pub timezone: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.open-meteo.com/v1".to_string(),
            timezone: "Asia/Shanghai".to_string(),
        }
    }
}

impl ProviderConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = env::var("OPEN_METEO_BASE_URL").unwrap_or(defaults.base_url);
        let timezone = env::var("OPEN_METEO_TIMEZONE").unwrap_or(defaults.timezone);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timezone,
        }
    }
}
