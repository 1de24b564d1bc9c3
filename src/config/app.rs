//! Application configuration file: cities, schedule and notification settings.

use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf};

/// Default location of the configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// A city to report on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    /// Local (Chinese) name
    pub name: String,
    /// English name
    pub name_en: String,
    pub lat: f64,
    pub lon: f64,
}

/// When the report task runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Cron expression, five fields (minute first) or six/seven fields (seconds first)
    pub cron: String,
    /// Human-readable description, display only
    #[serde(default)]
    pub description: String,
    /// IANA timezone the cron expression is evaluated in
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            cron: "0 8 * * *".to_string(),
            description: String::new(),
            timezone: default_timezone(),
        }
    }
}

fn default_timezone() -> String {
    "Asia/Shanghai".to_string()
}

/// Delivery channel for the formatted report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationMethod {
    #[default]
    Console,
    Webhook,
}

impl NotificationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationMethod::Console => "console",
            NotificationMethod::Webhook => "webhook",
        }
    }
}

/// Notification settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub method: NotificationMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,
}

/// The full configuration document, read once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub cities: Vec<City>,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub notification: NotificationConfig,
}

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl AppConfig {
    /// Resolve the config file path from `CONFIG_PATH`, falling back to [`DEFAULT_CONFIG_PATH`]
    pub fn path_from_env() -> PathBuf {
        env::var("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from the path named by `CONFIG_PATH`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Self::path_from_env())
    }

    /// Read, parse and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_json(&raw)?;
        tracing::debug!(
            path = %path.display(),
            cities = config.cities.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Parse and validate a configuration document
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for city in &self.cities {
            if !(-90.0..=90.0).contains(&city.lat) {
                return Err(ConfigError::Invalid(format!(
                    "latitude of {} must be between -90 and 90",
                    city.name_en
                )));
            }
            if !(-180.0..=180.0).contains(&city.lon) {
                return Err(ConfigError::Invalid(format!(
                    "longitude of {} must be between -180 and 180",
                    city.name_en
                )));
            }
        }

        let notification = &self.notification;
        if notification.enabled && notification.method == NotificationMethod::Webhook {
            match notification.webhook.as_deref() {
                Some(hook) if url::Url::parse(hook).is_ok() => {}
                Some(hook) => {
                    return Err(ConfigError::Invalid(format!(
                        "webhook URL is not valid: {hook}"
                    )));
                }
                None => {
                    return Err(ConfigError::Invalid(
                        "webhook notification requires a webhook URL".to_string(),
                    ));
                }
            }
        }

        Ok(())
    }
}
