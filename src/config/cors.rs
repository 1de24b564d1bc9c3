//! Cross-origin response header configuration.

use std::env;

/// Configuration for the CORS headers middleware
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allow_origin: String,
    pub allow_methods: String,
    pub allow_headers: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: "*".to_string(),
            allow_methods: "GET, OPTIONS".to_string(),
            allow_headers: "Content-Type".to_string(),
        }
    }
}

impl CorsConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let allow_origin = env::var("CORS_ALLOW_ORIGIN").unwrap_or_else(|_| "*".to_string());

        let allow_methods =
            env::var("CORS_ALLOW_METHODS").unwrap_or_else(|_| "GET, OPTIONS".to_string());

        let allow_headers =
            env::var("CORS_ALLOW_HEADERS").unwrap_or_else(|_| "Content-Type".to_string());

        Self {
            allow_origin,
            allow_methods,
            allow_headers,
        }
    }
}
