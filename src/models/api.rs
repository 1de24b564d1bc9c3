//! API response models for the query endpoints.

use crate::models::CityWeatherRecord;
use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Successful response of the weather endpoint
#[derive(Clone, Serialize)]
pub struct WeatherApiResponse {
    pub success: bool,
    /// RFC 3339 time the data was assembled
    pub timestamp: String,
    pub data: Vec<CityWeatherRecord>,
}

/// Error payload returned with a server error status
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// City name pair, without coordinates
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct CityName {
    pub name: String,
    pub name_en: String,
}

/// Response model for the cities endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct CitiesResponse {
    pub success: bool,
    pub cities: Vec<CityName>,
}

/// Response model for the health check endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct HealthResponse {
    pub success: bool,
    pub status: String,
    /// Process uptime in seconds
    pub uptime: f64,
    pub timestamp: String,
}
