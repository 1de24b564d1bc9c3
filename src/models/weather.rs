//! Per-city weather records produced by the fetcher.

use serde::Serialize;
use serde_json::Number;

/// Description of a WMO weather code in both languages plus a pictogram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    /// Local-language (Chinese) label
    #[serde(rename = "zh")]
    pub local: &'static str,
    /// English label
    #[serde(rename = "en")]
    pub english: &'static str,
    #[serde(rename = "emoji")]
    pub pictogram: &'static str,
}

/// Conditions at fetch time, passed through from the provider without conversion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    /// Air temperature in °C
    pub temperature: f64,
    /// Apparent temperature in °C
    pub feels_like: f64,
    /// Relative humidity in %, kept in the provider's number form
    pub humidity: Number,
    /// Precipitation in mm; `None` when the provider reports null
    pub precipitation: Option<f64>,
    /// Wind speed in km/h
    pub wind_speed: f64,
    pub weather_code: i64,
    #[serde(rename = "weatherDesc")]
    pub descriptor: Descriptor,
}

/// Today's entry of the daily forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayForecast {
    pub temp_max: f64,
    pub temp_min: f64,
    /// Precipitation sum in mm; `None` when the provider reports null
    pub precipitation: Option<f64>,
    pub weather_code: i64,
    #[serde(rename = "weatherDesc")]
    pub descriptor: Descriptor,
}

/// Weather for one city, built fresh per fetch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityWeatherRecord {
    pub city: String,
    pub city_en: String,
    pub current: CurrentConditions,
    pub today: TodayForecast,
}
