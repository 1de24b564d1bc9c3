//! Shared fixtures for integration tests.
#![allow(dead_code)]

use serde_json::{Value, json};
use weather_reminder::{City, ProviderConfig, WeatherClient};

pub fn city(name: &str, name_en: &str, lat: f64, lon: f64) -> City {
    City {
        name: name.to_string(),
        name_en: name_en.to_string(),
        lat,
        lon,
    }
}

pub fn beijing() -> City {
    city("北京", "Beijing", 39.9042, 116.4074)
}

pub fn shanghai() -> City {
    city("上海", "Shanghai", 31.2304, 121.4737)
}

pub fn guangzhou() -> City {
    city("广州", "Guangzhou", 23.1291, 113.2644)
}

/// Forecast body shaped like the Open-Meteo response
pub fn forecast_body(temperature: f64, precipitation_sum: f64) -> Value {
    json!({
        "latitude": 39.9,
        "longitude": 116.4,
        "timezone": "Asia/Shanghai",
        "current": {
            "time": "2024-03-05T08:30",
            "temperature_2m": temperature,
            "relative_humidity_2m": 55,
            "apparent_temperature": 20.1,
            "precipitation": 0.0,
            "weather_code": 2,
            "wind_speed_10m": 10.0
        },
        "daily": {
            "time": ["2024-03-05"],
            "weather_code": [2],
            "temperature_2m_max": [25.0],
            "temperature_2m_min": [15.0],
            "precipitation_sum": [precipitation_sum]
        }
    })
}

/// Weather client pointed at a mock provider
pub fn client_for(base_url: &str) -> WeatherClient {
    WeatherClient::new(ProviderConfig {
        base_url: base_url.to_string(),
        timezone: "Asia/Shanghai".to_string(),
    })
    .unwrap()
}
