//! Forecast client: fetches one city at a time and aggregates many in parallel.

use crate::{
    config::{City, ProviderConfig},
    models::{CityWeatherRecord, CurrentConditions, TodayForecast},
    services::{descriptions::describe, metrics::AppMetrics},
};
use futures::future::join_all;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Number;
use url::Url;

/// Fields requested from the `current` block
pub const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,precipitation,weather_code,wind_speed_10m";

/// Fields requested from the `daily` block
pub const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum";

/// Open-Meteo forecast response, reduced to the fields we request
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: f64,
    relative_humidity_2m: Number,
    apparent_temperature: f64,
    precipitation: Option<f64>,
    weather_code: i64,
    wind_speed_10m: f64,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    weather_code: Vec<i64>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    precipitation_sum: Vec<Option<f64>>,
}

/// Errors that can occur while fetching one city
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Invalid forecast URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Weather API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Weather API returned status: {0}")]
    Status(StatusCode),

    #[error("Failed to parse weather data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Weather data is missing {0}")]
    MissingField(&'static str),
}

/// Successful records of one multi-city fetch
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    /// Records in the order the cities were requested, failures omitted
    pub records: Vec<CityWeatherRecord>,
    /// Number of cities requested
    pub requested: usize,
}

impl Aggregate {
    /// No city could be fetched
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn failed(&self) -> usize {
        self.requested.saturating_sub(self.records.len())
    }
}

/// Client for the forecast provider
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    config: ProviderConfig,
    metrics: Option<AppMetrics>,
}

impl WeatherClient {
    /// Create a new client. No request timeout is set.
    pub fn new(config: ProviderConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .user_agent(concat!("weather-reminder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config,
            metrics: None,
        })
    }

    /// Record per-city fetch outcomes in the given metrics collector
    pub fn with_metrics(mut self, metrics: AppMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the forecast request URL for a city
    pub fn forecast_url(&self, city: &City) -> Result<Url, WeatherError> {
        let url = Url::parse_with_params(
            &format!("{}/forecast", self.config.base_url),
            &[
                ("latitude", city.lat.to_string().as_str()),
                ("longitude", city.lon.to_string().as_str()),
                ("current", CURRENT_FIELDS),
                ("daily", DAILY_FIELDS),
                ("timezone", self.config.timezone.as_str()),
            ],
        )?;
        Ok(url)
    }

    /// Fetch current conditions and today's forecast for one city.
    ///
    /// Failures are logged with the city's names and returned as `Err`; they
    /// never escape as panics.
    pub async fn fetch_city(&self, city: &City) -> Result<CityWeatherRecord, WeatherError> {
        let result = self.request_forecast(city).await.and_then(|forecast| build_record(city, forecast));

        if let Some(metrics) = &self.metrics {
            metrics.record_city_fetch(&city.name_en, result.is_ok());
        }

        if let Err(e) = &result {
            tracing::error!(
                city = %city.name,
                city_en = %city.name_en,
                error = %e,
                "Failed to get weather for {}", city.name
            );
        }

        result
    }

    /// Fetch every city concurrently and keep the successes, in input order
    pub async fn fetch_all(&self, cities: &[City]) -> Aggregate {
        let results = join_all(cities.iter().map(|city| self.fetch_city(city))).await;

        let records: Vec<CityWeatherRecord> = results.into_iter().filter_map(Result::ok).collect();

        tracing::debug!(
            requested = cities.len(),
            fetched = records.len(),
            "Multi-city fetch finished"
        );

        Aggregate {
            records,
            requested: cities.len(),
        }
    }

    async fn request_forecast(&self, city: &City) -> Result<ForecastResponse, WeatherError> {
        let url = self.forecast_url(city)?;
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(WeatherError::Status(response.status()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

fn build_record(city: &City, forecast: ForecastResponse) -> Result<CityWeatherRecord, WeatherError> {
    let current = forecast.current;
    let daily = forecast.daily;

    let today_code = first(&daily.weather_code, "daily.weather_code")?;

    Ok(CityWeatherRecord {
        city: city.name.clone(),
        city_en: city.name_en.clone(),
        current: CurrentConditions {
            temperature: current.temperature_2m,
            feels_like: current.apparent_temperature,
            humidity: current.relative_humidity_2m,
            precipitation: current.precipitation,
            wind_speed: current.wind_speed_10m,
            weather_code: current.weather_code,
            descriptor: describe(current.weather_code),
        },
        today: TodayForecast {
            temp_max: first(&daily.temperature_2m_max, "daily.temperature_2m_max")?,
            temp_min: first(&daily.temperature_2m_min, "daily.temperature_2m_min")?,
            precipitation: first(&daily.precipitation_sum, "daily.precipitation_sum")?,
            weather_code: today_code,
            descriptor: describe(today_code),
        },
    })
}

fn first<T: Copy>(values: &[T], field: &'static str) -> Result<T, WeatherError> {
    values.first().copied().ok_or(WeatherError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beijing() -> City {
        City {
            name: "北京".to_string(),
            name_en: "Beijing".to_string(),
            lat: 39.9042,
            lon: 116.4074,
        }
    }

    fn sample_forecast() -> ForecastResponse {
        serde_json::from_value(serde_json::json!({
            "current": {
                "temperature_2m": 21.3,
                "relative_humidity_2m": 55,
                "apparent_temperature": 20.1,
                "precipitation": 0.0,
                "weather_code": 2,
                "wind_speed_10m": 10.0
            },
            "daily": {
                "weather_code": [61, 3],
                "temperature_2m_max": [25.0, 27.0],
                "temperature_2m_min": [15.0, 16.0],
                "precipitation_sum": [2.5, 0.0]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_forecast_url() {
        let client = WeatherClient::new(ProviderConfig::default()).unwrap();
        let url = client.forecast_url(&beijing()).unwrap();

        assert_eq!(url.host_str(), Some("api.open-meteo.com"));
        assert_eq!(url.path(), "/v1/forecast");

        let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(params.contains(&("latitude".to_string(), "39.9042".to_string())));
        assert!(params.contains(&("longitude".to_string(), "116.4074".to_string())));
        assert!(params.contains(&("current".to_string(), CURRENT_FIELDS.to_string())));
        assert!(params.contains(&("daily".to_string(), DAILY_FIELDS.to_string())));
        assert!(params.contains(&("timezone".to_string(), "Asia/Shanghai".to_string())));
    }

    #[test]
    fn test_build_record_reads_today() {
        let record = build_record(&beijing(), sample_forecast()).unwrap();

        assert_eq!(record.city, "北京");
        assert_eq!(record.city_en, "Beijing");
        assert_eq!(record.current.temperature, 21.3);
        assert_eq!(record.current.feels_like, 20.1);
        assert_eq!(record.current.humidity, Number::from(55));
        assert_eq!(record.current.descriptor, describe(2));
        assert_eq!(record.today.temp_max, 25.0);
        assert_eq!(record.today.temp_min, 15.0);
        assert_eq!(record.today.precipitation, Some(2.5));
        assert_eq!(record.today.weather_code, 61);
        assert_eq!(record.today.descriptor.english, "Slight rain");
    }

    #[test]
    fn test_build_record_empty_daily() {
        let mut forecast = sample_forecast();
        forecast.daily.temperature_2m_min.clear();

        let err = build_record(&beijing(), forecast).unwrap_err();
        assert!(matches!(
            err,
            WeatherError::MissingField("daily.temperature_2m_min")
        ));
    }

    #[test]
    fn test_build_record_null_precipitation() {
        let mut forecast = sample_forecast();
        forecast.current.precipitation = None;
        forecast.daily.precipitation_sum[0] = None;

        let record = build_record(&beijing(), forecast).unwrap();
        assert_eq!(record.current.precipitation, None);
        assert_eq!(record.today.precipitation, None);
        assert_eq!(record.today.temp_max, 25.0);
    }

    #[test]
    fn test_decode_nullable_values() {
        let forecast: ForecastResponse = serde_json::from_value(serde_json::json!({
            "current": {
                "temperature_2m": 21.3,
                "relative_humidity_2m": 55,
                "apparent_temperature": 20.1,
                "precipitation": null,
                "weather_code": 2,
                "wind_speed_10m": 10.0
            },
            "daily": {
                "weather_code": [2],
                "temperature_2m_max": [25.0],
                "temperature_2m_min": [15.0],
                "precipitation_sum": [null]
            }
        }))
        .unwrap();

        let record = build_record(&beijing(), forecast).unwrap();
        assert_eq!(record.today.precipitation, None);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["current"]["humidity"], serde_json::json!(55));
        assert!(json["today"]["precipitation"].is_null());
    }

    #[test]
    fn test_aggregate_counts() {
        let aggregate = Aggregate {
            records: vec![build_record(&beijing(), sample_forecast()).unwrap()],
            requested: 3,
        };
        assert!(!aggregate.is_empty());
        assert_eq!(aggregate.failed(), 2);
        assert!(Aggregate::default().is_empty());

        let overfilled = Aggregate {
            records: vec![build_record(&beijing(), sample_forecast()).unwrap()],
            requested: 0,
        };
        assert_eq!(overfilled.failed(), 0);
    }
}
