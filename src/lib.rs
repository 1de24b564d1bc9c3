//! Weather Reminder - scheduled multi-city weather reports and a small query API
//!
//! Fetches current conditions and today's forecast for a configured set of
//! cities from the Open-Meteo API, formats a bilingual (Chinese/English)
//! report, and optionally delivers it to the console or a webhook on a cron
//! schedule. The same data is served over a read-only HTTP API.
//!
//! ## Architecture
//!
//! - `config/` - Configuration file and environment settings
//! - `models/` - Weather records and API response models
//! - `services/` - Weather client, report formatter, notifier, task and scheduler
//! - `handlers/` - HTTP request handlers and the app factory
//! - `middleware/` - Request ID, metrics and CORS middleware
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use weather_reminder::{AppConfig, Notifier, ProviderConfig, Scheduler, WeatherClient, WeatherTask};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load("config.json")?;
//!     let client = WeatherClient::new(ProviderConfig::from_env())?;
//!     let notifier = Notifier::new(&config.notification)?;
//!     let task = Arc::new(WeatherTask::new(client, config.cities.clone(), notifier));
//!     Scheduler::new(task, config.schedule.clone()).start()?;
//!     weather_reminder::shutdown::shutdown_signal().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod services;
pub mod shutdown;

pub use config::{
    AppConfig, City, ConfigError, CorsConfig, NotificationConfig, NotificationMethod,
    ProviderConfig, ScheduleConfig, ServerConfig,
};
pub use handlers::{AppState, cities, create_app, create_openapi_spec, get_metrics, health, index, weather};
pub use middleware::{CorsHeaders, MetricsMiddleware, RequestIdMiddleware};
pub use models::{
    CitiesResponse, CityName, CityWeatherRecord, CurrentConditions, Descriptor, ErrorResponse,
    HealthResponse, TodayForecast, WeatherApiResponse,
};
pub use services::{
    Aggregate, AppMetrics, Notifier, NotifyError, ReportNotifier, ScheduledJob, Scheduler,
    SchedulerError, SchedulerState, TaskOutcome, WeatherClient, WeatherError, WeatherTask,
    describe, format_report, format_report_at,
};
