//! Shared handler state, OpenAPI specification and app factory.

use crate::{
    config::{City, CorsConfig},
    handlers::{cities, get_metrics, health, index, weather},
    middleware::{CorsHeaders, MetricsMiddleware, RequestIdMiddleware},
    services::{AppMetrics, WeatherClient},
};
use actix_web::App;
use paperclip::actix::{OpenApiExt, web};
use paperclip::v2::models::{DefaultApiRaw, Info};
use std::time::Instant;

/// Immutable state shared by every handler
pub struct AppState {
    pub cities: Vec<City>,
    pub weather: WeatherClient,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(cities: Vec<City>, weather: WeatherClient) -> Self {
        Self {
            cities,
            weather,
            started_at: Instant::now(),
        }
    }
}

/// Creates the OpenAPI specification for the query API
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Weather Reminder API".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Read-only access to live weather for the configured cities.\n\n\
                - `GET /api/weather`: current conditions and today's forecast per city\n\
                - `GET /api/cities`: configured city names\n\
                - `GET /api/health`: service status and uptime\n\
                \n\
                Data is fetched from the Open-Meteo API on every request; nothing is cached."
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Creates the query app
///
/// Registers the landing page, the weather, cities and health endpoints, the
/// metrics endpoint, and the OpenAPI document at `/api/spec/v2`. Pass `None`
/// for `metrics` to disable collection; `/api/metrics` then answers 503.
pub fn create_app(
    state: web::Data<AppState>,
    metrics: Option<AppMetrics>,
    cors: CorsConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .wrap(CorsHeaders::new(cors))
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware)
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(state);

    let app = match metrics {
        Some(metrics) => app.app_data(web::Data::new(metrics)),
        None => app,
    };

    app.service(web::resource("/").route(web::get().to(index)))
        .service(web::resource("/api/weather").route(web::get().to(weather)))
        .service(web::resource("/api/cities").route(web::get().to(cities)))
        .service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/metrics").route(web::get().to(get_metrics)))
        .with_json_spec_at("/api/spec/v2")
        .build()
}
