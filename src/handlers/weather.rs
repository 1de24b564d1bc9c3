//! Weather endpoint handler.

use crate::{
    handlers::AppState,
    middleware::RequestId,
    models::{ErrorResponse, WeatherApiResponse},
};
use actix_web::{Error, HttpRequest, HttpResponse, Result};
use chrono::{SecondsFormat, Utc};
use paperclip::actix::{api_v2_operation, web};

/// Live weather for every configured city
///
/// Fetches all cities on every call. Cities that fail are left out; if none
/// succeed the response is a server error.
#[api_v2_operation(
    summary = "Weather Data Endpoint",
    description = "Fetches current conditions and today's forecast for all configured cities. Cities that cannot be fetched are omitted from the data array.",
    tags("Weather"),
    responses(
        (status = 200, description = "Successful response"),
        (status = 500, description = "No weather data could be retrieved", body = ErrorResponse)
    )
)]
pub async fn weather(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, Error> {
    let request_id = RequestId::of(&req).unwrap_or_default();
    tracing::info!(
        request_id = %request_id,
        cities = state.cities.len(),
        "API request: fetching weather data"
    );

    let aggregate = state.weather.fetch_all(&state.cities).await;
    if aggregate.is_empty() {
        tracing::error!(
            request_id = %request_id,
            requested = aggregate.requested,
            "API request returned no weather data"
        );
        return Ok(HttpResponse::InternalServerError()
            .json(ErrorResponse::new("无法获取天气数据 Unable to fetch weather data")));
    }

    Ok(HttpResponse::Ok().json(WeatherApiResponse {
        success: true,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        data: aggregate.records,
    }))
}
