//! Metrics endpoint handler.

use crate::services::AppMetrics;
use actix_web::{Error, HttpRequest, HttpResponse, Result};
use paperclip::actix::{api_v2_operation, web};

/// Prometheus metrics endpoint
///
/// Returns 503 when metrics collection is disabled.
#[api_v2_operation(
    summary = "Prometheus Metrics Endpoint",
    description = "Returns Prometheus-formatted metrics: HTTP requests, per-city fetch outcomes and uptime.",
    tags("Metrics"),
    responses(
        (status = 200, description = "Prometheus metrics in text format", content_type = "text/plain"),
        (status = 503, description = "Metrics collection disabled")
    )
)]
pub async fn get_metrics(req: HttpRequest) -> Result<HttpResponse, Error> {
    let Some(metrics) = req.app_data::<web::Data<AppMetrics>>() else {
        return Ok(HttpResponse::ServiceUnavailable()
            .content_type("text/plain")
            .body("Metrics collection is disabled"));
    };

    match metrics.render() {
        Ok(output) => Ok(HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4; charset=utf-8")
            .body(output)),
        Err(e) => Err(actix_web::error::ErrorInternalServerError(format!(
            "Failed to render metrics: {e}"
        ))),
    }
}
