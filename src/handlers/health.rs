//! Health check endpoint handler.

use crate::{handlers::AppState, models::HealthResponse};
use actix_web::{Error, Result};
use chrono::{SecondsFormat, Utc};
use paperclip::actix::{api_v2_operation, web};

/// Health check endpoint
///
/// Returns a fixed running status together with the process uptime. This
/// endpoint can be used by load balancers and health check probes.
#[api_v2_operation(
    summary = "Health Check Endpoint",
    description = "Returns the service status, uptime in seconds and the current time.",
    tags("Health"),
    responses(
        (status = 200, description = "Successful response", body = HealthResponse)
    )
)]
pub async fn health(state: web::Data<AppState>) -> Result<web::Json<HealthResponse>, Error> {
    Ok(web::Json(HealthResponse {
        success: true,
        status: "running".to_string(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
