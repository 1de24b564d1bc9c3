//! Configured cities endpoint handler.

use crate::{
    handlers::AppState,
    models::{CitiesResponse, CityName},
};
use actix_web::{Error, Result};
use paperclip::actix::{api_v2_operation, web};

/// Configured cities, names only
#[api_v2_operation(
    summary = "City List Endpoint",
    description = "Returns the configured cities as local/English name pairs, without coordinates.",
    tags("Cities"),
    responses(
        (status = 200, description = "Successful response", body = CitiesResponse)
    )
)]
pub async fn cities(state: web::Data<AppState>) -> Result<web::Json<CitiesResponse>, Error> {
    let cities = state
        .cities
        .iter()
        .map(|city| CityName {
            name: city.name.clone(),
            name_en: city.name_en.clone(),
        })
        .collect();

    Ok(web::Json(CitiesResponse {
        success: true,
        cities,
    }))
}
