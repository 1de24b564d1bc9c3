//! Landing page handler.

use actix_web::{Error, HttpResponse, Result};
use paperclip::actix::api_v2_operation;

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[api_v2_operation(
    summary = "Landing Page",
    description = "Returns the HTML page that renders the weather dashboard.",
    tags("Pages"),
    responses(
        (status = 200, description = "Successful response", content_type = "text/html")
    )
)]
pub async fn index() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML))
}
