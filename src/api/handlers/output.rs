use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;

use crate::{
    api::{handlers::error_response, state::AppState},
    logic::output::build_output,
    models::{output::OutputDocument, request::ErrorResponse},
};

/// GET /api/output
/// Simulates every plan of every loaded greenhouse and returns the aggregate document.
#[utoipa::path(
    get,
    path = "/api/output",
    tag = "output",
    responses(
        (status = 200, description = "Aggregated results", body = OutputDocument),
        (status = 404, description = "No configuration loaded", body = ErrorResponse),
    )
)]
#[get("/output")]
pub async fn get_output(state: web::Data<AppState>) -> impl Responder {
    let document = state
        .current()
        .and_then(|configuration| build_output(&configuration, Utc::now()));
    match document {
        Ok(document) => HttpResponse::Ok().json(document),
        Err(e) => error_response(&e),
    }
}
