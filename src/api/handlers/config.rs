use std::collections::HashMap;

use actix_web::{http::Method, post, web, HttpResponse, Responder};

use crate::{
    api::{handlers::error_response, state::AppState},
    logic::loader::load_document,
    models::{
        document::ConfigDocument,
        request::{link, ApiResponse, ConfigApiResponse, ConfigSummary, ErrorResponse},
    },
};

/// POST /api/config
/// Loads a configuration document, replacing the one currently loaded.
#[utoipa::path(
    post,
    path = "/api/config",
    tag = "config",
    request_body = ConfigDocument,
    responses(
        (status = 200, description = "Configuration loaded", body = ConfigApiResponse),
        (status = 400, description = "Invalid configuration", body = ErrorResponse),
    )
)]
#[post("/config")]
pub async fn post_config(
    state: web::Data<AppState>,
    body: web::Json<ConfigDocument>,
) -> impl Responder {
    let loaded = match load_document(&body.into_inner()) {
        Ok(loaded) => loaded,
        Err(e) => return error_response(&e),
    };

    let configuration = loaded.configuration;
    let summary = ConfigSummary {
        greenhouses: configuration.greenhouses.len(),
        plans: configuration.greenhouses.iter().map(|g| g.plans.len()).sum(),
        drones: configuration.greenhouses.iter().map(|g| g.drones.len()).sum(),
        warnings: loaded.warnings,
    };
    state.replace(configuration);

    let mut links = HashMap::new();
    links.insert("self".into(), link("/api/config", Method::POST));
    links.insert("greenhouses".into(), link("/api/greenhouses", Method::GET));
    links.insert("output".into(), link("/api/output", Method::GET));
    HttpResponse::Ok().json(ApiResponse::new(summary, links))
}
