use std::collections::HashMap;

use actix_web::{get, http::Method, web, HttpResponse, Responder};

use crate::{
    api::{
        handlers::{error_response, plan_path},
        state::AppState,
    },
    models::request::{
        link, ErrorResponse, GreenhouseListResponse, GreenhouseSummary, Pagination,
        PaginatedResponse,
    },
};

/// GET /api/greenhouses
/// Lists the loaded greenhouses with their plans.
#[utoipa::path(
    get,
    path = "/api/greenhouses",
    tag = "greenhouses",
    responses(
        (status = 200, description = "Loaded greenhouses", body = GreenhouseListResponse),
        (status = 404, description = "No configuration loaded", body = ErrorResponse),
    )
)]
#[get("/greenhouses")]
pub async fn list_greenhouses(state: web::Data<AppState>) -> impl Responder {
    let configuration = match state.current() {
        Ok(configuration) => configuration,
        Err(e) => return error_response(&e),
    };

    let items: Vec<GreenhouseSummary> = configuration
        .greenhouses
        .iter()
        .enumerate()
        .map(|(index, greenhouse)| GreenhouseSummary::new(index, greenhouse))
        .collect();
    let total = items.len();

    let mut links = HashMap::new();
    links.insert("self".into(), link("/api/greenhouses", Method::GET));
    for (index, greenhouse) in items.iter().enumerate() {
        for plan in &greenhouse.plans {
            links.insert(
                format!("simulate:{index}:{}", plan.index),
                link(
                    format!("{}/simulation", plan_path(index, plan.index)),
                    Method::GET,
                ),
            );
        }
    }
    HttpResponse::Ok().json(PaginatedResponse::new(
        items,
        links,
        Pagination {
            page: 1,
            per_page: total,
            total,
            total_pages: 1,
        },
    ))
}
