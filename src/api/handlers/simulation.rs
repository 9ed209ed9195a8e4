use std::collections::HashMap;

use actix_web::{get, http::Method, web, HttpResponse, Responder};

use crate::{
    api::{
        handlers::{error_response, plan_path},
        state::AppState,
    },
    logic::simulator::SimulationRun,
    models::request::{
        link, ApiResponse, ErrorResponse, SimulationApiResponse, SimulationResponse,
        TickApiResponse, TickResponse,
    },
    Result,
};

fn run_plan(state: &AppState, greenhouse: usize, plan: usize) -> Result<SimulationRun> {
    state.current()?.simulate(greenhouse, plan)
}

/// GET /api/greenhouses/{greenhouse}/plans/{plan}/simulation
/// Simulates a plan and returns totals plus the per-tick action table.
/// A run cut short by the tick ceiling is reported in `status` and `errors`.
#[utoipa::path(
    get,
    path = "/api/greenhouses/{greenhouse}/plans/{plan}/simulation",
    tag = "simulation",
    params(
        ("greenhouse" = usize, Path, description = "Zero-based greenhouse index"),
        ("plan" = usize, Path, description = "Zero-based plan index within the greenhouse"),
    ),
    responses(
        (status = 200, description = "Simulation result", body = SimulationApiResponse),
        (status = 404, description = "Unknown greenhouse or plan", body = ErrorResponse),
    )
)]
#[get("/greenhouses/{greenhouse}/plans/{plan}/simulation")]
pub async fn get_simulation(
    state: web::Data<AppState>,
    path: web::Path<(usize, usize)>,
) -> impl Responder {
    let (greenhouse, plan) = path.into_inner();
    let run = match run_plan(&state, greenhouse, plan) {
        Ok(run) => run,
        Err(e) => return error_response(&e),
    };

    let base = plan_path(greenhouse, plan);
    let mut links = HashMap::new();
    links.insert("self".into(), link(format!("{base}/simulation"), Method::GET));
    if let Some(first) = run.ticks.first() {
        links.insert(
            "firstTick".into(),
            link(format!("{base}/simulation/ticks/{}", first.tick), Method::GET),
        );
    }
    links.insert("greenhouses".into(), link("/api/greenhouses", Method::GET));

    let mut response = ApiResponse::new(SimulationResponse::from(&run), links);
    if let Err(e) = run.total_time() {
        response.errors.push(e.to_string());
    }
    HttpResponse::Ok().json(response)
}

/// GET /api/greenhouses/{greenhouse}/plans/{plan}/simulation/ticks/{tick}
/// Returns every drone's position, status and action at one tick.
#[utoipa::path(
    get,
    path = "/api/greenhouses/{greenhouse}/plans/{plan}/simulation/ticks/{tick}",
    tag = "simulation",
    params(
        ("greenhouse" = usize, Path, description = "Zero-based greenhouse index"),
        ("plan" = usize, Path, description = "Zero-based plan index within the greenhouse"),
        ("tick" = u32, Path, description = "Tick number, starting at 1"),
    ),
    responses(
        (status = 200, description = "Drone states at the tick", body = TickApiResponse),
        (status = 404, description = "Unknown greenhouse, plan or tick", body = ErrorResponse),
    )
)]
#[get("/greenhouses/{greenhouse}/plans/{plan}/simulation/ticks/{tick}")]
pub async fn get_tick(
    state: web::Data<AppState>,
    path: web::Path<(usize, usize, u32)>,
) -> impl Responder {
    let (greenhouse, plan, tick) = path.into_inner();
    let run = match run_plan(&state, greenhouse, plan) {
        Ok(run) => run,
        Err(e) => return error_response(&e),
    };
    let record = match run.tick(tick) {
        Ok(record) => record,
        Err(e) => return error_response(&e),
    };

    let base = plan_path(greenhouse, plan);
    let mut links = HashMap::new();
    links.insert(
        "self".into(),
        link(format!("{base}/simulation/ticks/{tick}"), Method::GET),
    );
    links.insert(
        "simulation".into(),
        link(format!("{base}/simulation"), Method::GET),
    );
    if run.tick(tick + 1).is_ok() {
        links.insert(
            "next".into(),
            link(format!("{base}/simulation/ticks/{}", tick + 1), Method::GET),
        );
    }
    HttpResponse::Ok().json(ApiResponse::new(TickResponse::from(record), links))
}
