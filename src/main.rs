use std::path::Path;

use actix_web::{middleware, web, App, HttpServer};
use greenhouse::{
    api::{openapi::ApiDoc, routes, state::AppState},
    logic::loader,
    models::configuration::Configuration,
    settings::Settings,
};
use log::{error, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Reads and loads the configuration file named at startup, if any.
async fn preload(path: &Path) -> Option<Configuration> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) => {
            error!("Cannot read configuration {}: {e}", path.display());
            return None;
        }
    };
    match loader::load_str(&raw) {
        Ok(loaded) => {
            for warning in &loaded.warnings {
                warn!("{warning}");
            }
            info!(
                "Loaded {} greenhouse(s) from {}",
                loaded.configuration.greenhouses.len(),
                path.display()
            );
            Some(loaded.configuration)
        }
        Err(e) => {
            error!("Rejected configuration {}: {e}", path.display());
            None
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let settings = Settings::from_env();
    let initial = match &settings.config_path {
        Some(path) => preload(path).await,
        None => None,
    };
    let state = web::Data::new(AppState::new(initial));

    let bind_addr = settings.bind_addr.clone();
    println!("🌿 Greenhouse API started at http://{bind_addr}");
    println!("   POST /api/config");
    println!("   GET  /api/greenhouses");
    println!("   GET  /api/greenhouses/{{g}}/plans/{{p}}/simulation");
    println!("   GET  /api/greenhouses/{{g}}/plans/{{p}}/simulation/ticks/{{t}}");
    println!("   GET  /api/output");
    println!("   ");
    println!("   📖 Swagger UI → http://{bind_addr}/swagger-ui/");
    println!("   📌 OpenAPI spec → http://{bind_addr}/api-docs/openapi.json");
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .app_data(routes::json_config())
            .configure(routes::configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(bind_addr.as_str())?
    .run()
    .await
}
