use actix_web::{error::InternalError, web, HttpResponse};
use serde_json::json;

use crate::api::handlers::{
    config::post_config,
    greenhouses::list_greenhouses,
    output::get_output,
    simulation::{get_simulation, get_tick},
};

/// Largest configuration document accepted by `POST /api/config`.
pub const JSON_LIMIT: usize = 4 * 1024 * 1024;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(post_config)
            .service(list_greenhouses)
            .service(get_simulation)
            .service(get_tick)
            .service(get_output),
    );
}

/// JSON extractor settings: malformed bodies become a 400 with an `{"error": ...}` body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _req| {
            let message = format!("JSON deserialization error: {err}");
            InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(json!({ "error": message })),
            )
            .into()
        })
}
