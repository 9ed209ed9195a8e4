use actix_web::HttpResponse;

use crate::{error::Error, models::request::ErrorResponse};

pub mod config;
pub mod greenhouses;
pub mod output;
pub mod simulation;

/// Maps a domain error to its HTTP response with an `{"error": ...}` body.
pub(crate) fn error_response(err: &Error) -> HttpResponse {
    let body = ErrorResponse {
        error: err.to_string(),
    };
    match err {
        Error::NotFound { .. } => HttpResponse::NotFound().json(body),
        Error::Configuration(_) => HttpResponse::BadRequest().json(body),
        Error::LimitExceeded { .. } => HttpResponse::UnprocessableEntity().json(body),
    }
}

pub(crate) fn plan_path(greenhouse: usize, plan: usize) -> String {
    format!("/api/greenhouses/{greenhouse}/plans/{plan}")
}
