//! utils.rs

use actix_web::{HttpResponse, Responder};

/// say "pong"
pub async fn get_ping() -> impl Responder {
    tracing::debug!("[get_ping]");
    HttpResponse::Ok().body("pong")
}
