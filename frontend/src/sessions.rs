//! sessions.rs
//!
//! JSON view of the session clock

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde_json::json;
use crate::web_server::AppState;

/// GET /sessions
pub async fn get_sessions(state: web::Data<AppState>) -> HttpResponse {
    let reports = state.session_reports(&Utc::now());
    HttpResponse::Ok().append_header(("Cache-Control", "no-store")).json(reports)
}

/// GET /sessions/{exchange}
pub async fn get_session(exchange: web::Path<String>, state: web::Data<AppState>) -> HttpResponse {
    let exchange = exchange.into_inner();
    match state.exchanges.get(&exchange) {
        Some(schedule) => {
            let report = state.session_report(schedule, &Utc::now());
            HttpResponse::Ok().append_header(("Cache-Control", "no-store")).json(report)
        }
        None => {
            tracing::debug!("[get_session] unknown exchange: {}", &exchange);
            HttpResponse::NotFound()
                .append_header(("Cache-Control", "no-store"))
                .json(json!({ "error": format!("unknown exchange: {}", exchange) }))
        }
    }
}
