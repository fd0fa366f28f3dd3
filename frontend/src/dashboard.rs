//! dashboard.rs
//!
//! the single dashboard page: input row, "Date Until" panel, placeholder tables

use actix_web::{web, HttpResponse};
use chrono::{DateTime, TimeZone, Utc};
use handlebars::Handlebars;
use serde::Deserialize;
use serde_json::json;
use common_lib::common_structs::{DashboardInputs, Timeframe, MAX_MONTHS_BACK, MIN_MONTHS_BACK};
use common_lib::placeholder::PlaceholderTable;
use crate::web_server::AppState;

/// all optional; the form submits them back as GET parameters
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub symbol: Option<String>,
    pub timeframe: Option<String>,
    // kept as text so a bad number falls back to the default instead of a 400
    pub months_back: Option<String>,
}

impl DashboardQuery {
    pub fn inputs(&self) -> DashboardInputs {
        let months_back = self.months_back.as_deref().and_then(|m| m.trim().parse::<i64>().ok());
        DashboardInputs::from_query(self.symbol.as_deref(), self.timeframe.as_deref(), months_back)
    }
}

/// GET /
pub async fn get_dashboard(query: web::Query<DashboardQuery>, state: web::Data<AppState>, hb: web::Data<Handlebars<'_>>) -> HttpResponse {
    tracing::debug!("[get_dashboard] {:?}", &query);
    render_dashboard(&query.into_inner(), &state, &hb, &Utc::now())
}

/// render the page for a given instant
pub fn render_dashboard<Z: TimeZone>(query: &DashboardQuery, state: &AppState, hb: &Handlebars<'_>, now: &DateTime<Z>) -> HttpResponse {
    let inputs = query.inputs();
    let data = json!({
        "title": "Stock Fundamentals Dashboard",
        "parent": "base0",
        "timeframes": Timeframe::options(inputs.timeframe),
        "inputs": inputs,
        "min_months_back": MIN_MONTHS_BACK,
        "max_months_back": MAX_MONTHS_BACK,
        "events": state.event_entries(now),
        "sessions": state.session_entries(now),
        "tables": PlaceholderTable::all(),
    });

    match hb.render("dashboard", &data) {
        Ok(body) => HttpResponse::Ok().append_header(("Cache-Control", "no-store")).body(body),
        Err(e) => {
            tracing::error!("[render_dashboard] template error: {:?}", &e);
            HttpResponse::InternalServerError().append_header(("Cache-Control", "no-store")).body("dashboard unavailable")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use chrono::NaiveTime;
    use chrono_tz::America::New_York;
    use common_lib::exchange::{ExchangeSchedule, WEEKDAYS};
    use crate::web_server::register_templates;

    fn templates() -> Handlebars<'static> {
        register_templates(&format!("{}/static/templates", env!("CARGO_MANIFEST_DIR"))).unwrap()
    }

    async fn body_of(resp: HttpResponse) -> String {
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn query_falls_back_to_defaults() {
        let query = DashboardQuery { months_back: Some(" 24 ".to_string()), ..Default::default() };
        let inputs = query.inputs();
        assert_eq!(inputs.symbol, "NVDA");
        assert_eq!(inputs.months_back, 24);
        assert_eq!(DashboardQuery { months_back: Some("x".to_string()), ..Default::default() }.inputs().months_back, 12);
    }

    #[actix_web::test]
    async fn frozen_instant_shows_countdowns() {
        let state = AppState::default();
        // Monday 2024-01-08 09:00 New York: NY opens in 30 minutes
        let now = New_York.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).unwrap();
        let resp = render_dashboard(&DashboardQuery::default(), &state, &templates(), &now);
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_of(resp).await;
        assert!(html.contains("00:30"));
        assert!(html.contains("Empty"));
    }

    #[test]
    fn broken_exchange_reports_error_label() {
        let bad = ExchangeSchedule::new("BAD", "Nowhere/Nope", NaiveTime::from_hms_opt(9, 0, 0).unwrap(), NaiveTime::from_hms_opt(17, 0, 0).unwrap(), &WEEKDAYS);
        let now = New_York.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).unwrap();
        let report = AppState::default().session_report(&bad, &now);
        assert_eq!(report.label, "Error");
        assert_eq!(report.status, "unknown");
        assert!(!report.is_open);
    }

    #[actix_web::test]
    async fn missing_template_is_a_500() {
        let resp = render_dashboard(&DashboardQuery::default(), &AppState::default(), &Handlebars::new(), &Utc::now());
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
