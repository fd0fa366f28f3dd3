//! web_server.rs

use std::str::FromStr;
use std::sync::Mutex;
use actix_web::{web, App, HttpServer};
use chrono::{DateTime, Duration, TimeZone};
use handlebars::{Handlebars, TemplateError};
use common_lib::common_structs::ConfigLocation;
use common_lib::dashboard::{self, DashboardEntry, SessionReport};
use common_lib::economic_calendar::EconomicCalendar;
use common_lib::exchange::{ExchangeSchedule, ExchangeTable};
use common_lib::session_cache::SessionCache;
use crate::configuration::Settings;
use crate::dashboard::get_dashboard;
use crate::sessions::{get_session, get_sessions};
use crate::utils::get_ping;

/// shared by every worker; built once at startup
pub struct AppState {
    pub exchanges: ExchangeTable,
    pub calendar: EconomicCalendar,
    pub cache: Mutex<SessionCache>,
}

impl AppState {
    pub fn new(exchanges: ExchangeTable, calendar: EconomicCalendar, cache_window: Duration) -> Self {
        AppState {
            exchanges,
            calendar,
            cache: Mutex::new(SessionCache::new(cache_window)),
        }
    }

    /// run `f` against the shared cache; a poisoned lock gets a throwaway cache instead
    fn with_cache<R>(&self, f: impl FnOnce(&mut SessionCache) -> R) -> R {
        match self.cache.lock() {
            Ok(mut cache) => f(&mut *cache),
            Err(e) => {
                tracing::warn!("[with_cache] session cache lock poisoned, computing without it: {:?}", &e);
                f(&mut SessionCache::new(Duration::zero()))
            }
        }
    }

    pub fn session_entries<Z: TimeZone>(&self, now: &DateTime<Z>) -> Vec<DashboardEntry> {
        self.with_cache(|cache| dashboard::session_entries(&self.exchanges, cache, now))
    }

    pub fn session_reports<Z: TimeZone>(&self, now: &DateTime<Z>) -> Vec<SessionReport> {
        self.with_cache(|cache| dashboard::session_reports(&self.exchanges, cache, now))
    }

    pub fn session_report<Z: TimeZone>(&self, schedule: &ExchangeSchedule, now: &DateTime<Z>) -> SessionReport {
        self.with_cache(|cache| SessionReport::new(schedule, cache.status(schedule, now)))
    }

    pub fn event_entries<Z: TimeZone>(&self, now: &DateTime<Z>) -> Vec<DashboardEntry> {
        dashboard::event_entries(&self.calendar, now)
    }
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            exchanges: ExchangeTable::default(),
            calendar: EconomicCalendar::default(),
            cache: Mutex::new(SessionCache::default()),
        }
    }
}

/// handlebars templates from a directory; ".html" files are registered by file stem
pub fn register_templates(template_dir: &str) -> Result<Handlebars<'static>, TemplateError> {
    let mut handlebars = Handlebars::new();
    handlebars.register_templates_directory(".html", template_dir)?;
    Ok(handlebars)
}

pub fn template_dir() -> String {
    let config_location = ConfigLocation::from_str(&std::env::var("CONFIG_LOCATION").unwrap_or_else(|_| "not_docker".to_owned()))
        .unwrap_or(ConfigLocation::NotDocker);
    match config_location {
        ConfigLocation::Docker => "./static/templates".to_string(),
        ConfigLocation::NotDocker => format!("{}/static/templates", env!("CARGO_MANIFEST_DIR")),
    }
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(get_dashboard))
        .route("/ping", web::get().to(get_ping))
        .route("/sessions", web::get().to(get_sessions))
        .route("/sessions/{exchange}", web::get().to(get_session));
}

pub struct WebServer {}
impl WebServer {
    pub async fn run(settings: Settings) -> std::io::Result<()> {
        let exchanges = settings
            .exchange_table()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        tracing::info!("[run] {} exchanges configured", exchanges.len());
        let state = web::Data::new(AppState::new(exchanges, settings.economic_calendar(), settings.cache_window()));

        let handlebar_static_path = template_dir();
        tracing::debug!("[run] registering handlebars static files from: {}", &handlebar_static_path);
        let handlebars = register_templates(&handlebar_static_path)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;
        let handlebars_ref = web::Data::new(handlebars);

        let web_port = settings.application_port;
        tracing::info!("[run] web server starting on port: {}", &web_port);

        HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .app_data(handlebars_ref.clone())
                .configure(routes)
        })
        .bind(("0.0.0.0", web_port))?
        .workers(2)
        .run()
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::NaiveTime;
    use chrono_tz::America::New_York;
    use common_lib::exchange::WEEKDAYS;
    use serde_json::Value;

    fn test_templates() -> web::Data<Handlebars<'static>> {
        let dir = format!("{}/static/templates", env!("CARGO_MANIFEST_DIR"));
        web::Data::new(register_templates(&dir).unwrap())
    }

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState::default()))
                    .app_data(test_templates())
                    .configure(routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn ping() {
        let app = test_app!();
        let body = test::call_and_read_body(&app, test::TestRequest::get().uri("/ping").to_request()).await;
        assert_eq!(body, web::Bytes::from_static(b"pong"));
    }

    #[actix_web::test]
    async fn dashboard_page_renders() {
        let app = test_app!();
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("cache-control").unwrap(), "no-store");

        let body = test::read_body(resp).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        for needle in ["Squeeze Data", "Red Squeeze", "Fundamental Analysis", "Upcoming Earnings Date", "Date Until", "FOMC", "London", "NVDA"] {
            assert!(html.contains(needle), "missing {}", needle);
        }
    }

    #[actix_web::test]
    async fn dashboard_echoes_cleaned_inputs() {
        let app = test_app!();
        let req = test::TestRequest::get().uri("/?symbol=aapl&timeframe=4h&months_back=abc").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("AAPL"));
        assert!(html.contains(r#"value="12""#));
    }

    #[actix_web::test]
    async fn sessions_json() {
        let app = test_app!();
        let resp = test::call_service(&app, test::TestRequest::get().uri("/sessions").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("cache-control").unwrap(), "no-store");

        let reports: Value = test::read_body_json(resp).await;
        let names: Vec<&str> = reports.as_array().unwrap().iter().map(|r| r["exchange"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["NY", "London", "Asian"]);
        for report in reports.as_array().unwrap() {
            // minutes only while closed
            assert_eq!(report["is_open"].as_bool().unwrap(), report["minutes_until_open"].is_null());
        }
    }

    #[actix_web::test]
    async fn single_session_lookup() {
        let app = test_app!();
        let resp = test::call_service(&app, test::TestRequest::get().uri("/sessions/london").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("cache-control").unwrap(), "no-store");
        let report: Value = test::read_body_json(resp).await;
        assert_eq!(report["exchange"], "London");

        let resp = test::call_service(&app, test::TestRequest::get().uri("/sessions/NOPE").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers().get("cache-control").unwrap(), "no-store");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "unknown exchange: NOPE");
    }

    /// Monday 2024-01-08 09:00 New York: NY opens in 30 minutes, London is open, Tokyo opens in 10 hours
    fn monday_morning() -> DateTime<chrono_tz::Tz> {
        New_York.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).unwrap()
    }

    #[::core::prelude::v1::test]
    fn poisoned_cache_still_reports_sessions() {
        let state = AppState::default();
        std::thread::scope(|s| {
            let _ = s
                .spawn(|| {
                    let _cache = state.cache.lock().unwrap();
                    panic!("worker died holding the session cache");
                })
                .join();
        });
        assert!(state.cache.is_poisoned());

        let reports = state.session_reports(&monday_morning());
        let statuses: Vec<(&str, &str, Option<u64>)> = reports
            .iter()
            .map(|r| (r.exchange.as_str(), r.status.as_str(), r.minutes_until_open))
            .collect();
        assert_eq!(
            statuses,
            vec![("NY", "closed", Some(30)), ("London", "open", None), ("Asian", "closed", Some(600))]
        );
        assert_eq!(state.session_entries(&monday_morning())[1].v, "Open");
    }

    #[::core::prelude::v1::test]
    fn outside_schedule_sharing_an_id_gets_its_own_status() {
        let state = AppState::default();
        let now = monday_morning();
        assert_eq!(state.session_reports(&now)[0].minutes_until_open, Some(30));

        let tokyo_ny = ExchangeSchedule::new(
            "NY",
            "Asia/Tokyo",
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            &WEEKDAYS,
        );
        let report = state.session_report(&tokyo_ny, &now);
        assert_eq!(report.exchange, "NY");
        assert_eq!(report.minutes_until_open, Some(600));
        // the table's NY entry is untouched
        assert_eq!(state.session_reports(&now)[0].minutes_until_open, Some(30));
    }
}
