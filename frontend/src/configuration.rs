//! configuration.rs
//!
//! configuration.yaml, overridable with APP_ prefixed environment variables (APP_APPLICATION_PORT=9000)

use std::str::FromStr;
use chrono::Duration;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use common_lib::common_structs::ConfigLocation;
use common_lib::economic_calendar::{EconomicCalendar, EconomicEvent};
use common_lib::error::TimeCalculationError;
use common_lib::exchange::{ExchangeSchedule, ExchangeTable};
use common_lib::session_cache::DEFAULT_CACHE_WINDOW_SECONDS;

const MAX_CACHE_WINDOW_SECONDS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application_port: u16,
    #[serde(default = "default_cache_window")]
    pub cache_window_seconds: i64,
    /// empty means the built-in NY / London / Asian table
    #[serde(default)]
    pub exchanges: Vec<ExchangeSchedule>,
    #[serde(default)]
    pub economic_events: Vec<EconomicEvent>,
}

fn default_cache_window() -> i64 {
    DEFAULT_CACHE_WINDOW_SECONDS
}

impl Settings {
    pub fn exchange_table(&self) -> Result<ExchangeTable, TimeCalculationError> {
        if self.exchanges.is_empty() {
            Ok(ExchangeTable::default())
        } else {
            ExchangeTable::new(self.exchanges.clone())
        }
    }

    pub fn economic_calendar(&self) -> EconomicCalendar {
        if self.economic_events.is_empty() {
            EconomicCalendar::default()
        } else {
            EconomicCalendar::new(self.economic_events.clone())
        }
    }

    pub fn cache_window(&self) -> Duration {
        Duration::seconds(self.cache_window_seconds.clamp(0, MAX_CACHE_WINDOW_SECONDS))
    }
}

/// CONFIG_LOCATION=docker reads ./configuration.yaml, anything else reads the one next to this crate's Cargo.toml
pub fn get_yaml_configuration() -> Result<Settings, ConfigError> {
    let config_location = ConfigLocation::from_str(&std::env::var("CONFIG_LOCATION").unwrap_or_else(|_| "not_docker".to_owned()))
        .unwrap_or(ConfigLocation::NotDocker);
    let path = match config_location {
        ConfigLocation::Docker => "configuration.yaml".to_string(),
        ConfigLocation::NotDocker => format!("{}/configuration.yaml", env!("CARGO_MANIFEST_DIR")),
    };
    tracing::debug!("[get_yaml_configuration] reading {}", &path);
    build_settings(File::new(&path, FileFormat::Yaml))
}

fn build_settings<S>(source: S) -> Result<Settings, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    Config::builder()
        .set_default("application_port", 8080)?
        .add_source(source)
        // APP_ then the key; "__" only separates nested keys
        .add_source(Environment::with_prefix("APP").prefix_separator("_").separator("__"))
        .build()?
        .try_deserialize::<Settings>()
}
