//! common_structs.rs

use std::str::FromStr;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

pub const DEFAULT_SYMBOL: &str = "NVDA";
pub const DEFAULT_MONTHS_BACK: u32 = 12;
pub const MIN_MONTHS_BACK: u32 = 1;
pub const MAX_MONTHS_BACK: u32 = 60;

#[derive(Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ConfigLocation{
    Docker,
    NotDocker,
}

/// chart timeframe picker; the strings are what the page shows and what the query string carries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize)]
pub enum Timeframe {
    #[strum(serialize = "30m")]
    #[serde(rename = "30m")]
    Min30,
    #[strum(serialize = "1h")]
    #[serde(rename = "1h")]
    Hour1,
    #[strum(serialize = "4h")]
    #[serde(rename = "4h")]
    Hour4,
    #[strum(serialize = "1D")]
    #[serde(rename = "1D")]
    Day1,
    #[strum(serialize = "1W")]
    #[serde(rename = "1W")]
    Week1,
    #[default]
    #[strum(serialize = "1M")]
    #[serde(rename = "1M")]
    Month1,
    #[strum(serialize = "3M")]
    #[serde(rename = "3M")]
    Month3,
    #[strum(serialize = "6M")]
    #[serde(rename = "6M")]
    Month6,
    #[strum(serialize = "1Y")]
    #[serde(rename = "1Y")]
    Year1,
}

/// one <option> of the timeframe select
#[derive(Debug, Serialize)]
pub struct TimeframeOption {
    pub value: String,
    pub selected: bool,
}

impl Timeframe {
    pub fn options(selected: Timeframe) -> Vec<TimeframeOption> {
        Timeframe::iter()
            .map(|t| TimeframeOption { value: t.to_string(), selected: t == selected })
            .collect()
    }
}

/// The input row at the top of the dashboard. Nothing is computed from these yet; they are
/// cleaned up and echoed back so the form keeps its values between renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardInputs {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub months_back: u32,
}

impl Default for DashboardInputs {
    fn default() -> Self {
        DashboardInputs {
            symbol: DEFAULT_SYMBOL.to_string(),
            timeframe: Timeframe::default(),
            months_back: DEFAULT_MONTHS_BACK,
        }
    }
}

impl DashboardInputs {
    /// never fails: anything unusable falls back to its default
    pub fn from_query(symbol: Option<&str>, timeframe: Option<&str>, months_back: Option<i64>) -> Self {
        let symbol = match symbol.map(|s| s.trim()) {
            Some(s) if !s.is_empty() => s.to_uppercase(),
            _ => DEFAULT_SYMBOL.to_string(),
        };

        let timeframe = match timeframe {
            Some(t) => Timeframe::from_str(t.trim()).unwrap_or_else(|_| {
                tracing::debug!("[from_query] unknown timeframe: {}", t);
                Timeframe::default()
            }),
            None => Timeframe::default(),
        };

        let months_back = match months_back {
            Some(m) => u32::try_from(m.clamp(MIN_MONTHS_BACK as i64, MAX_MONTHS_BACK as i64)).unwrap_or(DEFAULT_MONTHS_BACK),
            None => DEFAULT_MONTHS_BACK,
        };

        DashboardInputs { symbol, timeframe, months_back }
    }
}
