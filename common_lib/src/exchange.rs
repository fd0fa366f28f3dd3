//! exchange.rs
//!
//! Exchange trading-session definitions and the lookup table built from them at startup.
//! Adding an exchange means adding a row to `configuration.yaml` (or to the default table below).

use chrono::{NaiveTime, Weekday};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize};
use crate::error::TimeCalculationError;

pub const WEEKDAYS: [Weekday; 5] = [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri];

// session hours are local to each exchange; chrono-tz takes care of DST
pub static DEFAULT_EXCHANGES: Lazy<ExchangeTable> = Lazy::new(|| {
    ExchangeTable {
        schedules: vec![
            ExchangeSchedule::new("NY", "America/New_York", NaiveTime::from_hms_opt(9, 30, 0).unwrap(), NaiveTime::from_hms_opt(16, 0, 0).unwrap(), &WEEKDAYS),
            ExchangeSchedule::new("London", "Europe/London", NaiveTime::from_hms_opt(8, 0, 0).unwrap(), NaiveTime::from_hms_opt(16, 30, 0).unwrap(), &WEEKDAYS),
            ExchangeSchedule::new("Asian", "Asia/Tokyo", NaiveTime::from_hms_opt(9, 0, 0).unwrap(), NaiveTime::from_hms_opt(15, 0, 0).unwrap(), &WEEKDAYS),
        ],
    }
});

/// One exchange's regular session, in the exchange's own wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExchangeSchedule {
    pub id: String,
    /// IANA name, e.g. "America/New_York"
    pub timezone: String,
    #[serde(deserialize_with = "deserialize_time")]
    pub open: NaiveTime,
    #[serde(deserialize_with = "deserialize_time")]
    pub close: NaiveTime,
    #[serde(default = "default_trading_days")]
    pub trading_days: Vec<Weekday>,
}

impl ExchangeSchedule {
    pub fn new(id: &str, timezone: &str, open: NaiveTime, close: NaiveTime, trading_days: &[Weekday]) -> Self {
        ExchangeSchedule {
            id: id.to_string(),
            timezone: timezone.to_string(),
            open,
            close,
            trading_days: trading_days.to_vec(),
        }
    }

    /// resolve the IANA name through chrono-tz
    pub fn tz(&self) -> Result<Tz, TimeCalculationError> {
        self.timezone.parse::<Tz>().map_err(|_| TimeCalculationError::UnknownTimezone(self.timezone.clone()))
    }

    pub fn is_trading_day(&self, weekday: Weekday) -> bool {
        self.trading_days.contains(&weekday)
    }

    /// true for sessions like 19:00-01:00 where the close is earlier on the clock than the open
    pub fn crosses_midnight(&self) -> bool {
        self.close < self.open
    }

    pub fn validate(&self) -> Result<(), TimeCalculationError> {
        self.tz()?;
        if self.trading_days.is_empty() {
            return Err(TimeCalculationError::NoTradingDays(self.id.clone()));
        }
        Ok(())
    }
}

fn default_trading_days() -> Vec<Weekday> {
    WEEKDAYS.to_vec()
}

/// accepts "09:30" as well as "09:30:00"
fn deserialize_time<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s.trim(), "%H:%M:%S"))
        .map_err(|e| serde::de::Error::custom(format!("invalid time of day '{}': {}", &s, e)))
}

/// Immutable, ordered set of exchange schedules. Order is display order on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeTable {
    schedules: Vec<ExchangeSchedule>,
}

impl ExchangeTable {
    /// validate every schedule up front so a bad row fails at startup, not at render time
    pub fn new(schedules: Vec<ExchangeSchedule>) -> Result<Self, TimeCalculationError> {
        for (i, schedule) in schedules.iter().enumerate() {
            schedule.validate()?;
            if schedules[..i].iter().any(|s| s.id.eq_ignore_ascii_case(&schedule.id)) {
                return Err(TimeCalculationError::DuplicateExchange(schedule.id.clone()));
            }
        }
        Ok(ExchangeTable { schedules })
    }

    /// case-insensitive lookup by identifier
    pub fn get(&self, id: &str) -> Option<&ExchangeSchedule> {
        self.schedules.iter().find(|s| s.id.eq_ignore_ascii_case(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExchangeSchedule> {
        self.schedules.iter()
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}

impl Default for ExchangeTable {
    fn default() -> Self {
        DEFAULT_EXCHANGES.clone()
    }
}
