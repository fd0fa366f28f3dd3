//! market_hours.rs
//!
//! Is an exchange in session right now, and if not, how many minutes until it opens?
//!
//! Everything here is pure: the caller supplies "now", so the same instant and schedule
//! always give the same answer.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use crate::error::TimeCalculationError;
use crate::exchange::ExchangeSchedule;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Result of one session lookup. `minutes_until_open` only exists while closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Open,
    Closed { minutes_until_open: u64 },
    /// the calculation failed; the page shows a fallback label instead
    Unknown,
}

impl SessionStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, SessionStatus::Open)
    }

    pub fn minutes_until_open(&self) -> Option<u64> {
        match self {
            SessionStatus::Closed { minutes_until_open } => Some(*minutes_until_open),
            _ => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, SessionStatus::Unknown)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionStatus::Open => "open",
            SessionStatus::Closed { .. } => "closed",
            SessionStatus::Unknown => "unknown",
        }
    }

    /// text for the countdown panel
    pub fn label(&self) -> String {
        match self {
            SessionStatus::Open => "Open".to_string(),
            SessionStatus::Closed { minutes_until_open } => format_minutes(i64::try_from(*minutes_until_open).unwrap_or(i64::MAX)),
            SessionStatus::Unknown => "Error".to_string(),
        }
    }
}

/// "Now" for anything not in the future, otherwise "HH:MM" or "Dd HH:MM"
pub fn format_minutes(minutes: i64) -> String {
    if minutes <= 0 {
        return "Now".to_string();
    }
    let days = minutes / MINUTES_PER_DAY;
    let hours = (minutes % MINUTES_PER_DAY) / 60;
    let mins = minutes % 60;
    if days > 0 {
        format!("{}d {:02}:{:02}", days, hours, mins)
    } else {
        format!("{:02}:{:02}", hours, mins)
    }
}

/// whole minutes from `now` until `then`, floored and never negative
pub fn minutes_between(now: &DateTime<Utc>, then: &DateTime<Utc>) -> u64 {
    let minutes = then.signed_duration_since(*now).num_minutes().max(0);
    u64::try_from(minutes).unwrap_or_default()
}

pub struct MarketHours {}

impl MarketHours {
    /// Session status of `schedule` at `now`. Never fails: a calculation error is logged and
    /// reported as `SessionStatus::Unknown` so a render cycle can always finish.
    pub fn status<Z: TimeZone>(schedule: &ExchangeSchedule, now: &DateTime<Z>) -> SessionStatus {
        match MarketHours::try_status(schedule, now) {
            Ok(status) => status,
            Err(e) => {
                tracing::error!("[status] session calculation failed for {}: {}", &schedule.id, &e);
                SessionStatus::Unknown
            }
        }
    }

    pub fn try_status<Z: TimeZone>(schedule: &ExchangeSchedule, now: &DateTime<Z>) -> Result<SessionStatus, TimeCalculationError> {
        let tz = schedule.tz()?;
        if schedule.trading_days.is_empty() {
            return Err(TimeCalculationError::NoTradingDays(schedule.id.clone()));
        }

        let now = now.with_timezone(&Utc);
        let local = now.with_timezone(&tz);
        let today = local.date_naive();

        if !schedule.is_trading_day(today.weekday()) {
            let next_open = MarketHours::next_open_after(schedule, &tz, today)?;
            return Ok(SessionStatus::Closed { minutes_until_open: minutes_between(&now, &next_open) });
        }

        if schedule.crosses_midnight() {
            // open on both sides of midnight; only the gap between close and open is closed
            let time_of_day = local.time();
            if time_of_day >= schedule.open || time_of_day <= schedule.close {
                return Ok(SessionStatus::Open);
            }
            let open_today = local_instant(&tz, today, schedule.open)?;
            return Ok(SessionStatus::Closed { minutes_until_open: minutes_between(&now, &open_today) });
        }

        let open_today = local_instant(&tz, today, schedule.open)?;
        let close_today = local_instant(&tz, today, schedule.close)?;

        if now < open_today {
            Ok(SessionStatus::Closed { minutes_until_open: minutes_between(&now, &open_today) })
        } else if now <= close_today {
            Ok(SessionStatus::Open)
        } else {
            let next_open = MarketHours::next_open_after(schedule, &tz, today)?;
            Ok(SessionStatus::Closed { minutes_until_open: minutes_between(&now, &next_open) })
        }
    }

    /// open instant of the first trading day strictly after `date`
    pub fn next_open_after(schedule: &ExchangeSchedule, tz: &Tz, date: NaiveDate) -> Result<DateTime<Utc>, TimeCalculationError> {
        let mut day = date;
        for _ in 0..7 {
            day = day.succ_opt().ok_or(TimeCalculationError::Overflow)?;
            if schedule.is_trading_day(day.weekday()) {
                return local_instant(tz, day, schedule.open);
            }
        }
        Err(TimeCalculationError::NoTradingDays(schedule.id.clone()))
    }
}

/// Pin a wall-clock time on a date in `tz` to a UTC instant.
/// Ambiguous times (autumn fall-back) take the earlier instant. Times inside a spring-forward
/// gap move one hour later, which is where the wall clock lands.
fn local_instant(tz: &Tz, date: NaiveDate, time: NaiveTime) -> Result<DateTime<Utc>, TimeCalculationError> {
    let naive = date.and_time(time);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(t) => Ok(t.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => {
            let shifted = naive.checked_add_signed(Duration::hours(1)).ok_or(TimeCalculationError::Overflow)?;
            tz.from_local_datetime(&shifted)
                .earliest()
                .map(|t| t.with_timezone(&Utc))
                .ok_or(TimeCalculationError::NonexistentLocalTime)
        }
    }
}
