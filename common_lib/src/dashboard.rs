//! dashboard containers for frontend display

use chrono::{DateTime, TimeZone};
use serde::Serialize;
use crate::economic_calendar::EconomicCalendar;
use crate::exchange::{ExchangeSchedule, ExchangeTable};
use crate::market_hours::SessionStatus;
use crate::session_cache::SessionCache;

/// one cell of the "Date Until" panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardEntry {
    pub k: String,
    pub v: String,
    /// Some for exchanges whose status is known, None for events and failed lookups
    pub is_open: Option<bool>,
}

/// JSON view of one exchange's session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    pub exchange: String,
    pub status: String,
    pub is_open: bool,
    pub minutes_until_open: Option<u64>,
    pub label: String,
}

impl SessionReport {
    pub fn new(schedule: &ExchangeSchedule, status: SessionStatus) -> Self {
        SessionReport {
            exchange: schedule.id.clone(),
            status: status.name().to_string(),
            is_open: status.is_open(),
            minutes_until_open: status.minutes_until_open(),
            label: status.label(),
        }
    }
}

impl DashboardEntry {
    pub fn from_session(schedule: &ExchangeSchedule, status: SessionStatus) -> Self {
        DashboardEntry {
            k: schedule.id.clone(),
            v: status.label(),
            is_open: if status.is_unknown() { None } else { Some(status.is_open()) },
        }
    }
}

/// one entry per exchange, in table order
pub fn session_entries<Z: TimeZone>(table: &ExchangeTable, cache: &mut SessionCache, now: &DateTime<Z>) -> Vec<DashboardEntry> {
    table
        .iter()
        .map(|schedule| DashboardEntry::from_session(schedule, cache.status(schedule, now)))
        .collect()
}

pub fn session_reports<Z: TimeZone>(table: &ExchangeTable, cache: &mut SessionCache, now: &DateTime<Z>) -> Vec<SessionReport> {
    table
        .iter()
        .map(|schedule| SessionReport::new(schedule, cache.status(schedule, now)))
        .collect()
}

pub fn event_entries<Z: TimeZone>(calendar: &EconomicCalendar, now: &DateTime<Z>) -> Vec<DashboardEntry> {
    calendar
        .iter()
        .map(|event| DashboardEntry {
            k: event.name.clone(),
            v: event.countdown(now),
            is_open: None,
        })
        .collect()
}
