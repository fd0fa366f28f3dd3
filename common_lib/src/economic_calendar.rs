//! economic_calendar.rs
//!
//! FOMC / NFP / CPI countdowns. There is no calendar feed behind this; a release date is only
//! known if it was put in the configuration, otherwise the panel shows a placeholder.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use crate::market_hours::{format_minutes, minutes_between};

pub const PLACEHOLDER_VALUE: &str = "--";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomicEvent {
    pub name: String,
    #[serde(default)]
    pub next_release: Option<DateTime<Utc>>,
}

impl EconomicEvent {
    pub fn new(name: &str) -> Self {
        EconomicEvent { name: name.to_string(), next_release: None }
    }

    pub fn countdown<Z: TimeZone>(&self, now: &DateTime<Z>) -> String {
        match &self.next_release {
            Some(release) => {
                let minutes = minutes_between(&now.with_timezone(&Utc), release);
                format_minutes(i64::try_from(minutes).unwrap_or(i64::MAX))
            }
            None => PLACEHOLDER_VALUE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EconomicCalendar {
    events: Vec<EconomicEvent>,
}

impl EconomicCalendar {
    pub fn new(events: Vec<EconomicEvent>) -> Self {
        EconomicCalendar { events }
    }

    pub fn iter(&self) -> impl Iterator<Item = &EconomicEvent> {
        self.events.iter()
    }
}

impl Default for EconomicCalendar {
    fn default() -> Self {
        EconomicCalendar::new(vec![EconomicEvent::new("FOMC"), EconomicEvent::new("NFP"), EconomicEvent::new("CPI")])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undated_events_show_placeholder() {
        let now = Utc.with_ymd_and_hms(2024, 1, 9, 12, 0, 0).unwrap();
        let values: Vec<(String, String)> = EconomicCalendar::default().iter().map(|e| (e.name.clone(), e.countdown(&now))).collect();
        assert_eq!(
            values,
            vec![
                ("FOMC".to_string(), "--".to_string()),
                ("NFP".to_string(), "--".to_string()),
                ("CPI".to_string(), "--".to_string()),
            ]
        );
    }

    #[test]
    fn dated_event_counts_down() {
        let now = Utc.with_ymd_and_hms(2024, 1, 9, 12, 0, 0).unwrap();
        let cpi = EconomicEvent {
            name: "CPI".to_string(),
            next_release: Some(Utc.with_ymd_and_hms(2024, 1, 11, 13, 30, 0).unwrap()),
        };
        assert_eq!(cpi.countdown(&now), "2d 01:30");

        let past = Utc.with_ymd_and_hms(2024, 1, 12, 0, 0, 0).unwrap();
        assert_eq!(cpi.countdown(&past), "Now");
    }

    #[test]
    fn release_date_is_optional_in_config() {
        let event: EconomicEvent = serde_json::from_str(r#"{"name":"NFP"}"#).unwrap();
        assert_eq!(event, EconomicEvent::new("NFP"));
        let event: EconomicEvent = serde_json::from_str(r#"{"name":"NFP","next_release":"2024-02-02T13:30:00Z"}"#).unwrap();
        assert_eq!(event.next_release, Some(Utc.with_ymd_and_hms(2024, 2, 2, 13, 30, 0).unwrap()));
    }
}
