//! session_cache.rs
//!
//! Remembers session lookups for the current time bucket so every page render inside the same
//! minute shares one calculation per exchange.

use std::collections::HashMap;
use chrono::{DateTime, Duration, TimeZone};
use crate::exchange::ExchangeSchedule;
use crate::market_hours::{MarketHours, SessionStatus};

pub const DEFAULT_CACHE_WINDOW_SECONDS: i64 = 60;

/// Holds the statuses of a single bucket; moving to another bucket drops everything.
/// A zero or negative window turns caching off. Entries are keyed on the whole schedule, so two
/// schedules sharing an id never share a status.
#[derive(Debug, Clone)]
pub struct SessionCache {
    window: Duration,
    bucket: Option<i64>,
    entries: HashMap<ExchangeSchedule, SessionStatus>,
}

impl SessionCache {
    pub fn new(window: Duration) -> Self {
        SessionCache {
            window,
            bucket: None,
            entries: HashMap::new(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// `now` truncated to the window, as a bucket number; None when caching is off
    pub fn bucket_of<Z: TimeZone>(&self, now: &DateTime<Z>) -> Option<i64> {
        let width = self.window.num_seconds();
        if width <= 0 {
            return None;
        }
        Some(now.timestamp().div_euclid(width))
    }

    pub fn status<Z: TimeZone>(&mut self, schedule: &ExchangeSchedule, now: &DateTime<Z>) -> SessionStatus {
        let bucket = match self.bucket_of(now) {
            Some(bucket) => bucket,
            None => return MarketHours::status(schedule, now),
        };

        if self.bucket != Some(bucket) {
            if !self.entries.is_empty() {
                tracing::trace!("[status] bucket {:?} -> {}, dropping {} entries", &self.bucket, bucket, self.entries.len());
            }
            self.entries.clear();
            self.bucket = Some(bucket);
        }

        if let Some(status) = self.entries.get(schedule) {
            return *status;
        }
        let status = MarketHours::status(schedule, now);
        self.entries.insert(schedule.clone(), status);
        status
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        SessionCache::new(Duration::seconds(DEFAULT_CACHE_WINDOW_SECONDS))
    }
}
