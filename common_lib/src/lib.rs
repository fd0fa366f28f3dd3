//! common_lib/src/lib.rs

pub mod common_structs;
pub mod dashboard;
pub mod economic_calendar;
pub mod error;
pub mod exchange;
pub mod init;
pub mod market_hours;
pub mod placeholder;
pub mod session_cache;
