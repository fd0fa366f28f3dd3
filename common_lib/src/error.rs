//! error.rs
//!
//! errors raised while working out exchange session times

use thiserror::Error;

/// Anything that can go wrong inside the session clock. These never reach the page;
/// `MarketHours::status` logs them and hands back `SessionStatus::Unknown` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeCalculationError {
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),
    #[error("exchange {0} has no trading days")]
    NoTradingDays(String),
    #[error("duplicate exchange identifier: {0}")]
    DuplicateExchange(String),
    #[error("local time does not exist in the exchange timezone")]
    NonexistentLocalTime,
    #[error("date arithmetic overflow")]
    Overflow,
}
