//! Clock capability for date-partitioned logging.
//!
//! The file logger resolves its target file from the current calendar date.
//! Injecting the date source keeps the logger testable without wall-clock
//! coupling.

use chrono::{Local, NaiveDate};

pub trait Clock: Send + Sync {
    /// Current calendar date in local time.
    fn today(&self) -> NaiveDate;
}

/// Wall-clock implementation used in production.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
