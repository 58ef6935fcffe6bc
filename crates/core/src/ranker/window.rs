//! Active date window for approach events.
//!
//! The window is the current calendar week: Monday through Sunday inclusive,
//! i.e. the half-open range `[this Monday, next Monday)`.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

/// A half-open range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    /// First date inside the window.
    pub start: NaiveDate,
    /// First date after the window.
    pub end: NaiveDate,
}

impl DateWindow {
    /// The calendar week (Monday to Sunday) containing `today`.
    pub fn current_week(today: NaiveDate) -> Self {
        let offset = u64::from(today.weekday().num_days_from_monday());
        let start = today - Days::new(offset);
        let end = start + Days::new(7);
        Self { start, end }
    }

    /// Whether `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}
