//! Default due dates for tasks that arrive without one.
//!
//! A task is due two days out, pushed to the following Monday when that lands
//! on a weekend:
//!
//! ```text
//! today + 2 is Saturday → today + 4
//! today + 2 is Sunday   → today + 3
//! otherwise             → today + 2
//! ```

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::entities::Issue;

/// Weekend-skipping default due date relative to `today`.
#[must_use]
pub fn default_due_date(today: NaiveDate) -> NaiveDate {
    let offset = match (today + Days::new(2)).weekday() {
        Weekday::Sat => 4,
        Weekday::Sun => 3,
        _ => 2,
    };
    today + Days::new(offset)
}

/// The issue's own due date, or the default when it has none.
#[must_use]
pub fn resolve_due_date(issue: &Issue, today: NaiveDate) -> NaiveDate {
    issue
        .due_date
        .unwrap_or_else(|| default_due_date(today))
}
