use chrono::{Datelike, Duration, NaiveDate, Weekday};

use super::ScheduleWindow;
use crate::models::WeeklyPattern;

/// Expands one weekly pattern over a query window.
///
/// Yields, lazily and in order, every date inside `[window.start,
/// window.end)` that falls on the pattern's weekday, intersected with the
/// pattern's own validity range. A validity window closing mid-week cuts
/// the sequence off exactly at the boundary; no partial week leaks past it.
pub fn pattern_dates(
    pattern: &WeeklyPattern,
    window: ScheduleWindow,
) -> impl Iterator<Item = NaiveDate> {
    let mut start = window.start();
    if let Some(from) = pattern.valid_from {
        start = start.max(from);
    }
    // The query end is exclusive, valid_until inclusive.
    let mut end = window.end();
    if let Some(until) = pattern.valid_until {
        end = end.min(until + Duration::days(1));
    }

    let first = first_on_or_after(start, pattern.weekday.to_weekday());
    std::iter::successors(Some(first), |date| date.checked_add_signed(Duration::days(7)))
        .take_while(move |date| *date < end)
}

fn first_on_or_after(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    let ahead = (weekday.num_days_from_monday() + 7 - date.weekday().num_days_from_monday()) % 7;
    date + Duration::days(i64::from(ahead))
}
