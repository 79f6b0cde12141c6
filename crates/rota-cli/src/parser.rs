use anyhow::Result;
use chrono::{NaiveDate, NaiveTime, Utc};
use chrono_english::{parse_date_string, Dialect};

/// Parses a calendar date. Accepts ISO dates as well as friendly forms like
/// "next monday" or "tomorrow".
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Ok(date);
    }
    parse_date_string(date_str, Utc::now(), Dialect::Uk)
        .map(|dt| dt.date_naive())
        .map_err(|e| anyhow::anyhow!("Failed to parse date '{}': {}", date_str, e))
}

/// Parses a wall-clock time as HH:MM (seconds optional).
pub fn parse_time(time_str: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(time_str, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time_str, "%H:%M:%S"))
        .map_err(|e| anyhow::anyhow!("Failed to parse time '{}': {}", time_str, e))
}
