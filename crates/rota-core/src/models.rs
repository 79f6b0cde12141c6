use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Named container of weekly patterns. One per school, auto-created on
/// first access (see `ProgramRepository::ensure_program`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Program {
    #[serde(with = "uuid::serde::compact")]
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Owning entity for weekly patterns and ad-hoc events.
/// Subject, level and tutor are plain display metadata for the admin screens.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SchoolClass {
    #[serde(with = "uuid::serde::compact")]
    pub id: Uuid,
    pub name: String,
    pub subject: Option<String>,
    pub level: Option<String>,
    pub tutor: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Day of week a pattern recurs on. Stored as lowercase TEXT.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum PatternDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid weekday: {0}")]
pub struct ParsePatternDayError(String);

impl FromStr for PatternDay {
    type Err = ParsePatternDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monday" | "mon" => Ok(PatternDay::Monday),
            "tuesday" | "tue" => Ok(PatternDay::Tuesday),
            "wednesday" | "wed" => Ok(PatternDay::Wednesday),
            "thursday" | "thu" => Ok(PatternDay::Thursday),
            "friday" | "fri" => Ok(PatternDay::Friday),
            "saturday" | "sat" => Ok(PatternDay::Saturday),
            "sunday" | "sun" => Ok(PatternDay::Sunday),
            _ => Err(ParsePatternDayError(s.to_string())),
        }
    }
}

impl std::fmt::Display for PatternDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PatternDay::Monday => "monday",
            PatternDay::Tuesday => "tuesday",
            PatternDay::Wednesday => "wednesday",
            PatternDay::Thursday => "thursday",
            PatternDay::Friday => "friday",
            PatternDay::Saturday => "saturday",
            PatternDay::Sunday => "sunday",
        };
        write!(f, "{}", name)
    }
}

impl PatternDay {
    pub fn to_weekday(self) -> Weekday {
        match self {
            PatternDay::Monday => Weekday::Mon,
            PatternDay::Tuesday => Weekday::Tue,
            PatternDay::Wednesday => Weekday::Wed,
            PatternDay::Thursday => Weekday::Thu,
            PatternDay::Friday => Weekday::Fri,
            PatternDay::Saturday => Weekday::Sat,
            PatternDay::Sunday => Weekday::Sun,
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => PatternDay::Monday,
            Weekday::Tue => PatternDay::Tuesday,
            Weekday::Wed => PatternDay::Wednesday,
            Weekday::Thu => PatternDay::Thursday,
            Weekday::Fri => PatternDay::Friday,
            Weekday::Sat => PatternDay::Saturday,
            Weekday::Sun => PatternDay::Sunday,
        }
    }

    /// Whether `date` falls on this weekday.
    pub fn matches(self, date: NaiveDate) -> bool {
        chrono::Datelike::weekday(&date) == self.to_weekday()
    }
}

/// One recurring weekly slot, e.g. "class X on Monday 18:00-19:30".
///
/// The optional validity window bounds expansion: a pattern is inactive
/// before `valid_from` and after `valid_until` (both inclusive, unbounded
/// where absent). `position` orders patterns sharing a weekday.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WeeklyPattern {
    #[serde(with = "uuid::serde::compact")]
    pub id: Uuid,
    #[serde(with = "uuid::serde::compact")]
    pub program_id: Uuid,
    #[serde(with = "uuid::serde::compact")]
    pub class_id: Uuid,
    pub weekday: PatternDay,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub valid_from: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub position: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WeeklyPattern {
    /// Invariant check: base times must form a non-empty interval.
    pub fn has_valid_times(&self) -> bool {
        self.starts_at < self.ends_at
    }

    /// Whether `date` lies inside the pattern's validity window.
    pub fn in_validity_window(&self, date: NaiveDate) -> bool {
        if let Some(from) = self.valid_from {
            if date < from {
                return false;
            }
        }
        if let Some(until) = self.valid_until {
            if date > until {
                return false;
            }
        }
        true
    }
}

/// Single-date exception to a WeeklyPattern, keyed by `(pattern_id, date)`.
///
/// At most one row exists per key; writes to an occupied key update in
/// place. A cancelled override suppresses the occurrence on that date but is
/// retained so the suppression stays idempotent and auditable. An override
/// whose date does not fall on the pattern's weekday (or lies outside its
/// validity window) represents a one-off move.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PatternOverride {
    #[serde(with = "uuid::serde::compact")]
    pub id: Uuid,
    #[serde(with = "uuid::serde::compact")]
    pub pattern_id: Uuid,
    pub date: NaiveDate,
    pub starts_at: Option<NaiveTime>,
    pub ends_at: Option<NaiveTime>,
    pub cancelled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single excluded date, global per school. No occurrence is emitted on a
/// holiday date regardless of source.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Kind of an ad-hoc single-date record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum EventKind {
    Test,
    Event,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid event kind: {0}")]
pub struct ParseEventKindError(String);

impl FromStr for EventKind {
    type Err = ParseEventKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "test" => Ok(EventKind::Test),
            "event" => Ok(EventKind::Event),
            _ => Err(ParseEventKindError(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Test => write!(f, "test"),
            EventKind::Event => write!(f, "event"),
        }
    }
}

/// Ad-hoc single-date record (a test or a school event). No recurrence;
/// `class_id` is None for school-wide events.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdhocEvent {
    #[serde(with = "uuid::serde::compact")]
    pub id: Uuid,
    pub class_id: Option<Uuid>,
    pub date: NaiveDate,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub title: String,
    pub kind: EventKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Data Transfer Objects
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct NewClassData {
    pub name: String,
    pub subject: Option<String>,
    pub level: Option<String>,
    pub tutor: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateClassData {
    pub name: Option<String>,
    pub subject: Option<Option<String>>,
    pub level: Option<Option<String>>,
    pub tutor: Option<Option<String>>,
}

#[derive(Debug, Clone)]
pub struct NewPatternData {
    pub class_id: Uuid,
    pub weekday: PatternDay,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub valid_from: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    /// Appended after existing same-weekday patterns when absent.
    pub position: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePatternData {
    pub weekday: Option<PatternDay>,
    pub starts_at: Option<NaiveTime>,
    pub ends_at: Option<NaiveTime>,
    pub valid_from: Option<Option<NaiveDate>>,
    pub valid_until: Option<Option<NaiveDate>>,
    pub position: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewEventData {
    pub class_id: Option<Uuid>,
    pub date: NaiveDate,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    pub title: String,
    pub kind: EventKind,
}
