//! The weekly-pattern calendar engine.
//!
//! Resolution is pure and synchronous: it reads record collections and a
//! date window, and produces occurrence view-models. Nothing in this module
//! touches storage; callers re-run [`resolve`] whenever inputs change. The
//! only write-shaped output is the [`plan_mutation`] intent list, which the
//! repository layer executes.

mod expand;
mod mutation;
mod overrides;
mod resolve;

pub use expand::pattern_dates;
pub use mutation::{plan_mutation, OccurrenceChange, OverrideWrite};
pub use overrides::OverrideIndex;
pub use resolve::{
    resolve, EventBadge, Occurrence, OccurrenceKind, Resolution, ResolutionIssue,
};

use crate::error::CoreError;
use chrono::NaiveDate;

/// Half-open date window `[from, to)` a schedule is resolved for.
///
/// Construction rejects `to <= from`, so every window handed to the engine
/// is non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleWindow {
    from: NaiveDate,
    to: NaiveDate,
}

impl ScheduleWindow {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, CoreError> {
        if to <= from {
            return Err(CoreError::InvalidWindow(format!(
                "window end {} must be after window start {}",
                to, from
            )));
        }
        Ok(Self { from, to })
    }

    /// Window covering `days` days starting at `from`.
    pub fn starting_at(from: NaiveDate, days: i64) -> Result<Self, CoreError> {
        Self::new(from, from + chrono::Duration::days(days))
    }

    pub fn start(&self) -> NaiveDate {
        self.from
    }

    /// Exclusive end.
    pub fn end(&self) -> NaiveDate {
        self.to
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date < self.to
    }
}
