use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{
    AdhocEvent, Holiday, NewClassData, NewEventData, NewPatternData, PatternOverride, Program,
    SchoolClass, UpdateClassData, UpdatePatternData, WeeklyPattern,
};
use crate::schedule::{OverrideWrite, Resolution, ScheduleWindow};
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

// Re-export domain modules
pub mod classes;
pub mod events;
pub mod holidays;
pub mod overrides;
pub mod patterns;
pub mod programs;
pub mod schedule;

// Traits are defined in this module and implemented in respective domain modules

/// Domain-specific trait for class operations
#[async_trait]
pub trait ClassRepository {
    async fn add_class(&self, data: NewClassData) -> Result<SchoolClass, CoreError>;
    async fn find_class_by_id(&self, id: Uuid) -> Result<Option<SchoolClass>, CoreError>;
    async fn find_classes_by_short_id_prefix(
        &self,
        short_id: &str,
    ) -> Result<Vec<SchoolClass>, CoreError>;
    async fn find_classes(&self) -> Result<Vec<SchoolClass>, CoreError>;
    async fn update_class(&self, id: Uuid, data: UpdateClassData) -> Result<SchoolClass, CoreError>;
    async fn delete_class(&self, id: Uuid) -> Result<(), CoreError>;
}

/// Domain-specific trait for program operations
#[async_trait]
pub trait ProgramRepository {
    /// Returns the school's program, creating it on first access.
    async fn ensure_program(&self) -> Result<Program, CoreError>;
}

/// Domain-specific trait for weekly pattern operations
#[async_trait]
pub trait PatternRepository {
    async fn add_pattern(&self, data: NewPatternData) -> Result<WeeklyPattern, CoreError>;
    async fn find_pattern_by_id(&self, id: Uuid) -> Result<Option<WeeklyPattern>, CoreError>;
    async fn find_patterns_by_short_id_prefix(
        &self,
        short_id: &str,
    ) -> Result<Vec<WeeklyPattern>, CoreError>;
    async fn find_patterns(&self) -> Result<Vec<WeeklyPattern>, CoreError>;
    async fn find_patterns_for_class(&self, class_id: Uuid)
        -> Result<Vec<WeeklyPattern>, CoreError>;
    async fn update_pattern(
        &self,
        id: Uuid,
        data: UpdatePatternData,
    ) -> Result<WeeklyPattern, CoreError>;
    async fn delete_pattern(&self, id: Uuid) -> Result<(), CoreError>;
}

/// Domain-specific trait for override operations
#[async_trait]
pub trait OverrideRepository {
    async fn find_overrides(&self) -> Result<Vec<PatternOverride>, CoreError>;
    async fn find_overrides_for_pattern(
        &self,
        pattern_id: Uuid,
    ) -> Result<Vec<PatternOverride>, CoreError>;
    /// Executes a mutation plan write by write with per-row atomicity.
    /// A failure on write k of n is reported as
    /// [`CoreError::OverrideWriteFailed`] with the step number; earlier
    /// writes stay applied and the caller decides on compensation.
    async fn apply_override_writes(
        &self,
        writes: Vec<OverrideWrite>,
    ) -> Result<Vec<PatternOverride>, CoreError>;
}

/// Domain-specific trait for holiday operations
#[async_trait]
pub trait HolidayRepository {
    async fn add_holiday(&self, date: NaiveDate, name: Option<String>)
        -> Result<Holiday, CoreError>;
    async fn find_holidays(&self) -> Result<Vec<Holiday>, CoreError>;
    async fn remove_holiday(&self, date: NaiveDate) -> Result<(), CoreError>;
}

/// Domain-specific trait for ad-hoc event operations
#[async_trait]
pub trait EventRepository {
    async fn add_event(&self, data: NewEventData) -> Result<AdhocEvent, CoreError>;
    async fn find_event_by_id(&self, id: Uuid) -> Result<Option<AdhocEvent>, CoreError>;
    async fn find_events_by_short_id_prefix(
        &self,
        short_id: &str,
    ) -> Result<Vec<AdhocEvent>, CoreError>;
    async fn find_events(&self) -> Result<Vec<AdhocEvent>, CoreError>;
    async fn delete_event(&self, id: Uuid) -> Result<(), CoreError>;
}

/// Main repository trait that composes all domain traits
#[async_trait]
pub trait Repository:
    ClassRepository
    + ProgramRepository
    + PatternRepository
    + OverrideRepository
    + HolidayRepository
    + EventRepository
{
    /// Read path of the engine: load the four input collections and run the
    /// pure resolver over them. Callers re-invoke this after any mutation;
    /// there is no cache to invalidate.
    async fn resolve_schedule(&self, window: ScheduleWindow) -> Result<Resolution, CoreError>;
}

/// SQLite implementation of the repository pattern
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool for internal use across modules
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}
