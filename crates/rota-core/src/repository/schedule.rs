use crate::error::CoreError;
use crate::models::{AdhocEvent, Holiday, PatternOverride, WeeklyPattern};
use crate::repository::SqliteRepository;
use crate::schedule::{resolve, Resolution, ScheduleWindow};
use async_trait::async_trait;

#[async_trait]
impl super::Repository for SqliteRepository {
    async fn resolve_schedule(&self, window: ScheduleWindow) -> Result<Resolution, CoreError> {
        let patterns: Vec<WeeklyPattern> =
            sqlx::query_as("SELECT * FROM weekly_patterns ORDER BY weekday, position, starts_at")
                .fetch_all(self.pool())
                .await?;

        let overrides: Vec<PatternOverride> =
            sqlx::query_as("SELECT * FROM pattern_overrides ORDER BY date")
                .fetch_all(self.pool())
                .await?;

        let holidays: Vec<Holiday> = sqlx::query_as("SELECT * FROM holidays")
            .fetch_all(self.pool())
            .await?;

        let events: Vec<AdhocEvent> =
            sqlx::query_as("SELECT * FROM adhoc_events ORDER BY date, starts_at, created_at")
                .fetch_all(self.pool())
                .await?;

        Ok(resolve(&patterns, &overrides, &holidays, &events, window))
    }
}
