use crate::error::CoreError;
use crate::models::PatternOverride;
use crate::repository::SqliteRepository;
use crate::schedule::OverrideWrite;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

#[async_trait]
impl super::OverrideRepository for SqliteRepository {
    async fn find_overrides(&self) -> Result<Vec<PatternOverride>, CoreError> {
        let overrides = sqlx::query_as("SELECT * FROM pattern_overrides ORDER BY date")
            .fetch_all(self.pool())
            .await?;
        Ok(overrides)
    }

    async fn find_overrides_for_pattern(
        &self,
        pattern_id: Uuid,
    ) -> Result<Vec<PatternOverride>, CoreError> {
        let overrides =
            sqlx::query_as("SELECT * FROM pattern_overrides WHERE pattern_id = $1 ORDER BY date")
                .bind(pattern_id)
                .fetch_all(self.pool())
                .await?;
        Ok(overrides)
    }

    async fn apply_override_writes(
        &self,
        writes: Vec<OverrideWrite>,
    ) -> Result<Vec<PatternOverride>, CoreError> {
        let total = writes.len();
        let mut applied = Vec::with_capacity(total);

        // Per-row atomicity only: each write commits on its own, and a
        // failure reports its step so the caller of a two-write move can
        // tell the suppression from the re-insertion. Nothing is rolled
        // back here.
        for (i, write) in writes.into_iter().enumerate() {
            let pattern_id = write.pattern_id;
            let date = write.date;
            match self.upsert_override(write).await {
                Ok(row) => applied.push(row),
                Err(source) => {
                    return Err(CoreError::OverrideWriteFailed {
                        step: i + 1,
                        of: total,
                        pattern_id,
                        date,
                        source: Box::new(source),
                    })
                }
            }
        }

        Ok(applied)
    }
}

impl SqliteRepository {
    /// Single-row upsert at the natural key `(pattern_id, date)`. The UNIQUE
    /// constraint turns a second write for an occupied key into an update,
    /// so re-applying the same plan is idempotent.
    async fn upsert_override(&self, write: OverrideWrite) -> Result<PatternOverride, CoreError> {
        let now = Utc::now();
        let id = write.id.unwrap_or_else(Uuid::now_v7);

        sqlx::query(
            r#"INSERT INTO pattern_overrides (id, pattern_id, date, starts_at, ends_at, cancelled, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT(pattern_id, date) DO UPDATE SET
                starts_at = excluded.starts_at,
                ends_at = excluded.ends_at,
                cancelled = excluded.cancelled,
                updated_at = excluded.updated_at"#,
        )
        .bind(id)
        .bind(write.pattern_id)
        .bind(write.date)
        .bind(write.starts_at)
        .bind(write.ends_at)
        .bind(write.cancelled)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        // Read back through the natural key: on conflict the stored row kept
        // its original id, not the freshly generated one.
        let row = sqlx::query_as(
            "SELECT * FROM pattern_overrides WHERE pattern_id = $1 AND date = $2",
        )
        .bind(write.pattern_id)
        .bind(write.date)
        .fetch_one(self.pool())
        .await?;

        Ok(row)
    }
}
