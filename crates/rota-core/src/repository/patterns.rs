use crate::error::CoreError;
use crate::models::{NewPatternData, SchoolClass, UpdatePatternData, WeeklyPattern};
use crate::repository::{ProgramRepository, SqliteRepository};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};
use uuid::Uuid;

#[async_trait]
impl super::PatternRepository for SqliteRepository {
    async fn add_pattern(&self, data: NewPatternData) -> Result<WeeklyPattern, CoreError> {
        if data.starts_at >= data.ends_at {
            return Err(CoreError::InvalidInput(format!(
                "Pattern start time {} must be before end time {}",
                data.starts_at, data.ends_at
            )));
        }
        if let (Some(from), Some(until)) = (data.valid_from, data.valid_until) {
            if until < from {
                return Err(CoreError::InvalidInput(format!(
                    "Validity window end {} precedes its start {}",
                    until, from
                )));
            }
        }

        let program = self.ensure_program().await?;

        let mut tx = self.pool().begin().await?;

        let class: Option<SchoolClass> = sqlx::query_as("SELECT * FROM classes WHERE id = $1")
            .bind(data.class_id)
            .fetch_optional(&mut *tx)
            .await?;

        if class.is_none() {
            return Err(CoreError::NotFound(format!(
                "Class with id {} not found",
                data.class_id
            )));
        }

        // Append after existing same-weekday patterns unless told otherwise.
        let position = match data.position {
            Some(position) => position,
            None => {
                let max: Option<i64> = sqlx::query_scalar(
                    "SELECT MAX(position) FROM weekly_patterns WHERE weekday = $1",
                )
                .bind(data.weekday)
                .fetch_one(&mut *tx)
                .await?;
                max.map_or(0, |m| m + 1)
            }
        };

        let pattern = WeeklyPattern {
            id: Uuid::now_v7(),
            program_id: program.id,
            class_id: data.class_id,
            weekday: data.weekday,
            starts_at: data.starts_at,
            ends_at: data.ends_at,
            valid_from: data.valid_from,
            valid_until: data.valid_until,
            position,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            r#"INSERT INTO weekly_patterns (id, program_id, class_id, weekday, starts_at, ends_at, valid_from, valid_until, position, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)"#,
        )
        .bind(pattern.id)
        .bind(pattern.program_id)
        .bind(pattern.class_id)
        .bind(pattern.weekday)
        .bind(pattern.starts_at)
        .bind(pattern.ends_at)
        .bind(pattern.valid_from)
        .bind(pattern.valid_until)
        .bind(pattern.position)
        .bind(pattern.created_at)
        .bind(pattern.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(pattern)
    }

    async fn find_pattern_by_id(&self, id: Uuid) -> Result<Option<WeeklyPattern>, CoreError> {
        let pattern = sqlx::query_as("SELECT * FROM weekly_patterns WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(pattern)
    }

    async fn find_patterns_by_short_id_prefix(
        &self,
        short_id: &str,
    ) -> Result<Vec<WeeklyPattern>, CoreError> {
        let mut pattern = short_id.replace('-', "").to_lowercase();
        pattern.push('%');

        let patterns =
            sqlx::query_as("SELECT * FROM weekly_patterns WHERE lower(hex(id)) LIKE ?")
                .bind(pattern)
                .fetch_all(self.pool())
                .await?;
        Ok(patterns)
    }

    async fn find_patterns(&self) -> Result<Vec<WeeklyPattern>, CoreError> {
        let patterns =
            sqlx::query_as("SELECT * FROM weekly_patterns ORDER BY weekday, position, starts_at")
                .fetch_all(self.pool())
                .await?;
        Ok(patterns)
    }

    async fn find_patterns_for_class(
        &self,
        class_id: Uuid,
    ) -> Result<Vec<WeeklyPattern>, CoreError> {
        let patterns = sqlx::query_as(
            "SELECT * FROM weekly_patterns WHERE class_id = $1 ORDER BY weekday, position, starts_at",
        )
        .bind(class_id)
        .fetch_all(self.pool())
        .await?;
        Ok(patterns)
    }

    async fn update_pattern(
        &self,
        id: Uuid,
        data: UpdatePatternData,
    ) -> Result<WeeklyPattern, CoreError> {
        let mut tx = self.pool().begin().await?;

        let current: WeeklyPattern = sqlx::query_as("SELECT * FROM weekly_patterns WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Pattern with id {} not found", id)))?;

        // Re-validate the time invariant against the merged state.
        let starts_at = data.starts_at.unwrap_or(current.starts_at);
        let ends_at = data.ends_at.unwrap_or(current.ends_at);
        if starts_at >= ends_at {
            return Err(CoreError::InvalidInput(format!(
                "Pattern start time {} must be before end time {}",
                starts_at, ends_at
            )));
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE weekly_patterns SET ");
        let mut updated = false;

        if let Some(weekday) = data.weekday {
            qb.push("weekday = ");
            qb.push_bind(weekday);
            updated = true;
        }

        if let Some(starts_at) = data.starts_at {
            if updated {
                qb.push(", ");
            }
            qb.push("starts_at = ");
            qb.push_bind(starts_at);
            updated = true;
        }

        if let Some(ends_at) = data.ends_at {
            if updated {
                qb.push(", ");
            }
            qb.push("ends_at = ");
            qb.push_bind(ends_at);
            updated = true;
        }

        if let Some(valid_from) = data.valid_from {
            if updated {
                qb.push(", ");
            }
            qb.push("valid_from = ");
            qb.push_bind(valid_from);
            updated = true;
        }

        if let Some(valid_until) = data.valid_until {
            if updated {
                qb.push(", ");
            }
            qb.push("valid_until = ");
            qb.push_bind(valid_until);
            updated = true;
        }

        if let Some(position) = data.position {
            if updated {
                qb.push(", ");
            }
            qb.push("position = ");
            qb.push_bind(position);
            updated = true;
        }

        if updated {
            qb.push(", updated_at = ");
            qb.push_bind(Utc::now());
            qb.push(" WHERE id = ");
            qb.push_bind(id);
            qb.build().execute(&mut *tx).await?;
        }

        let pattern: WeeklyPattern = sqlx::query_as("SELECT * FROM weekly_patterns WHERE id = $1")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(pattern)
    }

    async fn delete_pattern(&self, id: Uuid) -> Result<(), CoreError> {
        let mut tx = self.pool().begin().await?;

        let pattern: Option<WeeklyPattern> =
            sqlx::query_as("SELECT * FROM weekly_patterns WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        if pattern.is_none() {
            return Err(CoreError::NotFound(format!("Pattern with id {} not found", id)));
        }

        // Overrides are meaningless without their pattern.
        sqlx::query("DELETE FROM pattern_overrides WHERE pattern_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM weekly_patterns WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
