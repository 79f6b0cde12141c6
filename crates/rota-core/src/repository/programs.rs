use crate::error::CoreError;
use crate::models::Program;
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

const DEFAULT_PROGRAM_NAME: &str = "Weekly schedule";

#[async_trait]
impl super::ProgramRepository for SqliteRepository {
    /// One program per school, created lazily the first time anything asks
    /// for it. Concurrent first calls race at the store; the earliest insert
    /// wins and later calls read it back.
    async fn ensure_program(&self) -> Result<Program, CoreError> {
        let mut tx = self.pool().begin().await?;

        let existing: Option<Program> =
            sqlx::query_as("SELECT * FROM programs ORDER BY created_at LIMIT 1")
                .fetch_optional(&mut *tx)
                .await?;

        if let Some(program) = existing {
            return Ok(program);
        }

        let program = Program {
            id: Uuid::now_v7(),
            name: DEFAULT_PROGRAM_NAME.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query("INSERT INTO programs (id, name, created_at) VALUES ($1, $2, $3)")
            .bind(program.id)
            .bind(&program.name)
            .bind(program.created_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(program)
    }
}
