use crate::error::CoreError;
use crate::models::{AdhocEvent, NewEventData, SchoolClass};
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

#[async_trait]
impl super::EventRepository for SqliteRepository {
    async fn add_event(&self, data: NewEventData) -> Result<AdhocEvent, CoreError> {
        if data.title.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "Event title must not be empty".to_string(),
            ));
        }
        if data.starts_at >= data.ends_at {
            return Err(CoreError::InvalidInput(format!(
                "Event start time {} must be before end time {}",
                data.starts_at, data.ends_at
            )));
        }

        let mut tx = self.pool().begin().await?;

        if let Some(class_id) = data.class_id {
            let class: Option<SchoolClass> = sqlx::query_as("SELECT * FROM classes WHERE id = $1")
                .bind(class_id)
                .fetch_optional(&mut *tx)
                .await?;
            if class.is_none() {
                return Err(CoreError::NotFound(format!(
                    "Class with id {} not found",
                    class_id
                )));
            }
        }

        let event = AdhocEvent {
            id: Uuid::now_v7(),
            class_id: data.class_id,
            date: data.date,
            starts_at: data.starts_at,
            ends_at: data.ends_at,
            title: data.title,
            kind: data.kind,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            r#"INSERT INTO adhoc_events (id, class_id, date, starts_at, ends_at, title, kind, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"#,
        )
        .bind(event.id)
        .bind(event.class_id)
        .bind(event.date)
        .bind(event.starts_at)
        .bind(event.ends_at)
        .bind(&event.title)
        .bind(event.kind)
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(event)
    }

    async fn find_event_by_id(&self, id: Uuid) -> Result<Option<AdhocEvent>, CoreError> {
        let event = sqlx::query_as("SELECT * FROM adhoc_events WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(event)
    }

    async fn find_events_by_short_id_prefix(
        &self,
        short_id: &str,
    ) -> Result<Vec<AdhocEvent>, CoreError> {
        let mut pattern = short_id.replace('-', "").to_lowercase();
        pattern.push('%');

        let events = sqlx::query_as("SELECT * FROM adhoc_events WHERE lower(hex(id)) LIKE ?")
            .bind(pattern)
            .fetch_all(self.pool())
            .await?;
        Ok(events)
    }

    async fn find_events(&self) -> Result<Vec<AdhocEvent>, CoreError> {
        let events = sqlx::query_as("SELECT * FROM adhoc_events ORDER BY date, starts_at")
            .fetch_all(self.pool())
            .await?;
        Ok(events)
    }

    async fn delete_event(&self, id: Uuid) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM adhoc_events WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("Event with id {} not found", id)));
        }

        Ok(())
    }
}
