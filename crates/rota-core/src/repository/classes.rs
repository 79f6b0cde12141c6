use crate::error::CoreError;
use crate::models::{NewClassData, SchoolClass, UpdateClassData};
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};
use uuid::Uuid;

#[async_trait]
impl super::ClassRepository for SqliteRepository {
    async fn add_class(&self, data: NewClassData) -> Result<SchoolClass, CoreError> {
        if data.name.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "Class name must not be empty".to_string(),
            ));
        }

        let class = SchoolClass {
            id: Uuid::now_v7(),
            name: data.name,
            subject: data.subject,
            level: data.level,
            tutor: data.tutor,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            r#"INSERT INTO classes (id, name, subject, level, tutor, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(class.id)
        .bind(&class.name)
        .bind(&class.subject)
        .bind(&class.level)
        .bind(&class.tutor)
        .bind(class.created_at)
        .bind(class.updated_at)
        .execute(self.pool())
        .await?;

        Ok(class)
    }

    async fn find_class_by_id(&self, id: Uuid) -> Result<Option<SchoolClass>, CoreError> {
        let class = sqlx::query_as("SELECT * FROM classes WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(class)
    }

    async fn find_classes_by_short_id_prefix(
        &self,
        short_id: &str,
    ) -> Result<Vec<SchoolClass>, CoreError> {
        let mut pattern = short_id.replace('-', "").to_lowercase();
        pattern.push('%');

        let classes = sqlx::query_as("SELECT * FROM classes WHERE lower(hex(id)) LIKE ?")
            .bind(pattern)
            .fetch_all(self.pool())
            .await?;
        Ok(classes)
    }

    async fn find_classes(&self) -> Result<Vec<SchoolClass>, CoreError> {
        let classes = sqlx::query_as("SELECT * FROM classes ORDER BY name")
            .fetch_all(self.pool())
            .await?;
        Ok(classes)
    }

    async fn update_class(&self, id: Uuid, data: UpdateClassData) -> Result<SchoolClass, CoreError> {
        let mut tx = self.pool().begin().await?;

        let existing: Option<SchoolClass> = sqlx::query_as("SELECT * FROM classes WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        if existing.is_none() {
            return Err(CoreError::NotFound(format!("Class with id {} not found", id)));
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE classes SET ");
        let mut updated = false;

        if let Some(name) = &data.name {
            if name.trim().is_empty() {
                return Err(CoreError::InvalidInput(
                    "Class name must not be empty".to_string(),
                ));
            }
            qb.push("name = ");
            qb.push_bind(name);
            updated = true;
        }

        if let Some(subject) = &data.subject {
            if updated {
                qb.push(", ");
            }
            qb.push("subject = ");
            qb.push_bind(subject);
            updated = true;
        }

        if let Some(level) = &data.level {
            if updated {
                qb.push(", ");
            }
            qb.push("level = ");
            qb.push_bind(level);
            updated = true;
        }

        if let Some(tutor) = &data.tutor {
            if updated {
                qb.push(", ");
            }
            qb.push("tutor = ");
            qb.push_bind(tutor);
            updated = true;
        }

        if updated {
            qb.push(", updated_at = ");
            qb.push_bind(Utc::now());
            qb.push(" WHERE id = ");
            qb.push_bind(id);
            qb.build().execute(&mut *tx).await?;
        }

        let class: SchoolClass = sqlx::query_as("SELECT * FROM classes WHERE id = $1")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(class)
    }

    async fn delete_class(&self, id: Uuid) -> Result<(), CoreError> {
        let mut tx = self.pool().begin().await?;

        let class: Option<SchoolClass> = sqlx::query_as("SELECT * FROM classes WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        if class.is_none() {
            return Err(CoreError::NotFound(format!("Class with id {} not found", id)));
        }

        // Overrides cascade off patterns, patterns and events off the class.
        sqlx::query(
            "DELETE FROM pattern_overrides WHERE pattern_id IN (SELECT id FROM weekly_patterns WHERE class_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM weekly_patterns WHERE class_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM adhoc_events WHERE class_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM classes WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
