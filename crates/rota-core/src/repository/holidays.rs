use crate::error::CoreError;
use crate::models::Holiday;
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

#[async_trait]
impl super::HolidayRepository for SqliteRepository {
    async fn add_holiday(
        &self,
        date: NaiveDate,
        name: Option<String>,
    ) -> Result<Holiday, CoreError> {
        let holiday = Holiday {
            date,
            name,
            created_at: Utc::now(),
        };

        // Adding the same date twice refreshes the name; the exclusion set
        // stays a set.
        sqlx::query(
            r#"INSERT INTO holidays (date, name, created_at) VALUES ($1, $2, $3)
            ON CONFLICT(date) DO UPDATE SET name = excluded.name"#,
        )
        .bind(holiday.date)
        .bind(&holiday.name)
        .bind(holiday.created_at)
        .execute(self.pool())
        .await?;

        Ok(holiday)
    }

    async fn find_holidays(&self) -> Result<Vec<Holiday>, CoreError> {
        let holidays = sqlx::query_as("SELECT * FROM holidays ORDER BY date")
            .fetch_all(self.pool())
            .await?;
        Ok(holidays)
    }

    async fn remove_holiday(&self, date: NaiveDate) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM holidays WHERE date = $1")
            .bind(date)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("No holiday on {}", date)));
        }

        Ok(())
    }
}
