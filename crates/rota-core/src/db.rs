use crate::error::CoreError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Executor, SqlitePool};
use std::str::FromStr;

pub type DbPool = SqlitePool;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS programs (
    id          BLOB PRIMARY KEY,
    name        TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS classes (
    id          BLOB PRIMARY KEY,
    name        TEXT NOT NULL,
    subject     TEXT,
    level       TEXT,
    tutor       TEXT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS weekly_patterns (
    id          BLOB PRIMARY KEY,
    program_id  BLOB NOT NULL REFERENCES programs(id),
    class_id    BLOB NOT NULL REFERENCES classes(id) ON DELETE CASCADE,
    weekday     TEXT NOT NULL,
    starts_at   TEXT NOT NULL,
    ends_at     TEXT NOT NULL,
    valid_from  TEXT,
    valid_until TEXT,
    position    INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS pattern_overrides (
    id          BLOB PRIMARY KEY,
    pattern_id  BLOB NOT NULL REFERENCES weekly_patterns(id) ON DELETE CASCADE,
    date        TEXT NOT NULL,
    starts_at   TEXT,
    ends_at     TEXT,
    cancelled   INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL,
    UNIQUE(pattern_id, date)
);

CREATE TABLE IF NOT EXISTS holidays (
    date        TEXT PRIMARY KEY,
    name        TEXT,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS adhoc_events (
    id          BLOB PRIMARY KEY,
    class_id    BLOB REFERENCES classes(id) ON DELETE CASCADE,
    date        TEXT NOT NULL,
    starts_at   TEXT NOT NULL,
    ends_at     TEXT NOT NULL,
    title       TEXT NOT NULL,
    kind        TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_patterns_program ON weekly_patterns(program_id);
CREATE INDEX IF NOT EXISTS idx_overrides_pattern_date ON pattern_overrides(pattern_id, date);
CREATE INDEX IF NOT EXISTS idx_events_date ON adhoc_events(date);
"#;

/// Open (creating if missing) the SQLite database at `database_url` and
/// apply the schema. The DDL is idempotent, so this is safe on every start.
pub async fn establish_connection(database_url: &str) -> Result<DbPool, CoreError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    // Raw execute: the schema string holds multiple statements.
    pool.execute(SCHEMA).await?;

    Ok(pool)
}
