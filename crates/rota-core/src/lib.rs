//! # Rota Core Library
//!
//! School timetable administration: weekly recurring patterns expanded into
//! concrete dated occurrences, with per-date overrides (time changes,
//! cancellations, one-off moves), school-wide holiday exclusions, and an
//! overlay of ad-hoc single-date events.
//!
//! ## Features
//!
//! - **Weekly Patterns**: one recurrence granularity — weekly by weekday,
//!   bounded by an optional validity window
//! - **Per-Date Overrides**: keyed by `(pattern, date)`; a second write to
//!   the same key updates in place, and cancellations are retained so
//!   suppression stays idempotent and auditable
//! - **Pure Resolution**: `schedule::resolve` recomputes the occurrence
//!   list from its inputs on every call, with no hidden state
//! - **Two-Phase Moves**: moving an occurrence is an explicit pair of
//!   override writes, surfaced as such to the caller
//!
//! ## Core Modules
//!
//! - [`db`]: database connection and schema management
//! - [`models`]: rows and transfer objects
//! - [`repository`]: data access layer with the Repository pattern
//! - [`schedule`]: the calendar engine (expansion, resolution, mutation planning)
//! - [`error`]: error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use rota_core::{
//!     db,
//!     repository::{Repository, SqliteRepository},
//!     schedule::ScheduleWindow,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = db::establish_connection("rota.db").await?;
//!     let repo = SqliteRepository::new(pool);
//!
//!     let from = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
//!     let window = ScheduleWindow::starting_at(from, 14)?;
//!     let resolution = repo.resolve_schedule(window).await?;
//!
//!     for occ in &resolution.occurrences {
//!         println!("{} {}-{}", occ.date, occ.starts_at, occ.ends_at);
//!     }
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod schedule;
