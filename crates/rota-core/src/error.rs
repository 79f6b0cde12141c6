use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid schedule window: {0}")]
    InvalidWindow(String),

    #[error("Ambiguous short ID. Did you mean one of these?")]
    AmbiguousId(Vec<(String, String)>), // Vec of (ID, Name)

    /// A write from a mutation plan failed. `step`/`of` identify which write
    /// of the plan broke, so a caller of the two-write "move" can tell a
    /// failed suppression from a failed re-insertion and decide whether to
    /// compensate. Prior writes of the plan are left in place.
    #[error("Override write {step} of {of} failed for pattern {pattern_id} on {date}")]
    OverrideWriteFailed {
        step: usize,
        of: usize,
        pattern_id: Uuid,
        date: NaiveDate,
        #[source]
        source: Box<CoreError>,
    },
}
