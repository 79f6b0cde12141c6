use chrono::{NaiveDate, NaiveTime};
use rota_core::db::establish_connection;
use rota_core::models::*;
use rota_core::repository::{
    ClassRepository, EventRepository, HolidayRepository, OverrideRepository, PatternRepository,
    ProgramRepository, Repository, SqliteRepository,
};
use rota_core::schedule::{
    plan_mutation, OccurrenceChange, OccurrenceKind, ScheduleWindow,
};
use tempfile::TempDir;
use uuid::Uuid;

/// Helper function to create a test database
async fn setup_test_db() -> (SqliteRepository, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");

    let pool = establish_connection(&db_path.to_string_lossy())
        .await
        .expect("Failed to establish test database connection");

    (SqliteRepository::new(pool), temp_dir)
}

/// Helper function to create a test class
async fn create_test_class(repo: &SqliteRepository, name: &str) -> SchoolClass {
    repo.add_class(NewClassData {
        name: name.to_string(),
        subject: Some("Mathematics".to_string()),
        level: Some("B2".to_string()),
        tutor: None,
    })
    .await
    .expect("Failed to create test class")
}

/// Helper function to create a Monday 18:00-19:00 pattern for a class
async fn create_monday_pattern(repo: &SqliteRepository, class_id: Uuid) -> WeeklyPattern {
    repo.add_pattern(NewPatternData {
        class_id,
        weekday: PatternDay::Monday,
        starts_at: t(18, 0),
        ends_at: t(19, 0),
        valid_from: None,
        valid_until: None,
        position: None,
    })
    .await
    .expect("Failed to create test pattern")
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn t(h: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, min, 0).unwrap()
}

/// Two full weeks starting Monday 2026-03-02.
fn two_weeks() -> ScheduleWindow {
    ScheduleWindow::new(d(2026, 3, 2), d(2026, 3, 16)).unwrap()
}

#[tokio::test]
async fn test_class_crud_workflow() {
    let (repo, _temp_dir) = setup_test_db().await;

    let class = create_test_class(&repo, "Algebra II").await;
    assert_eq!(class.name, "Algebra II");
    assert_eq!(class.subject.as_deref(), Some("Mathematics"));

    let fetched = repo
        .find_class_by_id(class.id)
        .await
        .expect("lookup failed")
        .expect("class missing");
    assert_eq!(fetched.name, class.name);

    let updated = repo
        .update_class(
            class.id,
            UpdateClassData {
                name: Some("Algebra III".to_string()),
                tutor: Some(Some("N. Petrov".to_string())),
                ..Default::default()
            },
        )
        .await
        .expect("update failed");
    assert_eq!(updated.name, "Algebra III");
    assert_eq!(updated.tutor.as_deref(), Some("N. Petrov"));

    repo.delete_class(class.id).await.expect("delete failed");
    assert!(repo.find_class_by_id(class.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_program_is_created_once_on_first_access() {
    let (repo, _temp_dir) = setup_test_db().await;

    let first = repo.ensure_program().await.expect("ensure failed");
    let second = repo.ensure_program().await.expect("ensure failed");
    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn test_pattern_validation_and_positioning() {
    let (repo, _temp_dir) = setup_test_db().await;
    let class = create_test_class(&repo, "Physics").await;

    // Inverted times are rejected up front.
    let inverted = repo
        .add_pattern(NewPatternData {
            class_id: class.id,
            weekday: PatternDay::Monday,
            starts_at: t(19, 0),
            ends_at: t(18, 0),
            valid_from: None,
            valid_until: None,
            position: None,
        })
        .await;
    assert!(inverted.is_err());

    // Unknown class is rejected.
    let orphan = repo
        .add_pattern(NewPatternData {
            class_id: Uuid::now_v7(),
            weekday: PatternDay::Monday,
            starts_at: t(18, 0),
            ends_at: t(19, 0),
            valid_from: None,
            valid_until: None,
            position: None,
        })
        .await;
    assert!(orphan.is_err());

    // Positions append per weekday.
    let first = create_monday_pattern(&repo, class.id).await;
    let second = create_monday_pattern(&repo, class.id).await;
    assert_eq!(first.position, 0);
    assert_eq!(second.position, 1);
}

#[tokio::test]
async fn test_plain_resolution_two_mondays() {
    let (repo, _temp_dir) = setup_test_db().await;
    let class = create_test_class(&repo, "History").await;
    create_monday_pattern(&repo, class.id).await;

    let resolution = repo.resolve_schedule(two_weeks()).await.expect("resolve failed");
    assert_eq!(resolution.occurrences.len(), 2);
    assert_eq!(resolution.occurrences[0].date, d(2026, 3, 2));
    assert_eq!(resolution.occurrences[1].date, d(2026, 3, 9));
    assert!(resolution.issues.is_empty());
}

#[tokio::test]
async fn test_override_upsert_is_idempotent_at_the_natural_key() {
    let (repo, _temp_dir) = setup_test_db().await;
    let class = create_test_class(&repo, "Chemistry").await;
    let pattern = create_monday_pattern(&repo, class.id).await;

    let resolution = repo.resolve_schedule(two_weeks()).await.unwrap();
    let occurrence = resolution.occurrences[0].clone();

    // First retime inserts.
    let writes = plan_mutation(
        &occurrence,
        OccurrenceChange::Retime {
            starts_at: t(17, 0),
            ends_at: t(18, 0),
        },
        &[],
    )
    .unwrap();
    repo.apply_override_writes(writes).await.expect("first write failed");

    // Second retime at the same key must update, not duplicate.
    let resolution = repo.resolve_schedule(two_weeks()).await.unwrap();
    let occurrence = resolution.occurrences[0].clone();
    assert!(occurrence.override_id.is_some());

    let existing = repo.find_overrides_for_pattern(pattern.id).await.unwrap();
    let writes = plan_mutation(
        &occurrence,
        OccurrenceChange::Retime {
            starts_at: t(16, 0),
            ends_at: t(17, 0),
        },
        &existing,
    )
    .unwrap();
    repo.apply_override_writes(writes).await.expect("second write failed");

    let overrides = repo.find_overrides_for_pattern(pattern.id).await.unwrap();
    assert_eq!(overrides.len(), 1);
    assert_eq!(overrides[0].starts_at, Some(t(16, 0)));

    let resolution = repo.resolve_schedule(two_weeks()).await.unwrap();
    assert_eq!(resolution.occurrences[0].starts_at, t(16, 0));
}

#[tokio::test]
async fn test_cancel_one_keeps_the_series_running() {
    let (repo, _temp_dir) = setup_test_db().await;
    let class = create_test_class(&repo, "Biology").await;
    let pattern = create_monday_pattern(&repo, class.id).await;

    let resolution = repo.resolve_schedule(two_weeks()).await.unwrap();
    let first_monday = resolution.occurrences[0].clone();

    let writes = plan_mutation(&first_monday, OccurrenceChange::CancelOne, &[]).unwrap();
    repo.apply_override_writes(writes).await.expect("cancel failed");

    let resolution = repo.resolve_schedule(two_weeks()).await.unwrap();
    assert_eq!(resolution.occurrences.len(), 1);
    assert_eq!(resolution.occurrences[0].date, d(2026, 3, 9));

    // The suppression row is retained, not deleted.
    let overrides = repo.find_overrides_for_pattern(pattern.id).await.unwrap();
    assert_eq!(overrides.len(), 1);
    assert!(overrides[0].cancelled);

    // The pattern row itself is untouched.
    let unchanged = repo.find_pattern_by_id(pattern.id).await.unwrap().unwrap();
    assert_eq!(unchanged.weekday, pattern.weekday);
    assert_eq!(unchanged.starts_at, pattern.starts_at);
}

#[tokio::test]
async fn test_move_shows_up_on_the_new_date_after_re_resolution() {
    let (repo, _temp_dir) = setup_test_db().await;
    let class = create_test_class(&repo, "Literature").await;
    let pattern = create_monday_pattern(&repo, class.id).await;

    let resolution = repo.resolve_schedule(two_weeks()).await.unwrap();
    let first_monday = resolution.occurrences[0].clone();

    // Move to the following Wednesday, 10:00-11:00.
    let writes = plan_mutation(
        &first_monday,
        OccurrenceChange::MoveTo {
            date: d(2026, 3, 4),
            starts_at: Some(t(10, 0)),
            ends_at: Some(t(11, 0)),
        },
        &[],
    )
    .unwrap();
    assert_eq!(writes.len(), 2);
    repo.apply_override_writes(writes).await.expect("move failed");

    let resolution = repo.resolve_schedule(two_weeks()).await.unwrap();
    let dates: Vec<_> = resolution.occurrences.iter().map(|o| o.date).collect();
    assert_eq!(dates, vec![d(2026, 3, 4), d(2026, 3, 9)]);

    let wednesday = &resolution.occurrences[0];
    assert!(wednesday.moved);
    assert_eq!(wednesday.starts_at, t(10, 0));
    assert_eq!(wednesday.ends_at, t(11, 0));
    assert_eq!(wednesday.pattern_id, Some(pattern.id));
}

#[tokio::test]
async fn test_holiday_suppresses_at_resolution_even_for_overrides_written_earlier() {
    let (repo, _temp_dir) = setup_test_db().await;
    let class = create_test_class(&repo, "Geography").await;
    create_monday_pattern(&repo, class.id).await;

    // Move the first Monday onto a Wednesday...
    let resolution = repo.resolve_schedule(two_weeks()).await.unwrap();
    let first_monday = resolution.occurrences[0].clone();
    let writes = plan_mutation(
        &first_monday,
        OccurrenceChange::MoveTo {
            date: d(2026, 3, 4),
            starts_at: None,
            ends_at: None,
        },
        &[],
    )
    .unwrap();
    repo.apply_override_writes(writes).await.unwrap();

    // ...then declare that Wednesday a holiday, after the override exists.
    repo.add_holiday(d(2026, 3, 4), Some("Founders day".to_string()))
        .await
        .unwrap();

    let resolution = repo.resolve_schedule(two_weeks()).await.unwrap();
    assert!(resolution.occurrences.iter().all(|o| o.date != d(2026, 3, 4)));
    // The second Monday is still there.
    assert_eq!(resolution.occurrences.len(), 1);
    assert_eq!(resolution.occurrences[0].date, d(2026, 3, 9));
}

#[tokio::test]
async fn test_adhoc_event_folds_or_stands_alone() {
    let (repo, _temp_dir) = setup_test_db().await;
    let class = create_test_class(&repo, "Grammar").await;
    create_monday_pattern(&repo, class.id).await;

    // Coincides with the first Monday occurrence: folds as a badge.
    repo.add_event(NewEventData {
        class_id: Some(class.id),
        date: d(2026, 3, 2),
        starts_at: t(18, 0),
        ends_at: t(19, 0),
        title: "Midterm".to_string(),
        kind: EventKind::Test,
    })
    .await
    .unwrap();

    // School-wide event on a free day: standalone.
    repo.add_event(NewEventData {
        class_id: None,
        date: d(2026, 3, 5),
        starts_at: t(12, 0),
        ends_at: t(14, 0),
        title: "Open doors".to_string(),
        kind: EventKind::Event,
    })
    .await
    .unwrap();

    let resolution = repo.resolve_schedule(two_weeks()).await.unwrap();
    assert_eq!(resolution.occurrences.len(), 3);

    let decorated = resolution
        .occurrences
        .iter()
        .find(|o| o.badge.is_some())
        .expect("badge folded");
    assert_eq!(decorated.date, d(2026, 3, 2));
    assert_eq!(decorated.kind, OccurrenceKind::Pattern);
    assert_eq!(decorated.badge.as_ref().unwrap().title, "Midterm");

    let standalone = resolution
        .occurrences
        .iter()
        .find(|o| o.kind == OccurrenceKind::Event)
        .expect("standalone event");
    assert_eq!(standalone.date, d(2026, 3, 5));
    assert_eq!(standalone.class_id, None);
}

#[tokio::test]
async fn test_holiday_add_is_idempotent_and_removable() {
    let (repo, _temp_dir) = setup_test_db().await;

    repo.add_holiday(d(2026, 3, 9), None).await.unwrap();
    repo.add_holiday(d(2026, 3, 9), Some("Spring break".to_string()))
        .await
        .unwrap();

    let holidays = repo.find_holidays().await.unwrap();
    assert_eq!(holidays.len(), 1);
    assert_eq!(holidays[0].name.as_deref(), Some("Spring break"));

    repo.remove_holiday(d(2026, 3, 9)).await.unwrap();
    assert!(repo.find_holidays().await.unwrap().is_empty());
    assert!(repo.remove_holiday(d(2026, 3, 9)).await.is_err());
}

#[tokio::test]
async fn test_deleting_a_pattern_removes_its_overrides() {
    let (repo, _temp_dir) = setup_test_db().await;
    let class = create_test_class(&repo, "Music").await;
    let pattern = create_monday_pattern(&repo, class.id).await;

    let resolution = repo.resolve_schedule(two_weeks()).await.unwrap();
    let writes =
        plan_mutation(&resolution.occurrences[0], OccurrenceChange::CancelOne, &[]).unwrap();
    repo.apply_override_writes(writes).await.unwrap();

    repo.delete_pattern(pattern.id).await.unwrap();
    assert!(repo.find_overrides().await.unwrap().is_empty());

    let resolution = repo.resolve_schedule(two_weeks()).await.unwrap();
    assert!(resolution.occurrences.is_empty());
    assert!(resolution.issues.is_empty());
}

#[tokio::test]
async fn test_short_id_prefix_resolution() {
    let (repo, _temp_dir) = setup_test_db().await;
    let class = create_test_class(&repo, "Drama").await;

    let prefix: String = class.id.to_string().chars().take(7).collect();
    let matches = repo
        .find_classes_by_short_id_prefix(&prefix)
        .await
        .expect("prefix lookup failed");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, class.id);
}
