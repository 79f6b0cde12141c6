use chrono::{NaiveDate, NaiveTime, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rota_core::models::{PatternDay, PatternOverride, WeeklyPattern};
use rota_core::schedule::{pattern_dates, resolve, ScheduleWindow};
use uuid::Uuid;

const DAYS: [PatternDay; 7] = [
    PatternDay::Monday,
    PatternDay::Tuesday,
    PatternDay::Wednesday,
    PatternDay::Thursday,
    PatternDay::Friday,
    PatternDay::Saturday,
    PatternDay::Sunday,
];

fn t(h: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, min, 0).unwrap()
}

fn create_test_pattern(weekday: PatternDay, position: i64) -> WeeklyPattern {
    WeeklyPattern {
        id: Uuid::now_v7(),
        program_id: Uuid::now_v7(),
        class_id: Uuid::now_v7(),
        weekday,
        starts_at: t(9, 0),
        ends_at: t(10, 30),
        valid_from: None,
        valid_until: None,
        position,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn create_test_fleet(count: usize) -> Vec<WeeklyPattern> {
    (0..count)
        .map(|i| create_test_pattern(DAYS[i % DAYS.len()], (i / DAYS.len()) as i64))
        .collect()
}

fn scatter_overrides(patterns: &[WeeklyPattern], window: ScheduleWindow) -> Vec<PatternOverride> {
    let span = (window.end() - window.start()).num_days();
    patterns
        .iter()
        .map(|p| PatternOverride {
            id: Uuid::now_v7(),
            pattern_id: p.id,
            date: window.start() + chrono::Duration::days(fastrand::i64(0..span)),
            starts_at: Some(t(11, 0)),
            ends_at: Some(t(12, 0)),
            cancelled: fastrand::bool(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
        .collect()
}

fn year_window() -> ScheduleWindow {
    let from = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    ScheduleWindow::starting_at(from, 365).unwrap()
}

fn bench_pattern_expansion_year(c: &mut Criterion) {
    let pattern = create_test_pattern(PatternDay::Monday, 0);
    let window = year_window();

    c.bench_function("pattern_expansion_one_year", |b| {
        b.iter(|| pattern_dates(black_box(&pattern), black_box(window)).count())
    });
}

fn bench_resolve_hundred_patterns(c: &mut Criterion) {
    let patterns = create_test_fleet(100);
    let window = year_window();
    let overrides = scatter_overrides(&patterns, window);

    c.bench_function("resolve_100_patterns_one_year", |b| {
        b.iter(|| {
            resolve(
                black_box(&patterns),
                black_box(&overrides),
                &[],
                &[],
                window,
            )
        })
    });
}

criterion_group!(benches, bench_pattern_expansion_year, bench_resolve_hundred_patterns);
criterion_main!(benches);
