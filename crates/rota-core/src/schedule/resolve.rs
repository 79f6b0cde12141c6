use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use super::{pattern_dates, OverrideIndex, ScheduleWindow};
use crate::models::{AdhocEvent, EventKind, Holiday, PatternOverride, WeeklyPattern};

/// Where a resolved occurrence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccurrenceKind {
    /// Derived from a weekly pattern (possibly through an override).
    Pattern,
    /// A standalone ad-hoc record that matched no pattern occurrence.
    Event,
}

/// Ad-hoc record folded into a coinciding pattern occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBadge {
    pub event_id: Uuid,
    pub title: String,
    pub kind: EventKind,
}

/// One concrete dated instance. Derived on every resolution call, never
/// persisted; carries enough identity (pattern id + date, or event id) for a
/// caller to route an edit back into the mutation planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub kind: OccurrenceKind,
    /// Owning class; None only for school-wide ad-hoc events.
    pub class_id: Option<Uuid>,
    pub pattern_id: Option<Uuid>,
    pub event_id: Option<Uuid>,
    pub date: NaiveDate,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
    /// Identity of the applied override, if any. Edits target this row
    /// instead of inserting a duplicate at the same natural key.
    pub override_id: Option<Uuid>,
    /// True when the occurrence was surfaced by the residual pass, i.e. it
    /// was moved off its pattern's natural weekday.
    pub moved: bool,
    pub badge: Option<EventBadge>,
    /// Pattern ordering position; ad-hoc occurrences sort after patterns.
    pub position: i64,
    /// Display title for ad-hoc occurrences.
    pub title: Option<String>,
}

/// A per-pattern failure that was skipped over; never aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionIssue {
    pub pattern_id: Uuid,
    pub message: String,
}

/// Output of one resolution call: the ordered occurrence list plus every
/// input row the resolver had to skip.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub occurrences: Vec<Occurrence>,
    pub issues: Vec<ResolutionIssue>,
}

/// Resolves the authoritative occurrence list for a window.
///
/// Per pattern: expand the weekly dates, drop holidays, apply the override
/// at each `(pattern_id, date)` key (cancellation suppresses, replacement
/// times win over base times). A residual pass then surfaces overrides whose
/// date the expander would never produce, which is how one-off moves become
/// visible. A consumed-id set guarantees each override contributes at most
/// one occurrence across the two passes. Finally the ad-hoc overlay folds
/// single-date records into coinciding occurrences or emits them standalone.
///
/// Resolution is idempotent: identical inputs give identical output.
pub fn resolve(
    patterns: &[WeeklyPattern],
    overrides: &[PatternOverride],
    holidays: &[Holiday],
    events: &[AdhocEvent],
    window: ScheduleWindow,
) -> Resolution {
    let pattern_map: HashMap<Uuid, &WeeklyPattern> =
        patterns.iter().map(|p| (p.id, p)).collect();
    let index = OverrideIndex::build(overrides, &pattern_map);
    let holiday_set: HashSet<NaiveDate> = holidays.iter().map(|h| h.date).collect();

    let mut occurrences = Vec::new();
    let mut issues = Vec::new();
    // Local accumulator scoped to this call: override ids that already
    // produced (or suppressed) an occurrence.
    let mut consumed: HashSet<Uuid> = HashSet::new();

    for pattern in patterns {
        if !pattern.has_valid_times() {
            issues.push(ResolutionIssue {
                pattern_id: pattern.id,
                message: format!(
                    "base times are not a valid interval ({} >= {})",
                    pattern.starts_at, pattern.ends_at
                ),
            });
            continue;
        }

        for date in pattern_dates(pattern, window) {
            if holiday_set.contains(&date) {
                continue;
            }
            match index.get(pattern.id, date) {
                Some(ov) if ov.cancelled => {
                    // Suppressed, but the override still counts as spent.
                    consumed.insert(ov.id);
                }
                Some(ov) => {
                    consumed.insert(ov.id);
                    occurrences.push(Occurrence {
                        kind: OccurrenceKind::Pattern,
                        class_id: Some(pattern.class_id),
                        pattern_id: Some(pattern.id),
                        event_id: None,
                        date,
                        starts_at: ov.starts_at.unwrap_or(pattern.starts_at),
                        ends_at: ov.ends_at.unwrap_or(pattern.ends_at),
                        override_id: Some(ov.id),
                        moved: false,
                        badge: None,
                        position: pattern.position,
                        title: None,
                    });
                }
                None => {
                    occurrences.push(Occurrence {
                        kind: OccurrenceKind::Pattern,
                        class_id: Some(pattern.class_id),
                        pattern_id: Some(pattern.id),
                        event_id: None,
                        date,
                        starts_at: pattern.starts_at,
                        ends_at: pattern.ends_at,
                        override_id: None,
                        moved: false,
                        badge: None,
                        position: pattern.position,
                        title: None,
                    });
                }
            }
        }
    }

    // Residual pass: overrides moved off their pattern's natural expansion.
    for ov in index.moved() {
        if ov.cancelled || consumed.contains(&ov.id) {
            continue;
        }
        if !window.contains(ov.date) || holiday_set.contains(&ov.date) {
            continue;
        }
        // The moved list only ever references known patterns.
        let pattern = pattern_map[&ov.pattern_id];
        if !pattern.has_valid_times() {
            continue;
        }
        consumed.insert(ov.id);
        occurrences.push(Occurrence {
            kind: OccurrenceKind::Pattern,
            class_id: Some(pattern.class_id),
            pattern_id: Some(pattern.id),
            event_id: None,
            date: ov.date,
            starts_at: ov.starts_at.unwrap_or(pattern.starts_at),
            ends_at: ov.ends_at.unwrap_or(pattern.ends_at),
            override_id: Some(ov.id),
            moved: true,
            badge: None,
            position: pattern.position,
            title: None,
        });
    }

    for ov in index.orphaned() {
        issues.push(ResolutionIssue {
            pattern_id: ov.pattern_id,
            message: format!("override on {} targets an unknown pattern", ov.date),
        });
    }

    sort_occurrences(&mut occurrences);
    overlay_events(&mut occurrences, events, &holiday_set, window);
    sort_occurrences(&mut occurrences);

    Resolution {
        occurrences,
        issues,
    }
}

/// Output order: date, then pattern position, then start time.
fn sort_occurrences(occurrences: &mut [Occurrence]) {
    occurrences.sort_by(|a, b| {
        (a.date, a.position, a.starts_at).cmp(&(b.date, b.position, b.starts_at))
    });
}

/// Merges ad-hoc single-date records into the occurrence list.
///
/// Records group by `(class, date)`. The first record of a group that
/// coincides with a pattern occurrence becomes that occurrence's badge and
/// consumes the whole group; records of groups never consumed surface as
/// standalone occurrences, subject to the same window and holiday rules.
/// Later records of a consumed group are not re-surfaced.
fn overlay_events(
    occurrences: &mut Vec<Occurrence>,
    events: &[AdhocEvent],
    holidays: &HashSet<NaiveDate>,
    window: ScheduleWindow,
) {
    let mut groups: HashMap<(Option<Uuid>, NaiveDate), &AdhocEvent> = HashMap::new();
    for ev in events {
        // First record per key wins the fold slot; insertion order decides.
        groups.entry((ev.class_id, ev.date)).or_insert(ev);
    }

    let mut consumed_keys: HashSet<(Option<Uuid>, NaiveDate)> = HashSet::new();

    for occ in occurrences.iter_mut() {
        if occ.kind != OccurrenceKind::Pattern {
            continue;
        }
        let key = (occ.class_id, occ.date);
        if consumed_keys.contains(&key) {
            continue;
        }
        if let Some(first) = groups.get(&key) {
            occ.badge = Some(EventBadge {
                event_id: first.id,
                title: first.title.clone(),
                kind: first.kind,
            });
            consumed_keys.insert(key);
        }
    }

    for ev in events {
        if consumed_keys.contains(&(ev.class_id, ev.date)) {
            continue;
        }
        if !window.contains(ev.date) || holidays.contains(&ev.date) {
            continue;
        }
        occurrences.push(Occurrence {
            kind: OccurrenceKind::Event,
            class_id: ev.class_id,
            pattern_id: None,
            event_id: Some(ev.id),
            date: ev.date,
            starts_at: ev.starts_at,
            ends_at: ev.ends_at,
            override_id: None,
            moved: false,
            badge: None,
            position: i64::MAX,
            title: Some(ev.title.clone()),
        });
    }
}
