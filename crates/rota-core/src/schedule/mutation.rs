use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use super::resolve::{Occurrence, OccurrenceKind};
use crate::error::CoreError;
use crate::models::PatternOverride;

/// Requested change to one resolved occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OccurrenceChange {
    /// New times on the same date.
    Retime {
        starts_at: NaiveTime,
        ends_at: NaiveTime,
    },
    /// Suppress this single date; the weekly series continues.
    CancelOne,
    /// Move this single date elsewhere. Times omitted → the pattern's base
    /// times apply on the new date.
    MoveTo {
        date: NaiveDate,
        starts_at: Option<NaiveTime>,
        ends_at: Option<NaiveTime>,
    },
}

/// One upsert intent against the override store. `id` present means the
/// natural key is already occupied and that row must be updated in place;
/// absent means insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideWrite {
    pub id: Option<Uuid>,
    pub pattern_id: Uuid,
    pub date: NaiveDate,
    pub starts_at: Option<NaiveTime>,
    pub ends_at: Option<NaiveTime>,
    pub cancelled: bool,
}

/// Computes the minimal override writes realizing a single-occurrence edit.
///
/// The underlying pattern is never touched: a retime or cancellation is one
/// upsert at `(pattern_id, original_date)`, and a move is an explicit
/// two-phase intent — suppress the natural date, then upsert the target
/// date. The caller executes the writes (and picks the transactional
/// semantics for the pair) and re-runs resolution afterwards.
pub fn plan_mutation(
    occurrence: &Occurrence,
    change: OccurrenceChange,
    existing: &[PatternOverride],
) -> Result<Vec<OverrideWrite>, CoreError> {
    let pattern_id = match (occurrence.kind, occurrence.pattern_id) {
        (OccurrenceKind::Pattern, Some(id)) => id,
        _ => {
            return Err(CoreError::InvalidInput(
                "only pattern occurrences take overrides; edit the ad-hoc record directly"
                    .to_string(),
            ))
        }
    };

    let existing_id = |date: NaiveDate| {
        existing
            .iter()
            .find(|ov| ov.pattern_id == pattern_id && ov.date == date)
            .map(|ov| ov.id)
    };
    // The resolver already attributed the override applied on the original
    // date; prefer that identity so the edit updates rather than duplicates.
    let original_id = occurrence.override_id.or_else(|| existing_id(occurrence.date));

    match change {
        OccurrenceChange::Retime { starts_at, ends_at } => {
            if starts_at >= ends_at {
                return Err(CoreError::InvalidInput(format!(
                    "start time {} must be before end time {}",
                    starts_at, ends_at
                )));
            }
            Ok(vec![OverrideWrite {
                id: original_id,
                pattern_id,
                date: occurrence.date,
                starts_at: Some(starts_at),
                ends_at: Some(ends_at),
                cancelled: false,
            }])
        }
        OccurrenceChange::CancelOne => Ok(vec![OverrideWrite {
            id: original_id,
            pattern_id,
            date: occurrence.date,
            starts_at: None,
            ends_at: None,
            cancelled: true,
        }]),
        OccurrenceChange::MoveTo {
            date,
            starts_at,
            ends_at,
        } => {
            if date == occurrence.date {
                return Err(CoreError::InvalidInput(
                    "move target equals the occurrence date; use a retime".to_string(),
                ));
            }
            match (starts_at, ends_at) {
                (Some(s), Some(e)) if s >= e => {
                    return Err(CoreError::InvalidInput(format!(
                        "start time {} must be before end time {}",
                        s, e
                    )))
                }
                (Some(_), None) | (None, Some(_)) => {
                    return Err(CoreError::InvalidInput(
                        "move times must be given as a start/end pair or omitted".to_string(),
                    ))
                }
                _ => {}
            }
            Ok(vec![
                OverrideWrite {
                    id: original_id,
                    pattern_id,
                    date: occurrence.date,
                    starts_at: None,
                    ends_at: None,
                    cancelled: true,
                },
                OverrideWrite {
                    id: existing_id(date),
                    pattern_id,
                    date,
                    starts_at,
                    ends_at,
                    cancelled: false,
                },
            ])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(h: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, min, 0).unwrap()
    }

    fn base_occurrence(pattern_id: Uuid) -> Occurrence {
        Occurrence {
            kind: OccurrenceKind::Pattern,
            class_id: Some(Uuid::now_v7()),
            pattern_id: Some(pattern_id),
            event_id: None,
            date: d(2026, 3, 2),
            starts_at: t(18, 0),
            ends_at: t(19, 0),
            override_id: None,
            moved: false,
            badge: None,
            position: 0,
            title: None,
        }
    }

    fn override_row(pattern_id: Uuid, date: NaiveDate) -> PatternOverride {
        PatternOverride {
            id: Uuid::now_v7(),
            pattern_id,
            date,
            starts_at: None,
            ends_at: None,
            cancelled: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn retime_plans_a_single_fresh_upsert() {
        let pattern_id = Uuid::now_v7();
        let occ = base_occurrence(pattern_id);

        let writes = plan_mutation(
            &occ,
            OccurrenceChange::Retime {
                starts_at: t(17, 0),
                ends_at: t(18, 30),
            },
            &[],
        )
        .unwrap();

        assert_eq!(writes.len(), 1);
        let w = &writes[0];
        assert_eq!(w.id, None);
        assert_eq!(w.pattern_id, pattern_id);
        assert_eq!(w.date, occ.date);
        assert_eq!(w.starts_at, Some(t(17, 0)));
        assert!(!w.cancelled);
    }

    #[test]
    fn retime_reuses_the_occurrence_override_identity() {
        let pattern_id = Uuid::now_v7();
        let mut occ = base_occurrence(pattern_id);
        let applied = Uuid::now_v7();
        occ.override_id = Some(applied);

        let writes = plan_mutation(
            &occ,
            OccurrenceChange::Retime {
                starts_at: t(17, 0),
                ends_at: t(18, 0),
            },
            &[],
        )
        .unwrap();
        assert_eq!(writes[0].id, Some(applied));
    }

    #[test]
    fn retime_rejects_inverted_times() {
        let occ = base_occurrence(Uuid::now_v7());
        let result = plan_mutation(
            &occ,
            OccurrenceChange::Retime {
                starts_at: t(19, 0),
                ends_at: t(18, 0),
            },
            &[],
        );
        assert!(matches!(result, Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn cancel_clears_times_and_sets_the_flag() {
        let pattern_id = Uuid::now_v7();
        let occ = base_occurrence(pattern_id);

        let writes = plan_mutation(&occ, OccurrenceChange::CancelOne, &[]).unwrap();
        assert_eq!(writes.len(), 1);
        let w = &writes[0];
        assert!(w.cancelled);
        assert_eq!(w.starts_at, None);
        assert_eq!(w.ends_at, None);
    }

    #[test]
    fn move_plans_cancel_then_target_upsert() {
        let pattern_id = Uuid::now_v7();
        let occ = base_occurrence(pattern_id);

        let writes = plan_mutation(
            &occ,
            OccurrenceChange::MoveTo {
                date: d(2026, 3, 4),
                starts_at: Some(t(10, 0)),
                ends_at: Some(t(11, 0)),
            },
            &[],
        )
        .unwrap();

        assert_eq!(writes.len(), 2);
        assert!(writes[0].cancelled);
        assert_eq!(writes[0].date, occ.date);
        assert!(!writes[1].cancelled);
        assert_eq!(writes[1].date, d(2026, 3, 4));
        assert_eq!(writes[1].starts_at, Some(t(10, 0)));
    }

    #[test]
    fn move_reuses_existing_rows_at_both_keys() {
        let pattern_id = Uuid::now_v7();
        let occ = base_occurrence(pattern_id);
        let at_source = override_row(pattern_id, occ.date);
        let at_target = override_row(pattern_id, d(2026, 3, 4));

        let writes = plan_mutation(
            &occ,
            OccurrenceChange::MoveTo {
                date: d(2026, 3, 4),
                starts_at: None,
                ends_at: None,
            },
            &[at_source.clone(), at_target.clone()],
        )
        .unwrap();

        assert_eq!(writes[0].id, Some(at_source.id));
        assert_eq!(writes[1].id, Some(at_target.id));
    }

    #[test]
    fn move_to_the_same_date_is_rejected() {
        let occ = base_occurrence(Uuid::now_v7());
        let result = plan_mutation(
            &occ,
            OccurrenceChange::MoveTo {
                date: occ.date,
                starts_at: None,
                ends_at: None,
            },
            &[],
        );
        assert!(matches!(result, Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn move_rejects_a_lone_time_bound() {
        let occ = base_occurrence(Uuid::now_v7());
        let result = plan_mutation(
            &occ,
            OccurrenceChange::MoveTo {
                date: d(2026, 3, 4),
                starts_at: Some(t(10, 0)),
                ends_at: None,
            },
            &[],
        );
        assert!(matches!(result, Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn adhoc_occurrences_are_not_overridable() {
        let mut occ = base_occurrence(Uuid::now_v7());
        occ.kind = OccurrenceKind::Event;
        occ.pattern_id = None;

        let result = plan_mutation(&occ, OccurrenceChange::CancelOne, &[]);
        assert!(matches!(result, Err(CoreError::InvalidInput(_))));
    }
}
