use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{PatternOverride, WeeklyPattern};

/// Index of overrides by their natural key `(pattern_id, date)`.
///
/// Building the index also classifies each override without re-deriving any
/// expansion: a weekday comparison plus a validity-window containment check
/// is enough to tell whether the pattern's expander would ever produce the
/// override's date. Overrides it would not produce are "moved" one-off
/// occurrences, surfaced by the resolver's residual pass. Overrides whose
/// pattern is absent from the input set cannot be attributed and are kept
/// aside for issue reporting.
pub struct OverrideIndex<'a> {
    keyed: HashMap<(Uuid, NaiveDate), &'a PatternOverride>,
    moved: Vec<&'a PatternOverride>,
    orphaned: Vec<&'a PatternOverride>,
}

impl<'a> OverrideIndex<'a> {
    pub fn build(
        overrides: &'a [PatternOverride],
        patterns: &HashMap<Uuid, &WeeklyPattern>,
    ) -> Self {
        let mut keyed = HashMap::with_capacity(overrides.len());
        let mut moved = Vec::new();
        let mut orphaned = Vec::new();

        for ov in overrides {
            keyed.insert((ov.pattern_id, ov.date), ov);
            match patterns.get(&ov.pattern_id) {
                Some(pattern) => {
                    if !pattern.weekday.matches(ov.date) || !pattern.in_validity_window(ov.date) {
                        moved.push(ov);
                    }
                }
                None => orphaned.push(ov),
            }
        }

        Self {
            keyed,
            moved,
            orphaned,
        }
    }

    /// O(1) natural-key lookup.
    pub fn get(&self, pattern_id: Uuid, date: NaiveDate) -> Option<&'a PatternOverride> {
        self.keyed.get(&(pattern_id, date)).copied()
    }

    /// Overrides whose date the owning pattern would never naturally produce.
    pub fn moved(&self) -> &[&'a PatternOverride] {
        &self.moved
    }

    /// Overrides referencing a pattern id absent from the input set.
    pub fn orphaned(&self) -> &[&'a PatternOverride] {
        &self.orphaned
    }

    pub fn len(&self) -> usize {
        self.keyed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PatternDay, WeeklyPattern};
    use chrono::{NaiveDate, NaiveTime, Utc};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(h: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, min, 0).unwrap()
    }

    fn monday_pattern() -> WeeklyPattern {
        WeeklyPattern {
            id: Uuid::now_v7(),
            program_id: Uuid::now_v7(),
            class_id: Uuid::now_v7(),
            weekday: PatternDay::Monday,
            starts_at: t(18, 0),
            ends_at: t(19, 0),
            valid_from: None,
            valid_until: None,
            position: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn override_on(pattern_id: Uuid, date: NaiveDate) -> PatternOverride {
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
    fn natural_weekday_override_is_keyed_but_not_moved() {
        let pattern = monday_pattern();
        let overrides = vec![override_on(pattern.id, d(2026, 3, 2))]; // a Monday
        let patterns = HashMap::from([(pattern.id, &pattern)]);

        let index = OverrideIndex::build(&overrides, &patterns);
        assert!(index.get(pattern.id, d(2026, 3, 2)).is_some());
        assert!(index.moved().is_empty());
        assert!(index.orphaned().is_empty());
    }

    #[test]
    fn off_weekday_override_is_classified_as_moved() {
        let pattern = monday_pattern();
        let overrides = vec![override_on(pattern.id, d(2026, 3, 4))]; // a Wednesday
        let patterns = HashMap::from([(pattern.id, &pattern)]);

        let index = OverrideIndex::build(&overrides, &patterns);
        assert_eq!(index.moved().len(), 1);
        // Still reachable through the natural key.
        assert!(index.get(pattern.id, d(2026, 3, 4)).is_some());
    }

    #[test]
    fn on_weekday_override_outside_validity_window_is_moved() {
        let mut pattern = monday_pattern();
        pattern.valid_until = Some(d(2026, 3, 2));
        let overrides = vec![override_on(pattern.id, d(2026, 3, 9))]; // Monday, but past validity
        let patterns = HashMap::from([(pattern.id, &pattern)]);

        let index = OverrideIndex::build(&overrides, &patterns);
        assert_eq!(index.moved().len(), 1);
    }

    #[test]
    fn unknown_pattern_reference_is_orphaned() {
        let pattern = monday_pattern();
        let overrides = vec![override_on(Uuid::now_v7(), d(2026, 3, 2))];
        let patterns = HashMap::from([(pattern.id, &pattern)]);

        let index = OverrideIndex::build(&overrides, &patterns);
        assert_eq!(index.orphaned().len(), 1);
        assert!(index.moved().is_empty());
    }
}
