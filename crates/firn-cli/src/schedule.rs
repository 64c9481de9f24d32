//! Scripted environment changes: a sorted list of factor updates applied
//! as the simulation reaches their year, standing in for the sliders a
//! player would move.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use firn_core::environment::EnvFactor;

/// One scripted slider move: in `year`, set `factor` to `value`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledChange {
    pub year: i32,
    pub factor: EnvFactor,
    pub value: f64,
}

/// Changes ordered by year, consumed front to back as the run advances.
#[derive(Debug, Default)]
pub struct Schedule {
    changes: Vec<ScheduledChange>,
    next: usize,
}

impl Schedule {
    /// Load a schedule from a JSON file holding an array of
    /// `{"year", "factor", "value"}` objects.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading schedule {}", path.display()))?;
        let changes: Vec<ScheduledChange> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing schedule {}", path.display()))?;
        Ok(Self::from_changes(changes))
    }

    /// Sorts by year; file order is kept within a year, so a later
    /// entry for the same factor wins.
    pub fn from_changes(mut changes: Vec<ScheduledChange>) -> Self {
        changes.sort_by_key(|c| c.year);
        Self { changes, next: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// All not-yet-applied changes due by `year`, in application order.
    /// Each change is handed out exactly once.
    pub fn due(&mut self, year: i32) -> &[ScheduledChange] {
        let start = self.next;
        while self.next < self.changes.len() && self.changes[self.next].year <= year {
            self.next += 1;
        }
        &self.changes[start..self.next]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(year: i32, factor: EnvFactor, value: f64) -> ScheduledChange {
        ScheduledChange {
            year,
            factor,
            value,
        }
    }

    #[test]
    fn due_hands_out_changes_once_in_year_order() {
        let mut schedule = Schedule::from_changes(vec![
            change(2030, EnvFactor::GlobalTemp, 3.0),
            change(2026, EnvFactor::Snowfall, 0.5),
        ]);

        assert!(schedule.due(2024).is_empty());
        let first = schedule.due(2026);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].factor, EnvFactor::Snowfall);

        assert!(schedule.due(2027).is_empty(), "already applied");
        assert_eq!(schedule.due(2035).len(), 1);
        assert!(schedule.due(2100).is_empty());
    }

    #[test]
    fn same_year_changes_keep_their_written_order() {
        let mut schedule = Schedule::from_changes(vec![
            change(2025, EnvFactor::GlobalTemp, 1.0),
            change(2025, EnvFactor::GlobalTemp, 2.0),
        ]);
        let due = schedule.due(2025);
        assert_eq!(due.len(), 2);
        assert_eq!(due[1].value, 2.0, "the later entry should win when applied in order");
    }

    #[test]
    fn a_skipped_span_of_years_still_delivers_everything() {
        let mut schedule = Schedule::from_changes(vec![
            change(2025, EnvFactor::GlobalTemp, 1.0),
            change(2030, EnvFactor::OceanTemp, 1.5),
        ]);
        assert_eq!(schedule.due(2100).len(), 2);
    }

    #[test]
    fn parses_wire_format() {
        let changes: Vec<ScheduledChange> = serde_json::from_str(
            r#"[{"year":2030,"factor":"globalTemp","value":3.5},
                {"year":2040,"factor":"emissions","value":0.2}]"#,
        )
        .unwrap();
        assert_eq!(changes[0].factor, EnvFactor::GlobalTemp);
        assert_eq!(changes[1].year, 2040);
    }
}
