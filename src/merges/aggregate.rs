use crate::model::{MergeRequestRecord, MergeTotals, WeeklyBucket};
use crate::util::week_key;
use std::collections::HashMap;

/// Merge requests bucketed by ISO week of their last update.
#[derive(Debug, Clone, Default)]
pub struct WeeklyMergeReport {
    pub weeks: HashMap<String, WeeklyBucket>,
    pub totals: MergeTotals,
}

impl WeeklyMergeReport {
    /// Weeks in ascending key order, which is also chronological order.
    pub fn sorted_weeks(&self) -> Vec<(&str, &WeeklyBucket)> {
        let mut weeks: Vec<(&str, &WeeklyBucket)> =
            self.weeks.iter().map(|(k, v)| (k.as_str(), v)).collect();
        weeks.sort_by(|a, b| a.0.cmp(b.0));
        weeks
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}

pub fn aggregate_weeks(records: &[MergeRequestRecord]) -> WeeklyMergeReport {
    let mut report = WeeklyMergeReport::default();

    for record in records {
        let state = record.merge_state();
        report
            .weeks
            .entry(week_key(&record.updated_at))
            .or_default()
            .record(state);
        report.totals.record(state);
    }

    report
}
