use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeRequestRecord {
    pub id: u64,
    pub iid: u64,
    pub project_id: u64,
    pub author: Author,
    pub title: String,
    pub state: String,
    pub updated_at: DateTime<FixedOffset>,
    pub target_branch: String,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub work_in_progress: bool,
}

impl MergeRequestRecord {
    /// Older servers only report `work_in_progress`, newer ones `draft`.
    pub fn is_draft(&self) -> bool {
        self.draft || self.work_in_progress
    }

    pub fn merge_state(&self) -> MergeState {
        MergeState::classify(&self.state)
    }
}

/// How a merge request counts in the weekly report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeState {
    Merged,
    Closed,
    Opened,
}

impl MergeState {
    /// Anything that is not `merged` or `closed` counts as opened, so states
    /// like `locked` or values added later still land in a bucket.
    pub fn classify(state: &str) -> Self {
        match state {
            "merged" => MergeState::Merged,
            "closed" => MergeState::Closed,
            _ => MergeState::Opened,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub id: String,
    pub committer_name: String,
    pub committer_email: String,
    pub committed_date: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub path_with_namespace: String,
    #[serde(default)]
    pub web_url: String,
}

/// Opened/closed/merged counts for a set of merge requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCounts {
    pub opened: u32,
    pub closed: u32,
    pub merged: u32,
}

impl StateCounts {
    pub fn record(&mut self, state: MergeState) {
        match state {
            MergeState::Merged => self.merged += 1,
            MergeState::Closed => self.closed += 1,
            MergeState::Opened => self.opened += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.opened + self.closed + self.merged
    }
}

/// Counts for one ISO week.
pub type WeeklyBucket = StateCounts;

/// Counts over every week of a report.
pub type MergeTotals = StateCounts;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkDay {
    pub date: String,
    /// Commit count per committer email.
    pub commits: BTreeMap<String, u32>,
}

impl WorkDay {
    pub fn new(date: String) -> Self {
        Self {
            date,
            commits: BTreeMap::new(),
        }
    }

    pub fn committers(&self) -> usize {
        self.commits.len()
    }

    #[cfg(test)]
    pub fn commit_count(&self) -> u32 {
        self.commits.values().sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekEntry {
    pub week: String,
    #[serde(flatten)]
    pub bucket: WeeklyBucket,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergesOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub project_id: u64,
    pub project_name: String,
    pub updated_after: Option<DateTime<Utc>>,
    pub target_branch: Option<String>,
    pub weeks: Vec<WeekEntry>,
    pub totals: MergeTotals,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub project_id: u64,
    pub merge_request_iid: u64,
    pub work_days: Vec<WorkDay>,
    pub fte_days: usize,
}
