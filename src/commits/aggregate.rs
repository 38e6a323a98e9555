use crate::error::{Result, SnoopError};
use crate::model::{CommitRecord, WorkDay};
use crate::util::day_key;

/// Commit activity grouped into consecutive work days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCommitReport {
    pub work_days: Vec<WorkDay>,
    /// One per distinct committer per work day.
    pub fte_days: usize,
}

/// Group commits into work days in ascending date order.
///
/// The API lists commits newest first, so the list is reversed and then
/// stable-sorted by day, which keeps every date in a single contiguous run
/// even when the input is not strictly ordered.
pub fn generate_report(mut commits: Vec<CommitRecord>) -> Result<DailyCommitReport> {
    commits.reverse();
    let mut keyed: Vec<(String, CommitRecord)> = commits
        .into_iter()
        .map(|c| (day_key(&c.committed_date), c))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    let mut work_days = Vec::new();
    let mut iter = keyed.into_iter();
    let Some((first_date, first)) = iter.next() else {
        return Err(SnoopError::Precondition("no commits to report".to_string()));
    };

    let mut day = WorkDay::new(first_date);
    *day.commits.entry(first.committer_email).or_insert(0) += 1;

    for (date, commit) in iter {
        if date != day.date {
            work_days.push(std::mem::replace(&mut day, WorkDay::new(date)));
        }
        *day.commits.entry(commit.committer_email).or_insert(0) += 1;
    }
    work_days.push(day);

    let fte_days: usize = work_days.iter().map(WorkDay::committers).sum();
    Ok(DailyCommitReport {
        work_days,
        fte_days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::commit;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn day(date: &str, counts: &[(&str, u32)]) -> WorkDay {
        WorkDay {
            date: date.to_string(),
            commits: counts
                .iter()
                .map(|(email, n)| (email.to_string(), *n))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn distinct_committers_per_day_make_fte_days() {
        // newest first, as the API returns them
        let commits = vec![
            commit("alice@example.com", "2024-03-02T10:00:00Z"),
            commit("alice@example.com", "2024-03-01T16:00:00Z"),
            commit("bob@example.com", "2024-03-01T12:00:00Z"),
            commit("alice@example.com", "2024-03-01T09:00:00Z"),
        ];

        let report = generate_report(commits).unwrap();

        assert_eq!(
            report.work_days,
            vec![
                day("2024-03-01", &[("alice@example.com", 2), ("bob@example.com", 1)]),
                day("2024-03-02", &[("alice@example.com", 1)]),
            ]
        );
        assert_eq!(report.fte_days, 3);
    }

    #[test]
    fn empty_input_is_a_precondition_error() {
        let err = generate_report(Vec::new()).unwrap_err();
        assert!(matches!(err, SnoopError::Precondition(ref m) if m == "no commits to report"));
    }

    #[test]
    fn single_commit_is_one_day() {
        let report =
            generate_report(vec![commit("carol@example.com", "2024-05-06T08:00:00Z")]).unwrap();

        assert_eq!(report.work_days, vec![day("2024-05-06", &[("carol@example.com", 1)])]);
        assert_eq!(report.fte_days, 1);
    }

    #[test]
    fn interleaved_dates_are_not_split() {
        let commits = vec![
            commit("alice@example.com", "2024-03-01T09:00:00Z"),
            commit("bob@example.com", "2024-03-03T09:00:00Z"),
            commit("alice@example.com", "2024-03-01T11:00:00Z"),
            commit("carol@example.com", "2024-03-02T09:00:00Z"),
            commit("bob@example.com", "2024-03-01T15:00:00Z"),
        ];

        let report = generate_report(commits).unwrap();

        let dates: Vec<&str> = report.work_days.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-03-02", "2024-03-03"]);
        assert_eq!(
            report.work_days[0],
            day("2024-03-01", &[("alice@example.com", 2), ("bob@example.com", 1)])
        );
        assert_eq!(report.fte_days, 4);
    }

    #[test]
    fn dates_increase_and_counts_add_up() {
        let emails = ["a@x.io", "b@x.io", "c@x.io"];
        let commits: Vec<_> = (0..60u32)
            .map(|i| {
                let day = 1 + (i * 11) % 28;
                let hour = (i * 5) % 24;
                commit(emails[(i % 3) as usize], &format!("2024-04-{day:02}T{hour:02}:00:00Z"))
            })
            .collect();
        let total = commits.len() as u32;

        let report = generate_report(commits).unwrap();

        assert!(report.work_days.windows(2).all(|w| w[0].date < w[1].date));
        let counted: u32 = report.work_days.iter().map(WorkDay::commit_count).sum();
        assert_eq!(counted, total);
        let fte: usize = report.work_days.iter().map(|d| d.commits.len()).sum();
        assert_eq!(report.fte_days, fte);
    }

    #[test]
    fn day_follows_the_commit_offset() {
        let commits = vec![
            commit("alice@example.com", "2024-03-02T01:00:00+02:00"),
            commit("alice@example.com", "2024-03-01T23:30:00-05:00"),
        ];

        let report = generate_report(commits).unwrap();

        let dates: Vec<&str> = report.work_days.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-03-02"]);
    }
}
