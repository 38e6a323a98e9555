use super::aggregate::WeeklyMergeReport;
use crate::api::MergeRequestFilter;
use crate::error::{Result, SnoopError};
use crate::model::{
    MergeRequestRecord, MergeTotals, MergesOutput, Project, WeekEntry, WeeklyBucket,
    SCHEMA_VERSION,
};
use chrono::Utc;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

const TOTALS_PREFIX: &str = "Total MRs:";

impl fmt::Display for MergeTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{TOTALS_PREFIX} {} Open: {} Closed: {} Merged: {}",
            self.total(),
            self.opened,
            self.closed,
            self.merged
        )
    }
}

/// Parses the aggregate line written by the `Display` impl.
impl FromStr for MergeTotals {
    type Err = SnoopError;

    fn from_str(line: &str) -> Result<Self> {
        let bad = || SnoopError::Parse(format!("not a totals line: {line:?}"));
        let rest = line.trim().strip_prefix(TOTALS_PREFIX).ok_or_else(bad)?;

        let mut fields: [Option<u32>; 4] = [None; 4];
        let mut tokens = rest.split_whitespace();
        while let Some(token) = tokens.next() {
            let slot = match token {
                "Open:" => 1,
                "Closed:" => 2,
                "Merged:" => 3,
                value if fields[0].is_none() => {
                    fields[0] = Some(value.parse().map_err(|_| bad())?);
                    continue;
                }
                _ => return Err(bad()),
            };
            let value = tokens.next().ok_or_else(bad)?;
            fields[slot] = Some(value.parse().map_err(|_| bad())?);
        }

        match fields {
            [Some(total), Some(opened), Some(closed), Some(merged)] => {
                let totals = MergeTotals {
                    opened,
                    closed,
                    merged,
                };
                if totals.total() != total {
                    return Err(bad());
                }
                Ok(totals)
            }
            _ => Err(bad()),
        }
    }
}

pub fn week_line(week: &str, bucket: &WeeklyBucket) -> String {
    format!(
        "Week#: {week}, Total: {} Open: {} Closed: {} Merged: {}",
        bucket.total(),
        bucket.opened,
        bucket.closed,
        bucket.merged
    )
}

/// One line per week in key order followed by the totals line.
pub fn render_text(report: &WeeklyMergeReport) -> String {
    let mut text = String::new();
    for (week, bucket) in report.sorted_weeks() {
        text.push_str(&week_line(week, bucket));
        text.push('\n');
    }
    text.push_str(&report.totals.to_string());
    text.push('\n');
    text
}

pub fn output_report<W: Write>(report: &WeeklyMergeReport, out: &mut W) -> Result<()> {
    out.write_all(render_text(report).as_bytes())?;
    Ok(())
}

pub fn output_json<W: Write>(
    report: &WeeklyMergeReport,
    project: &Project,
    filter: &MergeRequestFilter,
    out: &mut W,
) -> Result<()> {
    let output = MergesOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        project_id: project.id,
        project_name: project.name.clone(),
        updated_after: filter.updated_after,
        target_branch: filter.target_branch.clone(),
        weeks: report
            .sorted_weeks()
            .into_iter()
            .map(|(week, bucket)| WeekEntry {
                week: week.to_string(),
                bucket: *bucket,
            })
            .collect(),
        totals: report.totals,
    };

    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

pub fn merge_request_line(mr: &MergeRequestRecord, project: &Project) -> String {
    format!("MR: {} - {} - {}", mr.author.name, mr.title, project.name)
}
