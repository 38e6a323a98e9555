use super::aggregate::DailyCommitReport;
use crate::error::Result;
use crate::model::{CommitsOutput, SCHEMA_VERSION};
use chrono::Utc;
use std::io::Write;

pub fn render_text(report: &DailyCommitReport) -> String {
    let mut text = String::new();
    for day in &report.work_days {
        text.push_str(&format!("Day: {}\n", day.date));
        for (email, count) in &day.commits {
            text.push_str(&format!("Commits: {count} Committer: {email}\n"));
        }
    }
    text.push_str(&format!("Total Work Days: {}\n", report.work_days.len()));
    text.push_str(&format!("Total FTE Days: {}\n", report.fte_days));
    text
}

pub fn output_report<W: Write>(report: &DailyCommitReport, out: &mut W) -> Result<()> {
    out.write_all(render_text(report).as_bytes())?;
    Ok(())
}

pub fn output_json<W: Write>(
    report: &DailyCommitReport,
    project_id: u64,
    merge_request_iid: u64,
    out: &mut W,
) -> Result<()> {
    let output = CommitsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        project_id,
        merge_request_iid,
        work_days: report.work_days.clone(),
        fte_days: report.fte_days,
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::commit;
    use crate::commits::aggregate::generate_report;
    use pretty_assertions::assert_eq;

    fn sample() -> DailyCommitReport {
        generate_report(vec![
            commit("alice@example.com", "2024-03-02T10:00:00Z"),
            commit("bob@example.com", "2024-03-01T12:00:00Z"),
            commit("alice@example.com", "2024-03-01T09:00:00Z"),
            commit("alice@example.com", "2024-03-01T08:00:00Z"),
        ])
        .unwrap()
    }

    #[test]
    fn text_lists_days_then_totals() {
        assert_eq!(
            render_text(&sample()),
            "Day: 2024-03-01\n\
             Commits: 2 Committer: alice@example.com\n\
             Commits: 1 Committer: bob@example.com\n\
             Day: 2024-03-02\n\
             Commits: 1 Committer: alice@example.com\n\
             Total Work Days: 2\n\
             Total FTE Days: 3\n"
        );
    }

    #[test]
    fn json_document_lists_work_days() {
        let mut out = Vec::<u8>::new();
        output_json(&sample(), 7, 12, &mut out).unwrap();

        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(v["merge_request_iid"], 12);
        assert_eq!(v["fte_days"], 3);
        assert_eq!(v["work_days"][0]["date"], "2024-03-01");
        assert_eq!(v["work_days"][0]["commits"]["alice@example.com"], 2);
    }
}
