use super::{aggregate_weeks, merged_chart, output_json, output_report, write_chart_file};
use super::output::merge_request_line;
use crate::api::{fetch_all, GitLabClient, HostingApi, MergeRequestFilter};
use crate::cache::ProjectCache;
use crate::cli::CommonArgs;
use crate::config::Config;
use crate::util::weeks_back_start;
use anyhow::Context;
use chrono::{DateTime, Utc};
use log::info;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ProjectMergesQuery {
    pub project_id: u64,
    pub weeks: Option<u32>,
    pub branch: Option<String>,
    pub json: bool,
    pub chart: bool,
}

impl ProjectMergesQuery {
    fn filter(&self, now: DateTime<Utc>) -> anyhow::Result<MergeRequestFilter> {
        let updated_after = match self.weeks {
            Some(weeks) => Some(
                weeks_back_start(now, weeks)
                    .with_context(|| format!("--weeks {weeks} reaches outside the calendar"))?,
            ),
            None => None,
        };
        Ok(MergeRequestFilter {
            state: None,
            updated_after,
            target_branch: self.branch.clone(),
        })
    }
}

fn connect(common: &CommonArgs) -> anyhow::Result<GitLabClient> {
    let config = Config::from_args(common)?;
    Ok(GitLabClient::new(&config))
}

pub fn exec_merge(common: CommonArgs, project_id: u64, merge_id: u64) -> anyhow::Result<()> {
    let api = connect(&common)?;
    let mut cache = ProjectCache::new();
    show_merge_request(&api, &mut cache, project_id, merge_id, &mut io::stdout().lock())
}

pub fn exec_project_merges(common: CommonArgs, query: ProjectMergesQuery) -> anyhow::Result<()> {
    let api = connect(&common)?;
    let mut cache = ProjectCache::new();
    project_merges(&api, &mut cache, &query, Utc::now(), None, &mut io::stdout().lock())?;
    Ok(())
}

pub fn exec_list(common: CommonArgs, state: String) -> anyhow::Result<()> {
    let api = connect(&common)?;
    let mut cache = ProjectCache::new();
    list_merge_requests(&api, &mut cache, &state, &mut io::stdout().lock())?;
    Ok(())
}

pub fn show_merge_request<W: Write>(
    api: &dyn HostingApi,
    cache: &mut ProjectCache,
    project_id: u64,
    merge_id: u64,
    out: &mut W,
) -> anyhow::Result<()> {
    let mr = api
        .get_merge_request(project_id, merge_id)
        .with_context(|| format!("Failed to fetch merge request {project_id}!{merge_id}"))?;
    let project = cache
        .get(api, mr.project_id)
        .with_context(|| format!("unable to find project: {}", mr.project_id))?;

    writeln!(out, "{}", merge_request_line(&mr, project))?;
    Ok(())
}

/// Weekly merge request report for one project. Returns the chart path when
/// a chart was written.
pub fn project_merges<W: Write>(
    api: &dyn HostingApi,
    cache: &mut ProjectCache,
    query: &ProjectMergesQuery,
    now: DateTime<Utc>,
    chart_dir: Option<&Path>,
    out: &mut W,
) -> anyhow::Result<Option<PathBuf>> {
    let project = cache
        .get(api, query.project_id)
        .with_context(|| format!("unable to find project: {}", query.project_id))?
        .clone();
    let filter = query.filter(now)?;

    let records = fetch_all("merge requests", |page| {
        api.list_merge_requests(query.project_id, &filter, page)
    })
    .context("Failed to fetch merge requests")?;
    info!("Aggregating {} merge requests for {}", records.len(), project.name);

    let report = aggregate_weeks(&records);

    if query.json {
        output_json(&report, &project, &filter, out)?;
        return Ok(None);
    }

    output_report(&report, out)?;

    if !query.chart {
        return Ok(None);
    }
    if report.is_empty() {
        writeln!(out, "No data to chart")?;
        return Ok(None);
    }

    let path = write_chart_file(&merged_chart(&project.name, &report), chart_dir)
        .context("Failed to write chart")?;
    writeln!(out, "Wrote chart here: {}", path.display())?;
    Ok(Some(path))
}

/// Instance-wide merge requests in `state`, drafts skipped. Returns how many
/// were printed.
pub fn list_merge_requests<W: Write>(
    api: &dyn HostingApi,
    cache: &mut ProjectCache,
    state: &str,
    out: &mut W,
) -> anyhow::Result<usize> {
    let records = fetch_all("merge requests", |page| api.list_all_merge_requests(state, page))
        .context("Failed to fetch merge requests")?;

    let mut shown = 0;
    for mr in records.iter().filter(|mr| !mr.is_draft()) {
        let project = cache
            .get(api, mr.project_id)
            .with_context(|| format!("unable to find project: {}", mr.project_id))?;
        writeln!(out, "{}", merge_request_line(mr, project))?;
        shown += 1;
    }
    Ok(shown)
}
