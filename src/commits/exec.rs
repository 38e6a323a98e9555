use super::{generate_report, output_json, output_report};
use crate::api::{fetch_all, GitLabClient, HostingApi};
use crate::cli::CommonArgs;
use crate::config::Config;
use anyhow::Context;
use log::info;
use std::io::{self, Write};

pub fn exec(common: CommonArgs, project_id: u64, merge_id: u64, json: bool) -> anyhow::Result<()> {
    let config = Config::from_args(&common)?;
    let api = GitLabClient::new(&config);
    merge_commits(&api, project_id, merge_id, json, &mut io::stdout().lock())
}

/// Daily commit report for one merge request.
pub fn merge_commits<W: Write>(
    api: &dyn HostingApi,
    project_id: u64,
    merge_id: u64,
    json: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    let commits = fetch_all("commits", |page| {
        api.list_merge_request_commits(project_id, merge_id, page)
    })
    .with_context(|| format!("Failed to fetch commits of merge request {project_id}!{merge_id}"))?;
    info!("Grouping {} commits into work days", commits.len());

    let report = generate_report(commits)?;

    if json {
        output_json(&report, project_id, merge_id, out)?;
    } else {
        output_report(&report, out)?;
    }
    Ok(())
}
