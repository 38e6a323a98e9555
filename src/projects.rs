use crate::api::{GitLabClient, HostingApi};
use crate::cache::ProjectCache;
use crate::cli::CommonArgs;
use crate::config::Config;
use anyhow::Context;
use std::io::{self, Write};

pub fn exec(common: CommonArgs) -> anyhow::Result<()> {
    let config = Config::from_args(&common)?;
    let api = GitLabClient::new(&config);
    let mut cache = ProjectCache::new();
    list_projects(&api, &mut cache, &mut io::stdout().lock())?;
    Ok(())
}

/// Fill the cache from the project list and print it in id order.
pub fn list_projects<W: Write>(
    api: &dyn HostingApi,
    cache: &mut ProjectCache,
    out: &mut W,
) -> anyhow::Result<usize> {
    let fetched = cache.preload(api).context("Failed to load projects")?;
    for project in cache.projects() {
        writeln!(out, "Project: {} {}", project.name, project.id)?;
    }
    Ok(fetched)
}
