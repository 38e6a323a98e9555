use crate::api::{fetch_all, HostingApi};
use crate::error::{Result, SnoopError};
use crate::model::Project;
use log::debug;
use std::collections::HashMap;

/// Project metadata keyed by project id, alive for one process run.
///
/// Filled in bulk by [`ProjectCache::preload`] or one id at a time by
/// [`ProjectCache::get`], which stores what it fetched.
#[derive(Debug, Default)]
pub struct ProjectCache {
    projects: HashMap<u64, Project>,
}

impl ProjectCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every project visible to the token. Returns how many were fetched.
    pub fn preload(&mut self, api: &dyn HostingApi) -> Result<usize> {
        let projects = fetch_all("projects", |page| api.list_projects(page))?;
        let fetched = projects.len();
        for project in projects {
            self.projects.insert(project.id, project);
        }
        debug!("Project cache holds {} entries", self.projects.len());
        Ok(fetched)
    }

    pub fn get(&mut self, api: &dyn HostingApi, id: u64) -> Result<&Project> {
        if !self.projects.contains_key(&id) {
            debug!("Project cache miss for {id}");
            let project = api
                .get_project(id)?
                .ok_or_else(|| SnoopError::NotFound(format!("unable to find project: {id}")))?;
            self.projects.insert(id, project);
        }
        self.projects
            .get(&id)
            .ok_or_else(|| SnoopError::NotFound(format!("unable to find project: {id}")))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Cached projects ordered by id.
    pub fn projects(&self) -> Vec<&Project> {
        let mut projects: Vec<&Project> = self.projects.values().collect();
        projects.sort_by_key(|p| p.id);
        projects
    }
}
