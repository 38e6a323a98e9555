//! Hosting API collaborator.
//!
//! Everything the reports need from the server goes through [`HostingApi`]:
//! paginated list calls return one [`Page`] at a time, and
//! [`pages::fetch_all`] drives them from page 1 to the reported last page.

pub mod gitlab;
pub mod pages;

#[cfg(test)]
pub(crate) mod fake;

use crate::error::Result;
use crate::model::{CommitRecord, MergeRequestRecord, Project};
use chrono::{DateTime, Utc};

pub use gitlab::GitLabClient;
pub use pages::fetch_all;

/// One page of a list call.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total page count reported by the server; at least 1.
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_pages: u32) -> Self {
        Self {
            items,
            total_pages: total_pages.max(1),
        }
    }
}

/// Filters for a project's merge request list.
#[derive(Debug, Clone, Default)]
pub struct MergeRequestFilter {
    /// `None` lists every state.
    pub state: Option<String>,
    pub updated_after: Option<DateTime<Utc>>,
    pub target_branch: Option<String>,
}

pub trait HostingApi {
    fn list_merge_requests(
        &self,
        project_id: u64,
        filter: &MergeRequestFilter,
        page: u32,
    ) -> Result<Page<MergeRequestRecord>>;

    /// Merge requests across every project visible to the token.
    fn list_all_merge_requests(&self, state: &str, page: u32) -> Result<Page<MergeRequestRecord>>;

    fn get_merge_request(&self, project_id: u64, mr_iid: u64) -> Result<MergeRequestRecord>;

    fn list_merge_request_commits(
        &self,
        project_id: u64,
        mr_iid: u64,
        page: u32,
    ) -> Result<Page<CommitRecord>>;

    /// `Ok(None)` when the server answers successfully but without data.
    fn get_project(&self, project_id: u64) -> Result<Option<Project>>;

    fn list_projects(&self, page: u32) -> Result<Page<Project>>;
}
