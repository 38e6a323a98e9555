use super::{HostingApi, MergeRequestFilter, Page};
use crate::error::{Result, SnoopError};
use crate::model::{Author, CommitRecord, MergeRequestRecord, Project};
use chrono::DateTime;
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory API that serves canned pages and records every call.
#[derive(Default)]
pub struct FakeApi {
    pub merge_request_pages: Vec<Vec<MergeRequestRecord>>,
    pub commit_pages: Vec<Vec<CommitRecord>>,
    pub project_pages: Vec<Vec<Project>>,
    pub projects: HashMap<u64, Option<Project>>,
    pub merge_requests: HashMap<(u64, u64), MergeRequestRecord>,
    pub fail_on_page: Option<u32>,
    pub calls: RefCell<Vec<String>>,
    pub last_filter: RefCell<Option<MergeRequestFilter>>,
}

impl FakeApi {
    pub fn calls_to(&self, prefix: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn log(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn page_of<T: Clone>(&self, pages: &[Vec<T>], page: u32) -> Result<Page<T>> {
        if self.fail_on_page == Some(page) {
            return Err(SnoopError::Status {
                status: 502,
                url: format!("fake://page/{page}"),
            });
        }
        let items = pages
            .get(page as usize - 1)
            .cloned()
            .unwrap_or_default();
        Ok(Page::new(items, pages.len() as u32))
    }
}

impl HostingApi for FakeApi {
    fn list_merge_requests(
        &self,
        project_id: u64,
        filter: &MergeRequestFilter,
        page: u32,
    ) -> Result<Page<MergeRequestRecord>> {
        self.log(format!("list_merge_requests {project_id} {page}"));
        *self.last_filter.borrow_mut() = Some(filter.clone());
        self.page_of(&self.merge_request_pages, page)
    }

    fn list_all_merge_requests(&self, state: &str, page: u32) -> Result<Page<MergeRequestRecord>> {
        self.log(format!("list_all_merge_requests {state} {page}"));
        self.page_of(&self.merge_request_pages, page)
    }

    fn get_merge_request(&self, project_id: u64, mr_iid: u64) -> Result<MergeRequestRecord> {
        self.log(format!("get_merge_request {project_id} {mr_iid}"));
        self.merge_requests
            .get(&(project_id, mr_iid))
            .cloned()
            .ok_or_else(|| SnoopError::Status {
                status: 404,
                url: format!("fake://projects/{project_id}/merge_requests/{mr_iid}"),
            })
    }

    fn list_merge_request_commits(
        &self,
        project_id: u64,
        mr_iid: u64,
        page: u32,
    ) -> Result<Page<CommitRecord>> {
        self.log(format!("list_merge_request_commits {project_id} {mr_iid} {page}"));
        self.page_of(&self.commit_pages, page)
    }

    fn get_project(&self, project_id: u64) -> Result<Option<Project>> {
        self.log(format!("get_project {project_id}"));
        self.projects
            .get(&project_id)
            .cloned()
            .ok_or_else(|| SnoopError::Status {
                status: 404,
                url: format!("fake://projects/{project_id}"),
            })
    }

    fn list_projects(&self, page: u32) -> Result<Page<Project>> {
        self.log(format!("list_projects {page}"));
        self.page_of(&self.project_pages, page)
    }
}

pub fn project(id: u64, name: &str) -> Project {
    Project {
        id,
        name: name.to_string(),
        path_with_namespace: format!("group/{}", name.to_lowercase()),
        web_url: format!("https://gitlab.example.com/group/{}", name.to_lowercase()),
    }
}

pub fn merge_request(iid: u64, state: &str, updated_at: &str) -> MergeRequestRecord {
    MergeRequestRecord {
        id: 1000 + iid,
        iid,
        project_id: 7,
        author: Author {
            name: "Alice Example".to_string(),
            username: "alice".to_string(),
        },
        title: format!("Change #{iid}"),
        state: state.to_string(),
        updated_at: DateTime::parse_from_rfc3339(updated_at).unwrap(),
        target_branch: "main".to_string(),
        draft: false,
        work_in_progress: false,
    }
}

pub fn commit(email: &str, committed_date: &str) -> CommitRecord {
    let name = email.split('@').next().unwrap_or(email).to_string();
    CommitRecord {
        id: format!("{name}-{committed_date}"),
        committer_name: name,
        committer_email: email.to_string(),
        committed_date: DateTime::parse_from_rfc3339(committed_date).unwrap(),
    }
}
