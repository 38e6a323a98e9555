use super::{HostingApi, MergeRequestFilter, Page};
use crate::config::Config;
use crate::error::{Result, SnoopError};
use crate::model::{CommitRecord, MergeRequestRecord, Project};
use chrono::SecondsFormat;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::time::Duration;

const MERGE_REQUESTS_PER_PAGE: u32 = 100;
const COMMITS_PER_PAGE: u32 = 100;
const PROJECTS_PER_PAGE: u32 = 20;
const TOTAL_PAGES_HEADER: &str = "X-Total-Pages";
const NEXT_PAGE_HEADER: &str = "X-Next-Page";

/// Blocking GitLab REST v4 client authenticated with a private token.
pub struct GitLabClient {
    agent: ureq::Agent,
    base_url: String,
    token: String,
}

impl GitLabClient {
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .timeout_read(Duration::from_secs(60))
            .user_agent(concat!("snoop/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        }
    }

    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<ureq::Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {url} {query:?}");

        let mut request = self.agent.get(&url).set("PRIVATE-TOKEN", &self.token);
        for (key, value) in query {
            request = request.query(key, value);
        }

        let response = request.call()?;
        if response.status() != 200 {
            return Err(SnoopError::Status {
                status: response.status(),
                url,
            });
        }
        Ok(response)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let response = self.get(path, query)?;
        Ok(response.into_json()?)
    }

    fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        page: u32,
        per_page: u32,
        filters: &[(&str, String)],
    ) -> Result<Page<T>> {
        let mut query = vec![("page", page.to_string()), ("per_page", per_page.to_string())];
        query.extend(filters.iter().cloned());

        let response = self.get(path, &query)?;
        let total = header_number(&response, TOTAL_PAGES_HEADER);
        let next = header_number(&response, NEXT_PAGE_HEADER);
        let items: Vec<T> = response.into_json()?;

        if total.is_none() && next.is_none() && items.len() as u32 >= per_page {
            warn!("{path}: page {page} is full but no paging headers came back, results may be cut short");
        }
        Ok(Page::new(items, last_known_page(total, next, page)))
    }
}

fn header_number(response: &ureq::Response, name: &str) -> Option<u32> {
    response.header(name).and_then(|v| v.trim().parse().ok())
}

/// GitLab drops `X-Total-Pages` on very large lists; `X-Next-Page` then keeps
/// the walk going one page at a time. An empty `X-Next-Page` marks the end.
fn last_known_page(total: Option<u32>, next: Option<u32>, page: u32) -> u32 {
    match (total, next) {
        (Some(total), _) => total,
        (None, Some(next)) => next.max(page),
        (None, None) => page,
    }
}

impl HostingApi for GitLabClient {
    fn list_merge_requests(
        &self,
        project_id: u64,
        filter: &MergeRequestFilter,
        page: u32,
    ) -> Result<Page<MergeRequestRecord>> {
        let mut query = vec![("state", filter.state.clone().unwrap_or_else(|| "all".to_string()))];
        if let Some(after) = filter.updated_after {
            query.push(("updated_after", after.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        if let Some(branch) = &filter.target_branch {
            query.push(("target_branch", branch.clone()));
        }
        self.get_page(
            &format!("/projects/{project_id}/merge_requests"),
            page,
            MERGE_REQUESTS_PER_PAGE,
            &query,
        )
    }

    fn list_all_merge_requests(&self, state: &str, page: u32) -> Result<Page<MergeRequestRecord>> {
        let query = [("scope", "all".to_string()), ("state", state.to_string())];
        self.get_page("/merge_requests", page, MERGE_REQUESTS_PER_PAGE, &query)
    }

    fn get_merge_request(&self, project_id: u64, mr_iid: u64) -> Result<MergeRequestRecord> {
        self.get_json(&format!("/projects/{project_id}/merge_requests/{mr_iid}"), &[])
    }

    fn list_merge_request_commits(
        &self,
        project_id: u64,
        mr_iid: u64,
        page: u32,
    ) -> Result<Page<CommitRecord>> {
        self.get_page(
            &format!("/projects/{project_id}/merge_requests/{mr_iid}/commits"),
            page,
            COMMITS_PER_PAGE,
            &[],
        )
    }

    fn get_project(&self, project_id: u64) -> Result<Option<Project>> {
        self.get_json(&format!("/projects/{project_id}"), &[])
    }

    fn list_projects(&self, page: u32) -> Result<Page<Project>> {
        let query = [
            ("order_by", "id".to_string()),
            ("simple", "false".to_string()),
            ("membership", "false".to_string()),
        ];
        self.get_page("/projects", page, PROJECTS_PER_PAGE, &query)
    }
}
