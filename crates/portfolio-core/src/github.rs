//! GitHub REST client implementing [`RepoHost`].

use crate::config::GithubConfig;
use crate::error::{PortfolioError, Result};
use crate::remote::{Identity, IssueState, RemoteIssue, RemoteMilestone, RepoHost, RepoSummary};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const USER_AGENT: &str = concat!("portfoliodb/", env!("CARGO_PKG_VERSION"));
const PER_PAGE: usize = 100;
const MAX_PAGES: usize = 10;

const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct Account {
    login: String,
}

#[derive(Deserialize)]
struct RepoPayload {
    owner: Account,
    html_url: String,
}

#[derive(Deserialize)]
struct MilestonePayload {
    title: String,
    open_issues: u64,
    closed_issues: u64,
}

#[derive(Deserialize)]
struct IssuePayload {
    state: IssueState,
    /// Present when the "issue" is a pull request.
    #[serde(default)]
    pull_request: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct TagPayload {
    name: String,
}

#[derive(Deserialize)]
struct ErrorPayload {
    message: String,
}

// ---------------------------------------------------------------------------
// GithubClient
// ---------------------------------------------------------------------------

pub struct GithubClient {
    http: Client,
    api_url: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(api_url: impl Into<String>, token: Option<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &GithubConfig, token: Option<String>) -> Result<Self> {
        Self::new(
            config.api_url.clone(),
            token,
            Duration::from_secs(config.timeout_seconds),
        )
    }

    fn request(&self, path: &str, accept: &str) -> RequestBuilder {
        let mut req = self
            .http
            .get(format!("{}{}", self.api_url, path))
            .header("Accept", accept)
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    fn send(&self, path: &str, req: RequestBuilder) -> Result<Response> {
        let resp = req.send().map_err(|e| {
            if e.is_timeout() {
                PortfolioError::RemoteTimeout(path.to_string())
            } else {
                PortfolioError::Http(e)
            }
        })?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().unwrap_or_default();
        let message = serde_json::from_str::<ErrorPayload>(&body)
            .map(|p| p.message)
            .unwrap_or(body);
        Err(PortfolioError::Remote {
            endpoint: path.to_string(),
            status: status.as_u16(),
            message,
        })
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.send(path, self.request(path, JSON_MEDIA_TYPE))?;
        let text = resp.text()?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Follow `page=N` until a short page comes back.
    fn get_paginated<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<T>> {
        let mut items = Vec::new();
        for page in 1..=MAX_PAGES {
            let page = page.to_string();
            let per_page = PER_PAGE.to_string();
            let req = self
                .request(path, JSON_MEDIA_TYPE)
                .query(query)
                .query(&[("per_page", per_page.as_str()), ("page", page.as_str())]);
            let text = self.send(path, req)?.text()?;
            let batch: Vec<T> = serde_json::from_str(&text)?;
            let short = batch.len() < PER_PAGE;
            items.extend(batch);
            if short {
                return Ok(items);
            }
        }
        tracing::debug!(path, pages = MAX_PAGES, "stopped paginating at page limit");
        Ok(items)
    }
}

impl RepoHost for GithubClient {
    fn repository(&self, full_name: &str) -> Result<RepoSummary> {
        let repo: RepoPayload = self.get_json(&format!("/repos/{full_name}"))?;
        Ok(RepoSummary {
            owner_login: repo.owner.login,
            url: repo.html_url,
        })
    }

    fn open_milestones(&self, full_name: &str) -> Result<Vec<RemoteMilestone>> {
        let milestones: Vec<MilestonePayload> = self.get_paginated(
            &format!("/repos/{full_name}/milestones"),
            &[("state", "open")],
        )?;
        Ok(milestones
            .into_iter()
            .map(|m| RemoteMilestone {
                title: m.title,
                open_issues: m.open_issues,
                closed_issues: m.closed_issues,
            })
            .collect())
    }

    fn issues(&self, full_name: &str) -> Result<Vec<RemoteIssue>> {
        let issues: Vec<IssuePayload> =
            self.get_paginated(&format!("/repos/{full_name}/issues"), &[("state", "all")])?;
        Ok(issues
            .into_iter()
            .filter(|i| i.pull_request.is_none())
            .map(|i| RemoteIssue { state: i.state })
            .collect())
    }

    fn readme(&self, full_name: &str) -> Result<Option<String>> {
        let path = format!("/repos/{full_name}/readme");
        match self.send(&path, self.request(&path, RAW_MEDIA_TYPE)) {
            Ok(resp) => Ok(Some(resp.text()?)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn tags(&self, full_name: &str) -> Result<Vec<String>> {
        let tags: Vec<TagPayload> =
            self.get_paginated(&format!("/repos/{full_name}/tags"), &[])?;
        Ok(tags.into_iter().map(|t| t.name).collect())
    }

    fn identity(&self) -> Result<Identity> {
        let user: Account = self.get_json("/user")?;
        let orgs: Vec<Account> = self.get_paginated("/user/orgs", &[])?;
        Ok(Identity {
            login: Some(user.login),
            organizations: orgs.into_iter().map(|o| o.login).collect(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
