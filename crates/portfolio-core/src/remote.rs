//! The remote repository collaborator, seen from the record builder.
//!
//! [`RepoHost`] is the seam: the builder only ever receives plain snapshots
//! ([`RemoteRepoFacts`], [`Identity`]) assembled here, so a failing request
//! never reaches the inference code as an error.

use crate::config::Config;
use crate::error::Result;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Snapshot types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueState {
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteIssue {
    pub state: IssueState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteMilestone {
    pub title: String,
    pub open_issues: u64,
    pub closed_issues: u64,
}

/// Owner and canonical URL of a hosted repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub owner_login: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteRepoFacts {
    pub owner_login: String,
    pub url: String,
    /// Open milestones only.
    pub milestones: Vec<RemoteMilestone>,
    pub issues: Vec<RemoteIssue>,
    pub readme_text: Option<String>,
    pub tags: Vec<String>,
}

/// The account running the report, and the organizations it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub login: Option<String>,
    pub organizations: Vec<String>,
}

impl Identity {
    /// Whether `owner` is the operator or one of the operator's organizations.
    pub fn owns(&self, owner: &str) -> bool {
        self.login
            .as_deref()
            .is_some_and(|login| login.eq_ignore_ascii_case(owner))
            || self
                .organizations
                .iter()
                .any(|org| org.eq_ignore_ascii_case(owner))
    }

    /// No login known. Only organization-owned repositories then count as the
    /// operator's own; everything else reads as a contribution.
    pub fn is_anonymous(&self) -> bool {
        self.login.is_none()
    }

    fn warn_if_anonymous(&self) {
        if self.is_anonymous() {
            tracing::warn!(
                organizations = self.organizations.len(),
                "operator login unknown; set github.username so contribution flags are meaningful"
            );
        }
    }

    /// Fetch the operator identity once for a whole report. Configured values
    /// fill in whatever the host cannot tell us.
    pub fn resolve(host: Option<&dyn RepoHost>, config: &Config) -> Identity {
        let mut identity = Identity {
            login: config.github.username.clone(),
            organizations: config.github.organizations.clone(),
        };
        let Some(host) = host else {
            return identity;
        };
        match host.identity() {
            Ok(fetched) => {
                if fetched.login.is_some() {
                    identity.login = fetched.login;
                }
                for org in fetched.organizations {
                    if !identity.organizations.iter().any(|o| o.eq_ignore_ascii_case(&org)) {
                        identity.organizations.push(org);
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not fetch operator identity, using configured values");
            }
        }
        identity.warn_if_anonymous();
        identity
    }
}

// ---------------------------------------------------------------------------
// RepoHost
// ---------------------------------------------------------------------------

/// A repository hosting service. `full_name` is always `owner/repo`.
///
/// Every method may fail independently; none of them is retried.
pub trait RepoHost {
    fn repository(&self, full_name: &str) -> Result<RepoSummary>;
    fn open_milestones(&self, full_name: &str) -> Result<Vec<RemoteMilestone>>;
    fn issues(&self, full_name: &str) -> Result<Vec<RemoteIssue>>;
    /// `Ok(None)` when the repository has no README.
    fn readme(&self, full_name: &str) -> Result<Option<String>>;
    fn tags(&self, full_name: &str) -> Result<Vec<String>>;
    fn identity(&self) -> Result<Identity>;
}

/// Snapshot everything the builder needs about `full_name`.
///
/// A failed repository lookup yields `None`. A failed sub-lookup only blanks
/// its own field.
pub fn fetch_remote_facts(host: &dyn RepoHost, full_name: &str) -> Option<RemoteRepoFacts> {
    let summary = match host.repository(full_name) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(repo = full_name, error = %e, "repository lookup failed");
            return None;
        }
    };

    Some(RemoteRepoFacts {
        owner_login: summary.owner_login,
        url: summary.url,
        milestones: degrade(full_name, "milestones", host.open_milestones(full_name)),
        issues: degrade(full_name, "issues", host.issues(full_name)),
        readme_text: degrade(full_name, "readme", host.readme(full_name)),
        tags: degrade(full_name, "tags", host.tags(full_name)),
    })
}

fn degrade<T: Default>(full_name: &str, what: &str, result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!(repo = full_name, lookup = what, error = %e, "remote lookup failed");
        T::default()
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use crate::error::PortfolioError;
    use std::collections::HashMap;

    fn unavailable(endpoint: &str) -> PortfolioError {
        PortfolioError::Remote {
            endpoint: endpoint.to_string(),
            status: 503,
            message: "unavailable".to_string(),
        }
    }

    /// In-memory host. Repositories missing from `repos` are "not found";
    /// names listed in `failing` fail every sub-lookup.
    #[derive(Default)]
    pub struct FakeHost {
        pub repos: HashMap<String, RemoteRepoFacts>,
        pub failing: Vec<String>,
        pub identity: Option<Identity>,
    }

    impl FakeHost {
        fn facts(&self, full_name: &str) -> Result<&RemoteRepoFacts> {
            if self.failing.iter().any(|f| f == full_name) {
                return Err(unavailable(full_name));
            }
            self.repos.get(full_name).ok_or_else(|| PortfolioError::Remote {
                endpoint: full_name.to_string(),
                status: 404,
                message: "Not Found".to_string(),
            })
        }
    }

    impl RepoHost for FakeHost {
        fn repository(&self, full_name: &str) -> Result<RepoSummary> {
            let facts = self.repos.get(full_name).ok_or_else(|| PortfolioError::Remote {
                endpoint: full_name.to_string(),
                status: 404,
                message: "Not Found".to_string(),
            })?;
            Ok(RepoSummary {
                owner_login: facts.owner_login.clone(),
                url: facts.url.clone(),
            })
        }

        fn open_milestones(&self, full_name: &str) -> Result<Vec<RemoteMilestone>> {
            Ok(self.facts(full_name)?.milestones.clone())
        }

        fn issues(&self, full_name: &str) -> Result<Vec<RemoteIssue>> {
            Ok(self.facts(full_name)?.issues.clone())
        }

        fn readme(&self, full_name: &str) -> Result<Option<String>> {
            Ok(self.facts(full_name)?.readme_text.clone())
        }

        fn tags(&self, full_name: &str) -> Result<Vec<String>> {
            Ok(self.facts(full_name)?.tags.clone())
        }

        fn identity(&self) -> Result<Identity> {
            self.identity.clone().ok_or_else(|| unavailable("/user"))
        }
    }
}
