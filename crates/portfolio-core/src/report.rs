use crate::config::Config;
use crate::crawl::{self, CrawledProject};
use crate::error::Result;
use crate::ideas::{self, IdeaEntry};
use crate::project::{BuildContext, LifecycleState, ProjectDescriptor, ProjectRecord};
use crate::remote::{Identity, RepoHost};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub identity: Identity,
    pub records: Vec<ProjectRecord>,
}

impl Report {
    pub fn counts(&self) -> BTreeMap<LifecycleState, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.state).or_insert(0) += 1;
        }
        counts
    }
}

/// Records for every crawled project, then for every idea whose name is not
/// already taken by a project on disk.
pub fn build_records(
    projects: &[CrawledProject],
    ideas: Vec<IdeaEntry>,
    host: Option<&dyn RepoHost>,
    ctx: &BuildContext,
) -> Vec<ProjectRecord> {
    let mut records: Vec<ProjectRecord> = projects
        .iter()
        .map(|p| ProjectRecord::build(&ProjectDescriptor::from_crawl(p, host), ctx))
        .collect();

    for idea in ideas {
        if projects.iter().any(|p| p.name == idea.name) {
            tracing::debug!(name = %idea.name, "idea already has a project folder");
            continue;
        }
        records.push(ProjectRecord::build(&ProjectDescriptor::from_idea(idea), ctx));
    }
    records
}

/// Crawl `projects_dir` and build the whole report. Only an unreadable
/// projects directory is an error.
pub fn build_report(config: &Config, projects_dir: &Path, host: Option<&dyn RepoHost>) -> Result<Report> {
    let projects = crawl::crawl(projects_dir, config.ignore_dotfiles)?;
    let identity = Identity::resolve(host, config);
    let ideas = ideas::parse_ideas(&config.ideas.notes);
    tracing::info!(
        projects = projects.len(),
        ideas = ideas.len(),
        online = host.is_some(),
        "building report"
    );

    let ctx = BuildContext {
        identity: &identity,
        idea_board_url: config.ideas.board_url.as_deref(),
        default_logo: &config.default_logo,
    };
    let records = build_records(&projects, ideas, host, &ctx);
    Ok(Report { identity, records })
}
