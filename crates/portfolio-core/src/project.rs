//! Per-project record construction.
//!
//! A [`ProjectDescriptor`] gathers everything known about one project (disk,
//! front-matter, local git, GitHub). [`ProjectRecord::build`] turns it into the
//! record the dashboards render. Building never fails: every missing or
//! broken source shows up as an absent field.

use crate::crawl::CrawledProject;
use crate::frontmatter;
use crate::git::{self, LocalGit};
use crate::ideas::IdeaEntry;
use crate::lang::{has_lang, TRACKED_LANGUAGES};
use crate::metadata::{Metadata, PresenceMap};
use crate::paths;
use crate::progress;
use crate::remote::{fetch_remote_facts, Identity, RemoteRepoFacts, RepoHost};
use crate::version;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// LifecycleState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Seed,
    Draft,
    Wip,
    Done,
}

impl LifecycleState {
    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleState::Seed => "seed",
            LifecycleState::Draft => "draft",
            LifecycleState::Wip => "wip",
            LifecycleState::Done => "done",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ProjectDescriptor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDescriptor {
    pub name: String,
    /// `None` for idea-board entries.
    pub directory: Option<PathBuf>,
    /// Empty when there is no description file.
    pub description_text: String,
    pub metadata: Metadata,
    pub local_git: Option<LocalGit>,
    pub remote_repo: Option<RemoteRepoFacts>,
    /// The idea note this project came from, for directory-less projects.
    pub idea: Option<IdeaEntry>,
}

impl ProjectDescriptor {
    /// Gather on-disk, git and (when `host` is given) GitHub facts.
    pub fn from_crawl(project: &CrawledProject, host: Option<&dyn RepoHost>) -> Self {
        let description_text = project.description.clone().unwrap_or_default();
        let metadata = frontmatter::parse(&description_text);
        let local_git = git::read_local_git(&project.directory);

        let remote_repo = match (host, &local_git) {
            (Some(host), Some(local)) => git::github_remote(&local.remotes).and_then(|full_name| {
                tracing::debug!(project = %project.name, repo = %full_name, "fetching remote facts");
                fetch_remote_facts(host, &full_name)
            }),
            _ => None,
        };

        Self {
            name: project.name.clone(),
            directory: Some(project.directory.clone()),
            description_text,
            metadata,
            local_git,
            remote_repo,
            idea: None,
        }
    }

    pub fn from_idea(idea: IdeaEntry) -> Self {
        Self {
            name: idea.name.clone(),
            directory: None,
            description_text: String::new(),
            metadata: Metadata::default(),
            local_git: None,
            remote_repo: None,
            idea: Some(idea),
        }
    }

    fn has_description(&self) -> bool {
        !self.description_text.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Derived fields
// ---------------------------------------------------------------------------

/// Later rules override earlier ones; a missing directory short-circuits.
pub fn lifecycle_state(project: &ProjectDescriptor) -> LifecycleState {
    if project.directory.is_none() {
        return LifecycleState::Seed;
    }

    let mut state = LifecycleState::Draft;

    let has_remote = project
        .local_git
        .as_ref()
        .is_some_and(|g| !g.remotes.is_empty());
    if project.has_description() || has_remote {
        state = LifecycleState::Wip;
    }

    if project.has_description()
        && (project.metadata.is_truthy("finished") || !project.metadata.is_truthy("wip"))
    {
        state = LifecycleState::Done;
    }

    state
}

/// Explicitly flagged, or hosted under an account the operator does not own.
pub fn is_contribution(project: &ProjectDescriptor, identity: &Identity) -> bool {
    if project.metadata.is_truthy("contribution") {
        return true;
    }
    project
        .remote_repo
        .as_ref()
        .is_some_and(|remote| !identity.owns(&remote.owner_login))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Logo {
    /// An image file on disk.
    File(PathBuf),
    /// An absolute URL referenced from the description.
    Url(String),
    /// The built-in asset.
    Default(String),
}

impl Logo {
    pub fn as_src(&self) -> String {
        match self {
            Logo::File(path) => path.display().to_string(),
            Logo::Url(url) | Logo::Default(url) => url.clone(),
        }
    }
}

static IMAGE_LINE_RE: OnceLock<Regex> = OnceLock::new();

fn image_line_re() -> &'static Regex {
    IMAGE_LINE_RE.get_or_init(|| {
        Regex::new(r#"(?i)^(?:>\s*)?!\[[^\]]*\]\(\s*<?([^\s)>]+\.(?:png|jpe?g|webp))>?(?:\s+"[^"]*")?\s*\)"#)
            .unwrap()
    })
}

/// The first image linked at the start of a markdown (or blockquote) line.
pub fn description_image(text: &str) -> Option<&str> {
    text.lines()
        .find_map(|line| image_line_re().captures(line.trim_start()))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// `logo.png`, `visual-identity/logo.png`, the description's first image,
/// then the default asset. Directory-less projects get nothing.
pub fn resolve_logo(project: &ProjectDescriptor, default_logo: &str) -> Option<Logo> {
    let dir = project.directory.as_deref()?;

    let candidates = [
        dir.join(paths::LOGO_FILE),
        dir.join(paths::VISUAL_IDENTITY_DIR).join(paths::LOGO_FILE),
    ];
    if let Some(found) = candidates.into_iter().find(|p| p.is_file()) {
        return Some(Logo::File(found));
    }

    if let Some(reference) = description_image(&project.description_text) {
        return Some(image_reference(dir, reference));
    }

    Some(Logo::Default(default_logo.to_string()))
}

/// Description images are relative to the `.portfoliodb` folder.
fn image_reference(dir: &Path, reference: &str) -> Logo {
    if reference.contains("://") {
        Logo::Url(reference.to_string())
    } else {
        Logo::File(paths::portfoliodb_dir(dir).join(reference))
    }
}

pub fn github_url(
    state: LifecycleState,
    project: &ProjectDescriptor,
    idea_board_url: Option<&str>,
) -> Option<String> {
    if state == LifecycleState::Seed {
        return idea_board_url.map(str::to_string);
    }
    project.remote_repo.as_ref().map(|r| r.url.clone())
}

/// Remote tags when GitHub answered, else the local checkout's tags.
fn version_tags(project: &ProjectDescriptor) -> &[String] {
    match (&project.remote_repo, &project.local_git) {
        (Some(remote), _) => &remote.tags,
        (None, Some(local)) => &local.tags,
        (None, None) => &[],
    }
}

// ---------------------------------------------------------------------------
// ProjectRecord
// ---------------------------------------------------------------------------

/// Run-wide inputs shared by every record.
pub struct BuildContext<'a> {
    pub identity: &'a Identity,
    pub idea_board_url: Option<&'a str>,
    pub default_logo: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectRecord {
    pub name: String,
    pub directory: Option<PathBuf>,
    pub state: LifecycleState,
    /// In `[0, 1]`; `None` when no source had anything to say.
    pub progress: Option<f64>,
    /// Version-like tags, newest first.
    pub versions: Vec<String>,
    pub latest_version: Option<String>,
    pub logo: Option<Logo>,
    pub contribution: bool,
    pub github_url: Option<String>,
    pub presence: PresenceMap,
    /// Tracked languages that have a section in the description.
    pub languages: Vec<String>,
    /// One-line summary, for idea-board entries.
    pub summary: Option<String>,
}

impl ProjectRecord {
    pub fn build(project: &ProjectDescriptor, ctx: &BuildContext) -> Self {
        let state = lifecycle_state(project);

        let progress = match state {
            LifecycleState::Seed => None,
            _ => progress::estimate(
                project.remote_repo.as_ref(),
                &project.description_text,
                project.directory.as_deref(),
            ),
        };

        let versions = version::sort_versions(version_tags(project));
        let latest_version = versions.first().cloned();

        let record = Self {
            name: project.name.clone(),
            directory: project.directory.clone(),
            state,
            progress,
            latest_version,
            versions,
            logo: resolve_logo(project, ctx.default_logo),
            contribution: is_contribution(project, ctx.identity),
            github_url: github_url(state, project, ctx.idea_board_url),
            presence: project.metadata.presence(),
            languages: TRACKED_LANGUAGES
                .iter()
                .filter(|lang| has_lang(&project.description_text, lang))
                .map(|lang| lang.to_string())
                .collect(),
            summary: project.idea.as_ref().map(|i| i.description.clone()),
        };
        tracing::debug!(
            project = %record.name,
            state = %record.state,
            progress = ?record.progress,
            "built project record"
        );
        record
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
