//! Completion ratio estimation.
//!
//! Each strategy returns `None` when it has nothing to say, so callers chain
//! them with `Option::or_else` and the first one with a signal wins. `None`
//! at the end means "unknown", which is not the same thing as 0%.

use crate::remote::{IssueState, RemoteIssue, RemoteMilestone, RemoteRepoFacts};
use crate::version::{is_version_tag, Version};
use std::path::{Path, PathBuf};

/// Milestone titles that mark the "first public release" goal.
pub const RELEASE_MILESTONE_TITLES: &[&str] = &["Make it public", "Make it public!", "Release"];

const TODO_MARKER: &str = "- [ ] ";
const DONE_MARKER: &str = "- [x] ";

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Pick the milestone that best represents the project's next goal.
///
/// A sole milestone is always picked. Otherwise: the lowest version-titled
/// milestone, then a release-titled one, then the first in listing order.
pub fn select_milestone(milestones: &[RemoteMilestone]) -> Option<&RemoteMilestone> {
    if let [only] = milestones {
        return Some(only);
    }
    let lowest_version = milestones
        .iter()
        .filter(|m| is_version_tag(&m.title))
        .min_by_key(|m| Version::parse(&m.title).unwrap_or(Version::ZERO));
    lowest_version
        .or_else(|| {
            milestones
                .iter()
                .find(|m| RELEASE_MILESTONE_TITLES.contains(&m.title.as_str()))
        })
        .or_else(|| milestones.first())
}

/// Ratio of open issues in the selected open milestone.
pub fn via_milestones(milestones: &[RemoteMilestone]) -> Option<f64> {
    let milestone = select_milestone(milestones)?;
    ratio(milestone.open_issues, milestone.open_issues + milestone.closed_issues)
}

/// Ratio of open issues across the whole repository.
pub fn via_issues(issues: &[RemoteIssue]) -> Option<f64> {
    let open = issues
        .iter()
        .filter(|i| i.state == IssueState::Open)
        .count();
    ratio(open as u64, issues.len() as u64)
}

/// Ratio of ticked `- [x] ` items among all `- [ ] ` / `- [x] ` items.
pub fn via_checklist(text: &str) -> Option<f64> {
    let mut todo = 0u64;
    let mut done = 0u64;
    for line in text.lines() {
        let line = line.trim();
        if line.starts_with(TODO_MARKER) {
            todo += 1;
        } else if line.starts_with(DONE_MARKER) {
            done += 1;
        }
    }
    ratio(done, done + todo)
}

fn ratio(part: u64, total: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(part as f64 / total as f64)
}

// ---------------------------------------------------------------------------
// Fallback chains
// ---------------------------------------------------------------------------

/// Milestones, then issues, then the README checklist.
pub fn estimate_remote(facts: &RemoteRepoFacts) -> Option<f64> {
    via_milestones(&facts.milestones)
        .or_else(|| via_issues(&facts.issues))
        .or_else(|| facts.readme_text.as_deref().and_then(via_checklist))
}

/// The description's checklist, then the first markdown file under
/// `project_dir` that has one.
pub fn estimate_local(description: &str, project_dir: Option<&Path>) -> Option<f64> {
    via_checklist(description).or_else(|| {
        let dir = project_dir?;
        markdown_files(dir).into_iter().find_map(|path| {
            match std::fs::read_to_string(&path) {
                Ok(text) => via_checklist(&text),
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "skipping unreadable markdown file");
                    None
                }
            }
        })
    })
}

pub fn estimate(
    remote: Option<&RemoteRepoFacts>,
    description: &str,
    project_dir: Option<&Path>,
) -> Option<f64> {
    remote
        .and_then(estimate_remote)
        .or_else(|| estimate_local(description, project_dir))
}

/// Every `*.md` file under `dir`, depth-first in name order. Hidden entries,
/// `node_modules` and `target` are not descended into.
pub fn markdown_files(dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    collect_markdown(dir, &mut found);
    found
}

fn collect_markdown(dir: &Path, found: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    let mut paths: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
    paths.sort();

    for path in paths {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        if name.starts_with('.') || name == "node_modules" || name == "target" {
            continue;
        }
        if path.is_dir() {
            collect_markdown(&path, found);
        } else if path.extension().is_some_and(|ext| ext == "md") {
            found.push(path);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
