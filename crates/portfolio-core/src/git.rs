use crate::error::{PortfolioError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// What the local checkout says about a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalGit {
    /// `origin` URLs, fetch and push deduplicated, in listing order.
    pub remotes: Vec<String>,
    pub tags: Vec<String>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

static ORIGIN_RE: OnceLock<Regex> = OnceLock::new();
static GITHUB_RE: OnceLock<Regex> = OnceLock::new();

fn origin_re() -> &'static Regex {
    ORIGIN_RE.get_or_init(|| {
        Regex::new(r"^origin\s+([A-Za-z][A-Za-z0-9+.\-]*://\S+)\s+\((?:fetch|push)\)$").unwrap()
    })
}

fn github_re() -> &'static Regex {
    GITHUB_RE.get_or_init(|| {
        Regex::new(r"^[a-z+]+://(?:[^@/]+@)?github\.com[:/]([^/\s]+)/([^/\s]+?)(?:\.git)?/?$")
            .unwrap()
    })
}

/// Origin URLs from `git remote -v` output.
pub fn parse_remotes(output: &str) -> Vec<String> {
    let mut remotes: Vec<String> = Vec::new();
    for line in output.lines() {
        if let Some(caps) = origin_re().captures(line.trim()) {
            let url = caps[1].to_string();
            if !remotes.contains(&url) {
                remotes.push(url);
            }
        }
    }
    remotes
}

pub fn parse_tags(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// `owner/repo` for a GitHub remote URL.
pub fn github_full_name(url: &str) -> Result<String> {
    let caps = github_re()
        .captures(url)
        .ok_or_else(|| PortfolioError::InvalidRemote(url.to_string()))?;
    Ok(format!("{}/{}", &caps[1], &caps[2]))
}

/// The first remote that points at GitHub, as `owner/repo`.
pub fn github_remote(remotes: &[String]) -> Option<String> {
    remotes.iter().find_map(|r| match github_full_name(r) {
        Ok(name) => Some(name),
        Err(e) => {
            tracing::debug!(error = %e, "skipping remote");
            None
        }
    })
}

// ---------------------------------------------------------------------------
// Reading a checkout
// ---------------------------------------------------------------------------

pub fn is_checkout(dir: &Path) -> bool {
    dir.join(".git").exists()
}

fn run_git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = std::process::Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()?;
    if !output.status.success() {
        return Err(PortfolioError::Git {
            command: args.join(" "),
            dir: dir.display().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Remotes and tags of the checkout in `dir`, or `None` when `dir` is not a
/// checkout. A failing git command only empties its own field.
pub fn read_local_git(dir: &Path) -> Option<LocalGit> {
    if !is_checkout(dir) {
        return None;
    }
    let remotes = match run_git(dir, &["remote", "-v"]) {
        Ok(out) => parse_remotes(&out),
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "could not list git remotes");
            Vec::new()
        }
    };
    let tags = match run_git(dir, &["tag", "--list"]) {
        Ok(out) => parse_tags(&out),
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "could not list git tags");
            Vec::new()
        }
    };
    Some(LocalGit { remotes, tags })
}
