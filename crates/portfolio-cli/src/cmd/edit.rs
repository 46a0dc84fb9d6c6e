use crate::root::resolve_projects_dir;
use anyhow::{bail, Context};
use portfolio_core::config::Config;
use portfolio_core::crawl::{crawl, find};
use std::path::Path;
use std::process::Command;

const DEFAULT_EDITOR: &str = "nano";

pub fn run(config: &Config, dir: Option<&Path>, project: &str) -> anyhow::Result<()> {
    let projects_dir = resolve_projects_dir(dir, config)?;
    let projects = crawl(&projects_dir, config.ignore_dotfiles)
        .with_context(|| format!("failed to crawl {}", projects_dir.display()))?;
    let found = find(&projects, project)?;

    let path = found.description_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let editor = std::env::var("EDITOR")
        .ok()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string());
    // EDITOR may carry flags, e.g. "code --wait".
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or(DEFAULT_EDITOR);

    tracing::debug!(editor = %editor, path = %path.display(), "launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(&path)
        .status()
        .with_context(|| format!("failed to launch editor '{editor}'"))?;
    if !status.success() {
        bail!("editor '{editor}' exited with {status}");
    }
    Ok(())
}
