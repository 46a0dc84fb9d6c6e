use crate::cmd::fill::print_outcomes;
use crate::output::print_json;
use crate::root::resolve_projects_dir;
use anyhow::Context;
use portfolio_core::config::Config;
use portfolio_core::crawl::crawl;
use portfolio_core::scaffold::prune;
use std::path::Path;

pub fn run(config: &Config, dir: Option<&Path>, ignore: &[String], json: bool) -> anyhow::Result<()> {
    let projects_dir = resolve_projects_dir(dir, config)?;
    let projects = crawl(&projects_dir, config.ignore_dotfiles)
        .with_context(|| format!("failed to crawl {}", projects_dir.display()))?;
    let outcomes = prune(&projects, ignore).context("failed to remove empty descriptions")?;

    if json {
        return print_json(&outcomes);
    }
    print_outcomes(&outcomes, "Removed");
    Ok(())
}
