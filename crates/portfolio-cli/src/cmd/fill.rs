use crate::output::print_json;
use crate::root::resolve_projects_dir;
use anyhow::Context;
use portfolio_core::config::Config;
use portfolio_core::crawl::crawl;
use portfolio_core::scaffold::{fill, ScaffoldOutcome};
use std::path::Path;

pub fn run(config: &Config, dir: Option<&Path>, ignore: &[String], json: bool) -> anyhow::Result<()> {
    let projects_dir = resolve_projects_dir(dir, config)?;
    let projects = crawl(&projects_dir, config.ignore_dotfiles)
        .with_context(|| format!("failed to crawl {}", projects_dir.display()))?;
    let outcomes = fill(&projects, ignore).context("failed to write description templates")?;

    if json {
        return print_json(&outcomes);
    }
    print_outcomes(&outcomes, "Created");
    Ok(())
}

/// One line per outcome, then a count of changes.
pub fn print_outcomes(outcomes: &[ScaffoldOutcome], verb: &str) {
    for outcome in outcomes {
        match outcome {
            ScaffoldOutcome::Created { path, .. } => println!("created  {}", path.display()),
            ScaffoldOutcome::Removed { path, .. } => println!("removed  {}", path.display()),
            ScaffoldOutcome::Ignored { name } => println!("ignored  {name}"),
        }
    }
    let changed = outcomes.iter().filter(|o| o.is_change()).count();
    let noun = if changed == 1 { "description" } else { "descriptions" };
    println!("{verb} {changed} {noun}.");
}
