use crate::html;
use crate::output::{or_dash, percent, print_json, print_table};
use crate::root::resolve_projects_dir;
use anyhow::Context;
use portfolio_core::config::Config;
use portfolio_core::github::GithubClient;
use portfolio_core::remote::RepoHost;
use portfolio_core::report::{build_report, Report};
use std::path::Path;

pub fn run(
    config: &Config,
    dir: Option<&Path>,
    token: Option<String>,
    html_out: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let projects_dir = resolve_projects_dir(dir, config)?;

    let client = match token {
        Some(token) => Some(
            GithubClient::from_config(&config.github, Some(token))
                .context("failed to set up the GitHub client")?,
        ),
        None => {
            tracing::info!("no GitHub token, skipping remote lookups");
            None
        }
    };
    let host = client.as_ref().map(|c| c as &dyn RepoHost);

    let report = build_report(config, &projects_dir, host)
        .with_context(|| format!("failed to build report for {}", projects_dir.display()))?;

    if let Some(path) = html_out {
        let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
        std::fs::write(path, html::render(&report, &generated_at))
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), projects = report.records.len(), "wrote dashboard");
        if !json {
            println!("Wrote {}", path.display());
            return Ok(());
        }
    }

    if json {
        return print_json(&report);
    }
    print_report(&report);
    Ok(())
}

fn print_report(report: &Report) {
    if report.records.is_empty() {
        println!("No projects.");
        return;
    }

    let rows: Vec<Vec<String>> = report
        .records
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                r.state.to_string(),
                percent(r.progress),
                or_dash(r.latest_version.as_deref()),
                if r.contribution { "yes" } else { "" }.to_string(),
                or_dash(r.github_url.as_deref()),
            ]
        })
        .collect();
    print_table(
        &["project", "state", "progress", "version", "contribution", "github"],
        &rows,
    );

    let summary: Vec<String> = report
        .counts()
        .iter()
        .map(|(state, n)| format!("{n} {state}"))
        .collect();
    println!("\n{} projects: {}", report.records.len(), summary.join(", "));
}
