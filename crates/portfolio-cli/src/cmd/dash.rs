use crate::output::{mark, print_json, print_table};
use crate::root::resolve_projects_dir;
use anyhow::Context;
use portfolio_core::config::Config;
use portfolio_core::crawl::crawl;
use portfolio_core::health::dashboard;
use portfolio_core::lang::TRACKED_LANGUAGES;
use portfolio_core::metadata::MetadataField;
use std::path::Path;

pub fn run(config: &Config, dir: Option<&Path>, show_all: bool, json: bool) -> anyhow::Result<()> {
    let projects_dir = resolve_projects_dir(dir, config)?;
    let projects = crawl(&projects_dir, config.ignore_dotfiles)
        .with_context(|| format!("failed to crawl {}", projects_dir.display()))?;
    let rows = dashboard(&projects, show_all);

    if json {
        #[derive(serde::Serialize)]
        struct DashRow<'a> {
            #[serde(flatten)]
            health: &'a portfolio_core::health::DescriptionHealth,
            complete: bool,
        }
        let out: Vec<DashRow> = rows
            .iter()
            .map(|health| DashRow {
                health,
                complete: health.is_complete(),
            })
            .collect();
        return print_json(&out);
    }

    if rows.is_empty() {
        println!("No described projects in {}.", projects_dir.display());
        return Ok(());
    }

    let lang_headers: Vec<String> = TRACKED_LANGUAGES.iter().map(|l| format!(":: {l}")).collect();
    let mut headers: Vec<&str> = vec!["project"];
    headers.extend(MetadataField::all().iter().map(|f| f.key()));
    headers.extend(lang_headers.iter().map(String::as_str));
    headers.push("description");

    let table: Vec<Vec<String>> = rows
        .iter()
        .map(|h| {
            let name = if h.is_complete() {
                h.name.clone()
            } else {
                format!("{} *", h.name)
            };
            let mut row = vec![name];
            row.extend(MetadataField::all().iter().map(|&f| mark(h.presence.get(f))));
            row.extend(
                TRACKED_LANGUAGES
                    .iter()
                    .map(|l| mark(h.languages.get(*l).copied().unwrap_or(false))),
            );
            row.push(h.description_path.display().to_string());
            row
        })
        .collect();
    print_table(&headers, &table);

    let incomplete = rows.iter().filter(|h| !h.is_complete()).count();
    if incomplete > 0 {
        println!("\n* {incomplete} of {} incomplete", rows.len());
    }
    Ok(())
}
