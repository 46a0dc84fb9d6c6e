//! Creating and removing placeholder description files.

use crate::crawl::CrawledProject;
use crate::error::Result;
use crate::frontmatter;
use crate::io;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScaffoldOutcome {
    Created { name: String, path: PathBuf },
    Removed { name: String, path: PathBuf },
    Ignored { name: String },
}

impl ScaffoldOutcome {
    pub fn name(&self) -> &str {
        match self {
            ScaffoldOutcome::Created { name, .. }
            | ScaffoldOutcome::Removed { name, .. }
            | ScaffoldOutcome::Ignored { name } => name,
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, ScaffoldOutcome::Ignored { .. })
    }
}

/// `my-cool_project` -> `My Cool Project`.
pub fn title_case(name: &str) -> String {
    name.split(['-', '_', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn description_template(name: &str) -> String {
    format!(
        "---
created: ????-??-??
made with:
  -
colors:
  primary:
  secondary:
layout:
  -
---

# {}
",
        title_case(name)
    )
}

fn is_ignored(project: &CrawledProject, ignore: &[String]) -> bool {
    ignore.iter().any(|i| i == &project.name)
}

/// Write the template for every project that has no description yet, or
/// only an empty one. Descriptions with content are left untouched.
pub fn fill(projects: &[CrawledProject], ignore: &[String]) -> Result<Vec<ScaffoldOutcome>> {
    let mut outcomes = Vec::new();
    for project in projects {
        if is_ignored(project, ignore) {
            outcomes.push(ScaffoldOutcome::Ignored {
                name: project.name.clone(),
            });
            continue;
        }
        if project.has_description() {
            continue;
        }
        let path = project.description_path();
        let template = description_template(&project.name);
        // The crawl saw an empty file there; replace it.
        let written = if project.description.is_some() {
            io::atomic_write(&path, template.as_bytes())?;
            true
        } else {
            io::write_if_missing(&path, template.as_bytes())?
        };
        if written {
            tracing::debug!(project = %project.name, path = %path.display(), "created description");
            outcomes.push(ScaffoldOutcome::Created {
                name: project.name.clone(),
                path,
            });
        }
    }
    Ok(outcomes)
}

/// Delete descriptions that do not fill in a single tracked field.
pub fn prune(projects: &[CrawledProject], ignore: &[String]) -> Result<Vec<ScaffoldOutcome>> {
    let mut outcomes = Vec::new();
    for project in projects {
        let Some(text) = project.description.as_deref() else {
            continue;
        };
        if is_ignored(project, ignore) {
            outcomes.push(ScaffoldOutcome::Ignored {
                name: project.name.clone(),
            });
            continue;
        }
        if frontmatter::parse(text).presence().any() {
            continue;
        }
        let path = project.description_path();
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(e.into()),
        }
        tracing::debug!(project = %project.name, path = %path.display(), "removed description");
        outcomes.push(ScaffoldOutcome::Removed {
            name: project.name.clone(),
            path,
        });
    }
    Ok(outcomes)
}
