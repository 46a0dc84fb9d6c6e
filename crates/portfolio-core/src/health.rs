use crate::crawl::CrawledProject;
use crate::frontmatter;
use crate::lang::{has_lang, TRACKED_LANGUAGES};
use crate::metadata::PresenceMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// How complete one project's description is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptionHealth {
    pub name: String,
    pub description_path: PathBuf,
    pub has_description: bool,
    pub presence: PresenceMap,
    /// Tracked language -> has a `:: <lang>` section.
    pub languages: BTreeMap<String, bool>,
}

impl DescriptionHealth {
    pub fn assess(project: &CrawledProject) -> Self {
        let text = project.description.as_deref().unwrap_or_default();
        Self {
            name: project.name.clone(),
            description_path: project.description_path(),
            has_description: project.has_description(),
            presence: frontmatter::parse(text).presence(),
            languages: TRACKED_LANGUAGES
                .iter()
                .map(|lang| (lang.to_string(), has_lang(text, lang)))
                .collect(),
        }
    }

    /// Every field present and every tracked language written.
    pub fn is_complete(&self) -> bool {
        self.presence.all() && self.languages.values().all(|&v| v)
    }

    fn is_worth_showing(&self) -> bool {
        self.has_description && self.presence.any()
    }
}

/// Rows for the dashboard. Without `show_all`, projects that have no
/// description or no field filled in at all are left out.
pub fn dashboard(projects: &[CrawledProject], show_all: bool) -> Vec<DescriptionHealth> {
    projects
        .iter()
        .map(DescriptionHealth::assess)
        .filter(|h| show_all || h.is_worth_showing())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetadataField;

    const COMPLETE: &str = "---
created: 2021-03-01
made with: [rust]
colors:
  primary: '#000'
layout: [page]
tags: [cli]
wip: false
---
:: fr
Bonjour
:: en
Hello
";

    fn project(name: &str, description: Option<&str>) -> CrawledProject {
        CrawledProject {
            name: name.to_string(),
            directory: PathBuf::from(format!("/projects/{name}")),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn complete_description() {
        let health = DescriptionHealth::assess(&project("full", Some(COMPLETE)));
        assert!(health.is_complete());
        assert_eq!(
            health.description_path,
            PathBuf::from("/projects/full/.portfoliodb/description.md")
        );
    }

    #[test]
    fn missing_language_is_incomplete() {
        let text = COMPLETE.replace(":: en\nHello\n", "");
        let health = DescriptionHealth::assess(&project("half", Some(&text)));
        assert!(health.presence.all());
        assert!(health.languages["fr"]);
        assert!(!health.languages["en"]);
        assert!(!health.is_complete());
    }

    #[test]
    fn template_only_description_is_hidden() {
        let template = "---\ncreated: ????-??-??\nmade with:\n  - \n---\n# Blank\n";
        let projects = vec![
            project("bare", None),
            project("template", Some(template)),
            project("partial", Some("---\ntags: [web]\n---\n")),
            project("empty", Some("")),
        ];

        let shown = dashboard(&projects, false);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].name, "partial");
        assert!(shown[0].presence.get(MetadataField::Tags));
        assert!(!shown[0].presence.get(MetadataField::Created));

        let all = dashboard(&projects, true);
        assert_eq!(all.len(), 4);
        assert!(!all[3].has_description);
    }
}
