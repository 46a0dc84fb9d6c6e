use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A project that exists only as a note on the idea board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaEntry {
    pub name: String,
    pub description: String,
    /// Whatever follows the name sentence.
    pub rest: String,
}

static IDEA_RE: OnceLock<Regex> = OnceLock::new();

fn idea_re() -> &'static Regex {
    IDEA_RE.get_or_init(|| {
        Regex::new(r"(?s)^\s*(?P<description>.+?)\s+named\s+(?P<name>[^\s.]+)\.\s*(?P<rest>.*?)\s*$")
            .unwrap()
    })
}

/// Parse `<description> named <name>. <rest>`.
pub fn parse_idea(note: &str) -> Option<IdeaEntry> {
    let caps = idea_re().captures(note)?;
    Some(IdeaEntry {
        name: caps["name"].to_string(),
        description: caps["description"].to_string(),
        rest: caps["rest"].to_string(),
    })
}

/// Parse every note, skipping the ones that do not name a project.
pub fn parse_ideas<S: AsRef<str>>(notes: &[S]) -> Vec<IdeaEntry> {
    notes
        .iter()
        .filter_map(|note| {
            let note = note.as_ref();
            let idea = parse_idea(note);
            if idea.is_none() {
                tracing::debug!(note, "idea note does not name a project");
            }
            idea
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_note() {
        let idea = parse_idea("A tiny modular synth named bleep. Needs a web UI.").unwrap();
        assert_eq!(idea.name, "bleep");
        assert_eq!(idea.description, "A tiny modular synth");
        assert_eq!(idea.rest, "Needs a web UI.");
    }

    #[test]
    fn rest_may_be_empty() {
        let idea = parse_idea("A CLI for recipes named cooked.").unwrap();
        assert_eq!(idea.name, "cooked");
        assert_eq!(idea.rest, "");
    }

    #[test]
    fn names_may_contain_dashes() {
        let idea = parse_idea("Dotfiles manager named dot-sync. Later.").unwrap();
        assert_eq!(idea.name, "dot-sync");
    }

    #[test]
    fn unnamed_notes_are_skipped() {
        assert!(parse_idea("buy milk").is_none());
        assert!(parse_idea("named thing. no description").is_none());
        let ideas = parse_ideas(&["buy milk", "A game named quest. Soon"]);
        assert_eq!(ideas.len(), 1);
        assert_eq!(ideas[0].name, "quest");
    }
}
