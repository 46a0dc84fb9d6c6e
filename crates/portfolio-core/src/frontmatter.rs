//! Front-matter extraction for `.portfoliodb/description.md` files.
//!
//! Unlike strict front-matter parsers this does not require the block to open
//! the file: every `---` line flips an "inside" toggle and every non-blank line
//! seen while inside is kept. Descriptions written by hand tend to have stray
//! blank lines before the first delimiter.

use crate::metadata::Metadata;
use serde_yaml::Value;

const DELIMITER: &str = "---";

/// Collect the lines found between `---` delimiter pairs.
pub fn extract_block(description: &str) -> String {
    let mut inside = false;
    let mut block = String::new();
    for line in description.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if line == DELIMITER {
            inside = !inside;
            continue;
        }
        if inside {
            block.push_str(line);
            block.push('\n');
        }
    }
    block
}

/// Parse the front-matter of a description into [`Metadata`].
///
/// An absent block, an empty document, a document that is not a mapping, or
/// invalid YAML all yield empty metadata.
pub fn parse(description: &str) -> Metadata {
    let block = extract_block(description);
    if block.is_empty() {
        return Metadata::default();
    }
    match serde_yaml::from_str::<Value>(&block) {
        Ok(Value::Mapping(map)) => Metadata::from_mapping(map),
        Ok(other) => {
            tracing::debug!(kind = ?value_kind(&other), "front-matter is not a mapping");
            Metadata::default()
        }
        Err(e) => {
            tracing::debug!(error = %e, "front-matter is not valid YAML");
            Metadata::default()
        }
    }
}

fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_between_delimiters() {
        let text = "---\ncreated: 2021-03-01\n\nwip: true\n---\n\n# Title\n\nbody: not yaml\n";
        assert_eq!(extract_block(text), "created: 2021-03-01\nwip: true\n");
    }

    #[test]
    fn leading_blank_lines_are_tolerated() {
        let text = "\n\n---\ntags: [cli]\n---\n# Title\n";
        let meta = parse(text);
        assert!(meta.get("tags").is_some());
    }

    #[test]
    fn second_pair_is_also_collected() {
        let text = "---\na: 1\n---\nbody\n---\nb: 2\n---\n";
        assert_eq!(extract_block(text), "a: 1\nb: 2\n");
    }

    #[test]
    fn no_block_gives_empty_metadata() {
        assert!(parse("# Just a title\n").is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn scalar_document_gives_empty_metadata() {
        assert!(parse("---\njust a string\n---\n").is_empty());
    }

    #[test]
    fn invalid_yaml_gives_empty_metadata() {
        assert!(parse("---\ncolors: [unclosed\n---\n").is_empty());
    }
}
