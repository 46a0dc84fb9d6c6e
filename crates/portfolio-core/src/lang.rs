/// Languages the dashboard tracks translations for.
pub const TRACKED_LANGUAGES: &[&str] = &["fr", "en"];

/// Whether `text` holds a `:: <lang>` section marker line.
///
/// Lines are compared after trimming surrounding whitespace, exactly and
/// case-sensitively: `:: english` does not count as `:: en`.
pub fn has_lang(text: &str, lang: &str) -> bool {
    let marker = format!(":: {lang}");
    text.lines().any(|line| line.trim() == marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_must_match_exactly() {
        let text = "# Title\n\n:: fr\n\nBonjour\n\n  :: en  \n\nHello\n";
        assert!(has_lang(text, "fr"));
        assert!(has_lang(text, "en"));
        assert!(!has_lang(text, "de"));
    }

    #[test]
    fn longer_or_differently_cased_markers_do_not_match() {
        assert!(!has_lang(":: english\n", "en"));
        assert!(!has_lang(":: EN\n", "en"));
        assert!(!has_lang("::en\n", "en"));
        assert!(!has_lang("see :: en here\n", "en"));
    }

    #[test]
    fn empty_text_has_no_language() {
        assert!(!has_lang("", "en"));
    }
}
