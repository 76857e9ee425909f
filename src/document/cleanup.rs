//! Post-processing and cleanup utilities
//!
//! This module joins extracted fragments into one text stream and
//! normalizes its blank lines.

use once_cell::sync::Lazy;
use regex::Regex;

static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Join fragments into normalized text.
///
/// `None` entries are dropped. Empty strings are kept: an empty fragment is
/// how a table asks for a blank line after itself.
pub fn normalize_fragments<I, S>(fragments: I) -> String
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let joined = fragments
        .into_iter()
        .flatten()
        .map(|fragment| fragment.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join("\n");

    normalize_text(&joined)
}

/// Collapse three or more consecutive newlines into one blank line and trim.
pub fn normalize_text(text: &str) -> String {
    BLANK_RUN.replace_all(text, "\n\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_runs_collapse_to_one_blank_line() {
        let fragments = ["a", "", "", "", "b"].map(Some);
        assert_eq!(normalize_fragments(fragments), "a\n\nb");
    }

    #[test]
    fn test_single_blank_line_is_kept() {
        let fragments = ["a", "", "b"].map(Some);
        assert_eq!(normalize_fragments(fragments), "a\n\nb");
    }

    #[test]
    fn test_none_entries_are_skipped_but_empty_strings_are_not() {
        let fragments = vec![Some("a"), None, Some("b"), Some(""), Some("c")];
        assert_eq!(normalize_fragments(fragments), "a\nb\n\nc");
    }

    #[test]
    fn test_edges_are_trimmed() {
        let fragments = ["", "", "  body  ", "", ""].map(Some);
        assert_eq!(normalize_fragments(fragments), "body");
    }

    #[test]
    fn test_normalizing_twice_changes_nothing() {
        let inputs = [
            "a\n\n\n\n\nb\n\n\nc",
            "\n\n  x \n y\n\n",
            "table\n\n\n\nafter",
            "",
        ];
        for input in inputs {
            let once = normalize_text(input);
            assert_eq!(normalize_text(&once), once);
        }
    }

    #[test]
    fn test_no_fragments_is_empty_text() {
        let fragments: Vec<Option<String>> = Vec::new();
        assert_eq!(normalize_fragments(fragments), "");
    }
}
