//! Output file naming
//!
//! Output names come from the input basename run through a fixed table of
//! `(pattern, replacement)` rules, applied in order.

use once_cell::sync::Lazy;
use regex::Regex;

struct NameRule {
    pattern: Regex,
    replacement: &'static str,
}

static NAME_RULES: Lazy<Vec<NameRule>> = Lazy::new(|| {
    vec![
        // Source extension
        NameRule {
            pattern: Regex::new(r"(?i)\.docx$").unwrap(),
            replacement: "",
        },
        // Trailing ", Version FormulaID ...)" suffix
        NameRule {
            pattern: Regex::new(r"(?i),?\s*Version FormulaID.*\)?$").unwrap(),
            replacement: "",
        },
    ]
});

/// Strip the `.docx` extension and any trailing version suffix.
///
/// A name that is nothing but the suffix sanitizes to an empty stem.
pub fn sanitize_basename(basename: &str) -> String {
    let mut stem = basename.to_string();

    for rule in NAME_RULES.iter() {
        stem = rule
            .pattern
            .replace(&stem, rule.replacement)
            .into_owned();
    }

    stem.trim().to_string()
}

/// Name of the Markdown file written for `basename`.
pub fn output_file_name(basename: &str) -> String {
    format!("{}.md", sanitize_basename(basename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_suffix_is_stripped() {
        assert_eq!(
            output_file_name("Policy, Version FormulaID 7.2 (final).docx"),
            "Policy.md"
        );
        assert_eq!(
            output_file_name("Cargo.toml, Version FormulaID 0.1 (draft).docx"),
            "Cargo.toml.md"
        );
    }

    #[test]
    fn test_plain_names_only_lose_the_extension() {
        assert_eq!(output_file_name("plain.docx"), "plain.md");
        assert_eq!(output_file_name("SHOUTING.DOCX"), "SHOUTING.md");
    }

    #[test]
    fn test_suffix_match_ignores_case() {
        assert_eq!(
            sanitize_basename("Makefile version formulaid 3).docx"),
            "Makefile"
        );
    }

    #[test]
    fn test_other_version_words_are_kept() {
        assert_eq!(
            sanitize_basename("Version history of the build.docx"),
            "Version history of the build"
        );
        assert_eq!(sanitize_basename("Release Version 2.docx"), "Release Version 2");
    }

    #[test]
    fn test_extension_only_stripped_at_the_end() {
        assert_eq!(sanitize_basename("a.docx.backup"), "a.docx.backup");
    }

    #[test]
    fn test_name_that_is_only_a_suffix_becomes_empty() {
        assert_eq!(sanitize_basename("Version FormulaID 9.docx"), "");
        assert_eq!(output_file_name("Version FormulaID 9.docx"), ".md");
    }
}
