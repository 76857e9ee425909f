//! Markdown export
//!
//! Wraps extracted text in a fenced code block and picks the fence
//! language from the source filename.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// A filename substring and the fence language it selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FenceRule {
    pub pattern: String,
    pub language: String,
}

impl FenceRule {
    pub fn new(pattern: &str, language: &str) -> Self {
        FenceRule {
            pattern: pattern.to_lowercase(),
            language: language.to_string(),
        }
    }
}

const BUILTIN_RULES: &[(&str, &str)] = &[
    ("cargo.toml", "toml"),
    ("rust-toolchain.toml", "toml"),
    ("config.toml", "toml"),
    ("makefile", "makefile"),
    (".gitignore", "gitignore"),
    ("gitignore", "gitignore"),
];

/// Ordered fence language rules; the first matching rule wins.
#[derive(Debug, Clone)]
pub struct FenceTable {
    rules: Vec<FenceRule>,
}

impl FenceTable {
    pub fn builtin() -> Self {
        FenceTable {
            rules: BUILTIN_RULES
                .iter()
                .map(|(pattern, language)| FenceRule::new(pattern, language))
                .collect(),
        }
    }

    /// Append rules that are consulted after the existing ones.
    pub fn with_rules(mut self, extra: impl IntoIterator<Item = FenceRule>) -> Self {
        self.rules.extend(
            extra
                .into_iter()
                .map(|rule| FenceRule::new(&rule.pattern, &rule.language)),
        );
        self
    }

    /// Fence language for `file_name`, empty when nothing matches.
    pub fn language_for(&self, file_name: &str) -> &str {
        let lower = file_name.to_lowercase();
        self.rules
            .iter()
            .find(|rule| lower.contains(&rule.pattern))
            .map_or("", |rule| rule.language.as_str())
    }
}

impl Default for FenceTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Format a conversion time the way the header line records it.
///
/// Microseconds are omitted when they are zero.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    if at.nanosecond() / 1_000 == 0 {
        at.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Build the Markdown body for converted text.
pub fn compose_markdown(
    text: &str,
    source_name: &str,
    language: &str,
    converted_at: &DateTime<Utc>,
) -> String {
    format!(
        "<!-- Converted from: {source_name} on {}Z -->\n\n```{language}\n{text}\n```\n",
        format_timestamp(converted_at)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_builtin_languages() {
        let table = FenceTable::builtin();
        assert_eq!(table.language_for("Cargo.toml.docx"), "toml");
        assert_eq!(table.language_for("rust-toolchain.toml.docx"), "toml");
        assert_eq!(table.language_for(".cargo_config.toml.docx"), "toml");
        assert_eq!(table.language_for("MAKEFILE.docx"), "makefile");
        assert_eq!(table.language_for("root gitignore.docx"), "gitignore");
        assert_eq!(table.language_for("notes.docx"), "");
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(
            FenceTable::builtin().language_for("Makefile and Cargo.toml.docx"),
            "toml"
        );
    }

    #[test]
    fn test_extra_rules_come_after_builtin() {
        let table = FenceTable::builtin().with_rules([
            FenceRule::new("Dockerfile", "dockerfile"),
            FenceRule::new("cargo", "text"),
        ]);
        assert_eq!(table.language_for("dockerfile.docx"), "dockerfile");
        assert_eq!(table.language_for("Cargo.toml.docx"), "toml");
        assert_eq!(table.language_for("cargo notes.docx"), "text");
    }

    #[test]
    fn test_markdown_layout() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let md = compose_markdown("fn main() {}", "Cargo.toml.docx", "toml", &at);
        assert_eq!(
            md,
            "<!-- Converted from: Cargo.toml.docx on 2024-03-01T09:30:00Z -->\n\n```toml\nfn main() {}\n```\n"
        );
    }

    #[test]
    fn test_plain_fence_without_language() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let md = compose_markdown("hello", "notes.docx", "", &at);
        assert!(md.contains("\n```\nhello\n```\n"));
    }

    #[test]
    fn test_timestamp_keeps_microseconds() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
            + chrono::Duration::microseconds(1_500);
        assert_eq!(format_timestamp(&at), "2024-03-01T09:30:00.001500");
    }
}
