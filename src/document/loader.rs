//! Extraction strategies and orchestration
//!
//! This module picks an extraction strategy at startup and runs it on a
//! package. The structured strategy (docx-rs) is tried first when it is
//! compiled in; any failure there falls back to the raw XML strategy on the
//! same bytes. Only a raw XML failure is reported to the caller.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use super::cleanup::normalize_fragments;
use super::io::{read_document_part_from_bytes, validate_input};
use super::parsing::walker::collect_fragments;
use super::parsing::xml::{body_children, parse_document_xml};
use crate::error::Result;

/// Which extraction strategies may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Structured object model first, raw XML as fallback
    #[default]
    Auto,
    /// Raw XML only
    Raw,
}

/// One way of turning package bytes into ordered text fragments.
pub trait TextExtractor {
    fn name(&self) -> &'static str;

    fn extract(&self, package: &[u8]) -> Result<Vec<String>>;
}

/// Reads `word/document.xml` straight out of the archive.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawXmlExtractor;

impl TextExtractor for RawXmlExtractor {
    fn name(&self) -> &'static str {
        "raw-xml"
    }

    fn extract(&self, package: &[u8]) -> Result<Vec<String>> {
        let xml = read_document_part_from_bytes(package)?;
        let root = parse_document_xml(&xml)?;
        Ok(collect_fragments(body_children(&root)))
    }
}

/// Walks the docx-rs object model of the package.
#[cfg(feature = "rich")]
#[derive(Debug, Clone, Copy, Default)]
pub struct RichExtractor;

#[cfg(feature = "rich")]
impl TextExtractor for RichExtractor {
    fn name(&self) -> &'static str {
        "docx-rs"
    }

    fn extract(&self, package: &[u8]) -> Result<Vec<String>> {
        let xml = read_document_part_from_bytes(package)?;
        if super::parsing::rich::has_double_escaped_text(&xml) {
            return Err(crate::error::ConvertError::MalformedDocument(
                "escaped entity text would be decoded twice by docx-rs".to_string(),
            ));
        }

        let docx = docx_rs::read_docx(package)
            .map_err(|e| crate::error::ConvertError::MalformedDocument(e.to_string()))?;
        let body = super::parsing::rich::lower_document(&docx.document);
        Ok(collect_fragments(&body))
    }
}

/// Extraction with an optional preferred strategy and the raw XML fallback.
pub struct Extractor {
    preferred: Option<Box<dyn TextExtractor>>,
    fallback: Box<dyn TextExtractor>,
}

impl Extractor {
    /// Select strategies for `strategy` from what this build provides.
    pub fn new(strategy: Strategy) -> Self {
        let preferred = match strategy {
            Strategy::Auto => structured_extractor(),
            Strategy::Raw => None,
        };

        match &preferred {
            Some(extractor) => debug!("using {} extractor with raw-xml fallback", extractor.name()),
            None => debug!("using raw-xml extractor only"),
        }

        Self::with_extractors(preferred, Box::new(RawXmlExtractor))
    }

    /// Build an extractor from explicit strategies.
    pub fn with_extractors(
        preferred: Option<Box<dyn TextExtractor>>,
        fallback: Box<dyn TextExtractor>,
    ) -> Self {
        Extractor {
            preferred,
            fallback,
        }
    }

    /// Name of the strategy tried first.
    pub fn primary_name(&self) -> &'static str {
        self.preferred
            .as_ref()
            .map_or(self.fallback.name(), |extractor| extractor.name())
    }

    /// Ordered fragments of an in-memory package.
    pub fn extract_fragments(&self, package: &[u8]) -> Result<Vec<String>> {
        if let Some(preferred) = &self.preferred {
            match preferred.extract(package) {
                Ok(fragments) => return Ok(fragments),
                Err(e) => debug!(
                    "{} extraction failed ({e}), retrying with {}",
                    preferred.name(),
                    self.fallback.name()
                ),
            }
        }

        self.fallback.extract(package)
    }

    /// Normalized text of an in-memory package.
    pub fn extract_text_from_bytes(&self, package: &[u8]) -> Result<String> {
        let fragments = self.extract_fragments(package)?;
        Ok(normalize_fragments(fragments.into_iter().map(Some)))
    }

    /// Normalized text of the package at `file_path`.
    pub fn extract_text(&self, file_path: &Path) -> Result<String> {
        validate_input(file_path)?;
        let package = std::fs::read(file_path)?;
        self.extract_text_from_bytes(&package)
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(Strategy::Auto)
    }
}

#[cfg(feature = "rich")]
fn structured_extractor() -> Option<Box<dyn TextExtractor>> {
    Some(Box::new(RichExtractor))
}

#[cfg(not(feature = "rich"))]
fn structured_extractor() -> Option<Box<dyn TextExtractor>> {
    None
}
