//! docxfence: Word documents to fenced Markdown
//!
//! This library extracts the readable text of Microsoft Word (.docx)
//! documents, paragraphs and tables in reading order, and writes it into
//! Markdown files as a single fenced code block.

pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod export;
pub mod naming;

/// Report output format
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default)]
pub enum ReportFormat {
    /// Aligned input/status table
    #[default]
    Table,
    /// JSON array of entries
    Json,
}

// Re-export commonly used types
pub use config::Config;
pub use convert::{render_report, Converter};
pub use document::{ConversionOutcome, Extractor, ReportEntry, Strategy};
pub use error::{ConvertError, Result};
pub use export::{FenceRule, FenceTable};
