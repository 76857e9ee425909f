//! Document extraction module
//!
//! This module opens Word (.docx) packages and turns their body into a
//! single normalized text stream, paragraphs and tables in reading order.

pub mod cleanup;
pub mod io;
pub mod loader;
pub mod models;
pub mod parsing;

pub use cleanup::{normalize_fragments, normalize_text};
pub use io::{read_document_part, read_document_part_from_bytes, DOCUMENT_PART};
pub use loader::{Extractor, RawXmlExtractor, Strategy, TextExtractor};
#[cfg(feature = "rich")]
pub use loader::RichExtractor;
pub use models::*;
