//! Error types for document conversion.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors that can occur while converting a single input.
///
/// Every variant is scoped to one input: a batch turns it into a report
/// entry and carries on with the next file.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The input path does not exist.
    #[error("input not found: {}", .0.display())]
    InputMissing(PathBuf),

    /// The input name does not end in `.docx`.
    #[error("not a .docx file: {}", .0.display())]
    WrongExtension(PathBuf),

    /// The package could not be opened as a zip archive.
    #[error("cannot open document package: {0}")]
    Container(String),

    /// A required part is missing from the package.
    #[error("missing {0} (the file may be corrupted or is not a Word document)")]
    PartNotFound(&'static str),

    /// The document XML could not be parsed.
    #[error("malformed document XML: {0}")]
    MalformedDocument(String),

    /// I/O error while reading the input or writing the output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<quick_xml::Error> for ConvertError {
    fn from(err: quick_xml::Error) -> Self {
        ConvertError::MalformedDocument(err.to_string())
    }
}
