//! Package I/O and input validation
//!
//! This module opens document packages and pulls the main document part
//! out of them. Archive handles never outlive the call that opened them.

use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{ConvertError, Result};

/// Internal path of the main document part.
pub const DOCUMENT_PART: &str = "word/document.xml";

const MAX_PREALLOC: u64 = 1 << 24;

/// Read the main document part from the package at `file_path`.
pub fn read_document_part(file_path: &Path) -> Result<Vec<u8>> {
    let file = File::open(file_path)?;
    read_part(file)
}

/// Read the main document part from an in-memory package.
pub fn read_document_part_from_bytes(package: &[u8]) -> Result<Vec<u8>> {
    read_part(Cursor::new(package))
}

fn read_part<R: Read + Seek>(reader: R) -> Result<Vec<u8>> {
    let mut archive =
        ZipArchive::new(reader).map_err(|e| ConvertError::Container(e.to_string()))?;

    let mut part = match archive.by_name(DOCUMENT_PART) {
        Ok(part) => part,
        Err(ZipError::FileNotFound) => return Err(ConvertError::PartNotFound(DOCUMENT_PART)),
        Err(e) => return Err(ConvertError::Container(e.to_string())),
    };

    let mut xml = Vec::with_capacity(initial_capacity(part.size()));
    part.read_to_end(&mut xml)?;
    Ok(xml)
}

/// The declared size comes from the archive header and is not trusted past
/// [`MAX_PREALLOC`]; larger parts grow while reading.
fn initial_capacity(declared: u64) -> usize {
    declared.min(MAX_PREALLOC) as usize
}

/// Checks the input before any parsing happens
pub(crate) fn validate_input(file_path: &Path) -> Result<()> {
    if !file_path.exists() {
        return Err(ConvertError::InputMissing(file_path.to_path_buf()));
    }

    if !has_docx_extension(file_path) {
        return Err(ConvertError::WrongExtension(file_path.to_path_buf()));
    }

    Ok(())
}

/// Case-insensitive check for a `.docx` name suffix
pub fn has_docx_extension(file_path: &Path) -> bool {
    file_path
        .to_string_lossy()
        .to_lowercase()
        .ends_with(".docx")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn package_with(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_reads_document_part() {
        let package = package_with(&[(DOCUMENT_PART, "<w:document/>")]);
        let xml = read_document_part_from_bytes(&package).unwrap();
        assert_eq!(xml, b"<w:document/>");
    }

    #[test]
    fn test_missing_part_is_reported() {
        let package = package_with(&[("xl/workbook.xml", "<workbook/>")]);
        let err = read_document_part_from_bytes(&package).unwrap_err();
        assert!(matches!(err, ConvertError::PartNotFound(DOCUMENT_PART)));
    }

    #[test]
    fn test_non_archive_is_container_error() {
        let err = read_document_part_from_bytes(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, ConvertError::Container(_)));
    }

    #[test]
    fn test_declared_size_does_not_drive_allocation() {
        assert_eq!(initial_capacity(512), 512);
        assert_eq!(initial_capacity(u64::MAX), MAX_PREALLOC as usize);
    }

    #[test]
    fn test_lying_size_header_is_survived() {
        let body = "<w:document/>";
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(
                DOCUMENT_PART,
                SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored),
            )
            .unwrap();
        writer.write_all(body.as_bytes()).unwrap();
        let mut package = writer.finish().unwrap().into_inner();

        // Uncompressed size field of the central directory entry
        let central = package
            .windows(4)
            .position(|sig| sig == [0x50, 0x4b, 0x01, 0x02])
            .unwrap();
        package[central + 24..central + 28].copy_from_slice(&0xFFFF_FFF0u32.to_le_bytes());

        match read_document_part_from_bytes(&package) {
            Ok(xml) => assert_eq!(xml, body.as_bytes()),
            Err(e) => assert!(matches!(e, ConvertError::Io(_) | ConvertError::Container(_))),
        }
    }

    #[test]
    fn test_docx_extension_is_case_insensitive() {
        assert!(has_docx_extension(Path::new("Report.DOCX")));
        assert!(has_docx_extension(Path::new("dir/notes.docx")));
        assert!(!has_docx_extension(Path::new("notes.doc")));
        assert!(!has_docx_extension(Path::new("docx")));
    }
}
