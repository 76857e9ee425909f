//! Per-file conversion and batch processing
//!
//! Each input runs through extraction, fencing and naming on its own. A
//! failure is recorded as that input's outcome and never stops the batch.

use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::document::io::has_docx_extension;
use crate::document::{ConversionOutcome, Extractor, ReportEntry, Strategy};
use crate::error::{ConvertError, Result};
use crate::export::{compose_markdown, FenceTable};
use crate::naming::output_file_name;

/// Converts `.docx` files into fenced Markdown files in one directory.
pub struct Converter {
    extractor: Extractor,
    fences: FenceTable,
    output_dir: PathBuf,
}

impl Converter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Converter {
            extractor: Extractor::default(),
            fences: FenceTable::default(),
            output_dir: output_dir.into(),
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.extractor = Extractor::new(strategy);
        self
    }

    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_fences(mut self, fences: FenceTable) -> Self {
        self.fences = fences;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Convert one file and return the path of the written Markdown.
    pub fn convert_one(&self, input: &Path) -> Result<PathBuf> {
        let text = self.extractor.extract_text(input)?;

        let base = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| ConvertError::WrongExtension(input.to_path_buf()))?;
        let language = self.fences.language_for(&base);
        let markdown = compose_markdown(&text, &base, language, &Utc::now());

        let out_path = self.output_dir.join(output_file_name(&base));
        fs::write(&out_path, markdown)?;
        info!("wrote {}", out_path.display());
        Ok(out_path)
    }

    /// Outcome of converting `input`; never fails.
    pub fn outcome_for(&self, input: &Path) -> ConversionOutcome {
        if !input.exists() {
            return ConversionOutcome::Missing;
        }
        if !has_docx_extension(input) {
            return ConversionOutcome::SkippedNotDocx;
        }

        match self.convert_one(input) {
            Ok(out_path) => ConversionOutcome::Converted(out_path),
            Err(e) => {
                warn!("failed to convert {}: {e}", input.display());
                ConversionOutcome::Failed(e.to_string())
            }
        }
    }

    /// Convert every input in order, one report entry per input.
    pub fn convert_batch<P: AsRef<Path>>(&self, inputs: &[P]) -> Vec<ReportEntry> {
        inputs
            .iter()
            .map(|input| {
                let input = input.as_ref();
                ReportEntry {
                    input: input.to_path_buf(),
                    outcome: self.outcome_for(input),
                }
            })
            .collect()
    }
}

/// Render the report as an aligned two-column table.
pub fn render_report(entries: &[ReportEntry]) -> String {
    let names: Vec<String> = entries.iter().map(|entry| display_name(&entry.input)).collect();
    let col_w = names.iter().map(|name| name.chars().count()).max().unwrap_or(20);

    let mut out = format!("{:<col_w$}  ->  Output/Status\n", "Input");
    out.push_str(&"-".repeat(col_w + 18));
    out.push('\n');
    for (name, entry) in names.iter().zip(entries) {
        out.push_str(&format!("{name:<col_w$}  ->  {}\n", entry.outcome));
    }
    out
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
