//! # Dataset Loading
//!
//! File: cli/src/engine/dataset.rs
//!
//! ## Overview
//!
//! Reads the training file: UTF-8 CSV with a `Question,Answer` header and one
//! pair per row. Columns are matched by header name, so extra columns or a
//! different column order are accepted. Rows whose question or answer is blank
//! are skipped with a warning. Any other malformed row fails the whole load,
//! naming the offending record.
//!
//! Answers are kept verbatim; they are the labels the classifier returns.
//!
use crate::core::error::{QabotError, Result};
use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

const QUESTION_COLUMN: &str = "Question";
const ANSWER_COLUMN: &str = "Answer";

/// One training pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QaRecord {
    #[serde(rename = "Question")]
    pub question: String,
    #[serde(rename = "Answer")]
    pub answer: String,
}

#[cfg(test)]
impl QaRecord {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// # Load Dataset (`load_dataset`)
///
/// Opens the CSV file at `path` and parses every row into a `QaRecord`.
///
/// ## Errors
///
/// Returns an error if the file cannot be opened, the header lacks a
/// `Question` or `Answer` column, or a row cannot be decoded.
pub fn load_dataset(path: &Path) -> Result<Vec<QaRecord>> {
    info!("Loading dataset from {}", path.display());
    let file = File::open(path)
        .with_context(|| format!("Failed to open dataset file: {}", path.display()))?;
    let records = read_records(file, &path.display().to_string())?;
    info!("Loaded {} question/answer pairs", records.len());
    Ok(records)
}

/// Parses CSV data from any reader. `source` names the data in error messages.
pub fn read_records<R: Read>(reader: R, source: &str) -> Result<Vec<QaRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(QabotError::from)
        .with_context(|| format!("Failed to read CSV header from {}", source))?
        .clone();
    for column in [QUESTION_COLUMN, ANSWER_COLUMN] {
        if !headers.iter().any(|h| h == column) {
            return Err(anyhow!(QabotError::Dataset {
                path: source.to_string(),
                reason: format!("missing column '{}' (header: {:?})", column, headers),
            }));
        }
    }

    let mut records = Vec::new();
    for (index, row) in rdr.deserialize::<QaRecord>().enumerate() {
        // Header is line 1, so data rows start at line 2.
        let line = index + 2;
        let record = row
            .map_err(QabotError::from)
            .with_context(|| format!("Malformed row at line {} of {}", line, source))?;
        if record.question.trim().is_empty() || record.answer.trim().is_empty() {
            warn!("Skipping line {} of {}: blank question or answer", line, source);
            continue;
        }
        records.push(record);
    }
    debug!("Parsed {} records from {}", records.len(), source);
    Ok(records)
}
