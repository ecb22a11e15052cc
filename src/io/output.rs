use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::{DatePrecision, DateValue, DocumentRecord};

/// Write a tabulated transcript verbatim
pub fn write_table(path: &Path, table: &str) -> Result<()> {
    std::fs::write(path, table).with_context(|| format!("Failed to write file: {:?}", path))
}

/// Speaker namespace prefix for one corpus document
///
/// Speaker letters are appended to this to form the speaker field, e.g.
/// `arcp://name,ice/speaker/S1A-001#A`.
pub fn speaker_prefix(namespace: &str, document_id: &str) -> String {
    format!("arcp://name,{}/speaker/{}#", namespace, document_id)
}

/// JSON summary of a document's metadata, printed by the `metadata` command
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub document_id: String,
    pub identifier: Option<String>,
    pub date: Option<DateValue>,
    pub date_precision: Option<DatePrecision>,
    pub spoken: bool,
    pub speakers: Vec<String>,
    pub files: Vec<String>,
}

impl DocumentSummary {
    /// Summarize a record; fails if its date is present but unparsable
    pub fn from_record(record: &DocumentRecord) -> Result<Self> {
        let date = record
            .date()
            .with_context(|| format!("Bad date in document {}", record.document_id()))?;

        Ok(Self {
            document_id: record.document_id().to_string(),
            identifier: record.identifier(),
            date,
            date_precision: date.map(|d| d.precision()),
            spoken: record.is_spoken(),
            speakers: record.speaker_ids().into_iter().map(String::from).collect(),
            files: record.file_identifiers(),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize document summary")
    }
}
