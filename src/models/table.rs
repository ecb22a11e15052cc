use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One `(speaker, text)` row of a tabulated transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub speaker: String,
    #[serde(default)]
    pub text: String,
}

/// A tabulated transcript read back into rows
#[derive(Debug, Clone, Default, Serialize)]
pub struct TranscriptTable {
    /// Rows in source order, header excluded
    pub rows: Vec<TableRow>,
}

impl TranscriptTable {
    /// Parse the CSV produced by [`crate::tabulate`]
    ///
    /// Record lengths are not enforced, so degenerate lines from transcripts
    /// without speaker markers still load with an empty `text`.
    pub fn parse(csv_text: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_text.as_bytes());

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("Failed to read table row {}", index + 1))?;
            rows.push(TableRow {
                speaker: record.get(0).unwrap_or_default().to_string(),
                text: record.get(1).unwrap_or_default().to_string(),
            });
        }

        Ok(Self { rows })
    }

    /// Speaker ids in order of first appearance
    pub fn speakers(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.speaker.as_str()) {
                seen.push(row.speaker.as_str());
            }
        }
        seen
    }

    /// Number of rows attributed to `speaker`
    pub fn rows_for(&self, speaker: &str) -> usize {
        self.rows.iter().filter(|r| r.speaker == speaker).count()
    }

    /// Total whitespace-separated words across all rows
    pub fn word_count(&self) -> usize {
        self.rows.iter().map(|r| r.text.split_whitespace().count()).sum()
    }
}
