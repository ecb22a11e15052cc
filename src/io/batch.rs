use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::io::speaker_prefix;
use crate::stages::{count_speaker_markers, tabulate};

/// Configuration for converting a directory of transcripts
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory holding the raw transcripts
    pub input_dir: PathBuf,
    /// Directory receiving one `<stem>.csv` per transcript
    pub output_dir: PathBuf,
    /// Namespace embedded in every speaker prefix
    pub namespace: String,
    /// Transcript file extension, compared case-insensitively
    pub transcript_extension: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            namespace: "ice".to_string(),
            transcript_extension: "TXT".to_string(),
        }
    }
}

/// Outcome of converting one transcript
#[derive(Debug, Clone)]
pub struct ConvertedDocument {
    pub document_id: String,
    pub output_path: PathBuf,
    /// Speaker markers found in the raw text
    pub markers: usize,
    /// Lines written, header included
    pub lines: usize,
}

/// Outcome of a whole batch, sorted by document id
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub documents: Vec<ConvertedDocument>,
}

impl BatchSummary {
    pub fn total_rows(&self) -> usize {
        self.documents.iter().map(|d| d.lines.saturating_sub(1)).sum()
    }
}

/// List the transcripts in `config.input_dir`, sorted by path
pub async fn find_transcripts(config: &BatchConfig) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(&config.input_dir)
        .await
        .with_context(|| format!("Failed to read directory: {:?}", config.input_dir))?;

    let mut paths = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("Failed to list directory: {:?}", config.input_dir))?
    {
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&config.transcript_extension));
        if !matches {
            continue;
        }
        let is_file = tokio::fs::metadata(&path)
            .await
            .is_ok_and(|metadata| metadata.is_file());
        if is_file {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}

/// Convert every transcript in the input directory, one task per document
pub async fn convert_directory(config: &BatchConfig) -> Result<BatchSummary> {
    let paths = find_transcripts(config).await?;
    info!("Converting {} transcripts from {:?}", paths.len(), config.input_dir);

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .with_context(|| format!("Failed to create directory: {:?}", config.output_dir))?;

    let mut tasks = JoinSet::new();
    for path in paths {
        let output_dir = config.output_dir.clone();
        let namespace = config.namespace.clone();
        tasks.spawn(async move { convert_document(&path, &output_dir, &namespace).await });
    }

    let mut documents = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let document = joined.context("Conversion task panicked")??;
        documents.push(document);
    }
    documents.sort_by(|a, b| a.document_id.cmp(&b.document_id));

    let summary = BatchSummary { documents };
    info!(
        "Converted {} documents, {} rows",
        summary.documents.len(),
        summary.total_rows()
    );
    Ok(summary)
}

async fn convert_document(
    path: &Path,
    output_dir: &Path,
    namespace: &str,
) -> Result<ConvertedDocument> {
    let document_id = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .with_context(|| format!("Transcript has no usable file name: {:?}", path))?
        .to_string();

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file: {:?}", path))?;
    let raw = String::from_utf8_lossy(&bytes);

    let table = tabulate(&speaker_prefix(namespace, &document_id), &raw);
    let output_path = output_dir.join(format!("{}.csv", document_id));
    tokio::fs::write(&output_path, &table)
        .await
        .with_context(|| format!("Failed to write file: {:?}", output_path))?;

    let converted = ConvertedDocument {
        markers: count_speaker_markers(&raw),
        lines: table.lines().count(),
        document_id,
        output_path,
    };
    debug!(
        "{}: {} markers, {} lines",
        converted.document_id, converted.markers, converted.lines
    );
    Ok(converted)
}
