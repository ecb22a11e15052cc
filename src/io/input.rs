use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{DocumentRecord, TranscriptTable};

/// Read a raw transcript file
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected; legacy
/// transcripts are cleaned on a best-effort basis.
pub fn read_transcript(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read and parse a per-document metadata file
pub fn parse_metadata_file(path: &Path) -> Result<DocumentRecord> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    DocumentRecord::from_json(&content)
        .with_context(|| format!("Failed to parse metadata: {:?}", path))
}

/// Read a tabulated transcript back into rows
pub fn read_table(path: &Path) -> Result<TranscriptTable> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    TranscriptTable::parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_transcript_tolerates_latin1() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<$A> caf\xe9\r\n").unwrap();

        let text = read_transcript(file.path()).unwrap();
        assert!(text.starts_with("<$A> caf"));
        assert!(text.ends_with("\r\n"));
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = read_transcript(Path::new("/nonexistent/S1A-001.TXT")).unwrap_err();
        assert!(err.to_string().contains("S1A-001.TXT"));
    }

    #[test]
    fn test_read_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "speaker,text\n\"ns/A\",\"hello\"\n").unwrap();

        let table = read_table(file.path()).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].speaker, "ns/A");
    }
}
