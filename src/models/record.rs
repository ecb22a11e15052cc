use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::dates::{normalize_date, DateParseError};
use crate::models::DateValue;

pub const DCTERMS: &str = "http://purl.org/dc/terms/";
pub const AUSNC: &str = "http://ns.ausnc.org.au/schemas/ausnc_md_model/";
pub const CATALOG_BASE: &str = "http://app.alveo.edu.au/catalog/ice/";
pub const PERSON_BASE: &str = "http://app.alveo.edu.au/catalog/ice/person/";

/// A single `{"@value": ..}` or `{"@id": ..}` object in expanded JSON-LD
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyValue {
    #[serde(rename = "@value")]
    pub value: Option<serde_json::Value>,
    #[serde(rename = "@id")]
    pub id: Option<String>,
}

impl PropertyValue {
    /// The literal as text; numbers are rendered with `to_string`
    pub fn as_text(&self) -> Option<String> {
        match self.value.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// One subject node from a per-document metadata file
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataNode {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type", default)]
    pub types: Vec<String>,
    #[serde(flatten)]
    pub properties: HashMap<String, Vec<PropertyValue>>,
}

impl MetadataNode {
    /// First literal of a predicate IRI
    pub fn literal(&self, predicate: &str) -> Option<String> {
        self.properties
            .get(predicate)?
            .iter()
            .find_map(PropertyValue::as_text)
    }

    /// All `@id` references of a predicate IRI
    pub fn references(&self, predicate: &str) -> Vec<&str> {
        self.properties
            .get(predicate)
            .map(|values| values.iter().filter_map(|v| v.id.as_deref()).collect())
            .unwrap_or_default()
    }

    fn is_document(&self) -> bool {
        self.types.iter().any(|t| t.contains("AusNCObject"))
    }

    fn is_person(&self) -> bool {
        self.id.contains("person")
    }
}

/// Metadata for one corpus document: the document node, its speakers and files
#[derive(Debug, Clone)]
pub struct DocumentRecord {
    pub document: MetadataNode,
    pub speakers: Vec<MetadataNode>,
    pub files: Vec<MetadataNode>,
}

impl DocumentRecord {
    /// Parse an expanded JSON-LD metadata array
    pub fn from_json(json: &str) -> Result<Self> {
        let nodes: Vec<MetadataNode> =
            serde_json::from_str(json).context("Failed to parse metadata JSON-LD")?;

        let mut document = None;
        let mut speakers = Vec::new();
        let mut files = Vec::new();

        for node in nodes {
            if node.is_document() {
                document = Some(node);
            } else if node.is_person() {
                speakers.push(node);
            } else {
                files.push(node);
            }
        }

        let document = document.context("No AusNCObject node in metadata")?;
        Ok(Self {
            document,
            speakers,
            files,
        })
    }

    /// Document identifier with the catalog base removed
    pub fn document_id(&self) -> &str {
        self.document
            .id
            .strip_prefix(CATALOG_BASE)
            .unwrap_or(&self.document.id)
    }

    /// `dcterms:identifier`, e.g. `S1A-001`
    pub fn identifier(&self) -> Option<String> {
        self.document.literal(&format!("{}identifier", DCTERMS))
    }

    /// `dcterms:created`
    pub fn created(&self) -> Option<String> {
        self.document.literal(&format!("{}created", DCTERMS))
    }

    /// `ausnc:source`, which sometimes carries a date after a `-`
    pub fn source(&self) -> Option<String> {
        self.document.literal(&format!("{}source", AUSNC))
    }

    /// Whether the document is marked as spoken language
    pub fn is_spoken(&self) -> bool {
        let spoken = format!("{}spoken", AUSNC);
        self.document
            .references(&format!("{}mode", AUSNC))
            .contains(&spoken.as_str())
    }

    /// Speaker ids with the person catalog base removed
    pub fn speaker_ids(&self) -> Vec<&str> {
        self.speakers
            .iter()
            .map(|s| s.id.strip_prefix(PERSON_BASE).unwrap_or(&s.id))
            .collect()
    }

    /// `dcterms:identifier` of each file node
    pub fn file_identifiers(&self) -> Vec<String> {
        let predicate = format!("{}identifier", DCTERMS);
        self.files
            .iter()
            .filter_map(|f| f.literal(&predicate))
            .collect()
    }

    /// The document's creation date
    ///
    /// Taken from `created`, else from the second `-` separated piece of
    /// `source`. Missing values give `Ok(None)`; a value that is present but
    /// not a recognized date is an error.
    pub fn date(&self) -> Result<Option<DateValue>, DateParseError> {
        let raw = match self.created() {
            Some(created) => Some(created),
            None => self
                .source()
                .and_then(|source| source.split('-').nth(1).map(|s| s.trim().to_string())),
        };

        raw.map(|value| normalize_date(&value)).transpose()
    }
}
