//! Candidate record produced by the pipeline.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structured candidate fields recovered from a résumé.
///
/// Every field is optional; after the pipeline has run `skills`,
/// `education` and `experience` are always populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResumeData {
    /// Candidate's full name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Phone number, as written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// City and region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Skills in first-seen order, without duplicates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,

    /// Years of experience.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<u32>,

    /// Highest degree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,

    /// Short professional summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

impl ParsedResumeData {
    /// Whether any field carries something a form could be filled with.
    pub fn has_usable_data(&self) -> bool {
        self.name.is_some()
            || self.email.is_some()
            || self.phone.is_some()
            || self.location.is_some()
            || self.education.is_some()
            || self.experience.is_some()
            || self.about.is_some()
            || !self.skills.is_empty()
    }

    /// Record used when a document could not be read at all.
    ///
    /// The name comes from the filename: extension stripped, split on
    /// `_`, `-` and whitespace, each part title-cased.
    pub fn from_filename(filename: &str) -> Self {
        crate::resume::fallback::recovery_record(filename)
    }
}

/// Where a document's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Text extracted from PDF pages.
    Pdf,
    /// Bytes decoded as text.
    Text,
    /// The document was unreadable; only the filename was used.
    FilenameOnly,
}

/// How a field got its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "rule", rename_all = "snake_case")]
pub enum FieldSource {
    /// Found in the text by the named rule.
    Extracted(String),
    /// Supplied by the fallback policy.
    Default,
}

/// Metadata about a single parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseMetadata {
    /// Original filename.
    pub filename: String,

    /// Where the text came from.
    pub source: SourceKind,

    /// Number of PDF pages, for PDF sources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,

    /// Length of the extracted text in characters.
    pub text_length: usize,

    /// Provenance of each populated field.
    pub field_sources: BTreeMap<String, FieldSource>,

    /// Fields that had to be defaulted and recoveries applied.
    pub warnings: Vec<String>,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// When the parse finished.
    pub processed_at: DateTime<Utc>,
}

/// Candidate record plus metadata about how it was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseReport {
    /// The candidate record.
    pub data: ParsedResumeData,

    /// Extraction metadata.
    pub metadata: ParseMetadata,
}
