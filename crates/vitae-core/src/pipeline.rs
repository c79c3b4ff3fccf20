//! End-to-end résumé processing: load, extract, infer, apply defaults.

use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};

use crate::document::{DocumentLoader, ExtractedText, RawDocument};
use crate::error::{DocumentError, Result};
use crate::models::config::VitaeConfig;
use crate::models::resume::{FieldSource, ParseMetadata, ParseReport, ParsedResumeData, SourceKind};
use crate::resume::{FallbackPolicy, FieldInferenceEngine, InferenceResult};

/// The complete ingestion pipeline.
///
/// Holds only configuration, so one pipeline can serve many uploads,
/// including from several threads at once.
#[derive(Debug, Clone, Default)]
pub struct ResumePipeline {
    loader: DocumentLoader,
    engine: FieldInferenceEngine,
    fallback: FallbackPolicy,
}

impl ResumePipeline {
    /// Create a pipeline from configuration that has already been checked.
    ///
    /// Prefer [`try_new`](Self::try_new) for configuration built in code.
    pub fn new(config: VitaeConfig) -> Self {
        Self {
            loader: DocumentLoader::new(config.loader),
            engine: FieldInferenceEngine::new(config.inference.clone()),
            fallback: FallbackPolicy::new(config.inference),
        }
    }

    /// Validate the configuration, then create a pipeline from it.
    pub fn try_new(config: VitaeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Infer fields from text and apply defaults.
    pub fn parse_text(&self, text: &str) -> ParsedResumeData {
        self.analyze_text(text).data
    }

    /// Like [`parse_text`](Self::parse_text), keeping field provenance.
    pub fn analyze_text(&self, text: &str) -> InferenceResult {
        let mut result = self.engine.infer(text);
        self.fallback.apply(&mut result, text);
        result
    }

    /// Process an uploaded document.
    ///
    /// Fails when the document cannot be turned into text; see
    /// [`process_or_default`](Self::process_or_default) for the recovering
    /// variant.
    pub fn process(&self, document: &RawDocument) -> std::result::Result<ParseReport, DocumentError> {
        let start = Instant::now();

        let text = self.loader.load(document)?;
        let result = self.analyze_text(text.as_str());

        let report = build_report(document.filename(), &text, result, start);
        info!(
            "Parsed {} in {} ms ({} defaults)",
            document.filename(),
            report.metadata.processing_time_ms,
            report.metadata.warnings.len()
        );
        Ok(report)
    }

    /// Process a document, substituting a filename-derived record when its
    /// text cannot be extracted.
    pub fn process_or_default(&self, document: &RawDocument) -> ParseReport {
        let start = Instant::now();

        match self.process(document) {
            Ok(report) => report,
            Err(err) => {
                warn!("Could not read {}: {}; using filename", document.filename(), err);
                recovery_report(document.filename(), &err, start)
            }
        }
    }

    /// Read and process a file from disk.
    pub fn process_path(&self, path: &Path) -> Result<ParseReport> {
        let document = RawDocument::from_path(path)?;
        Ok(self.process(&document)?)
    }

    /// Read and process a file from disk without blocking the runtime.
    #[cfg(feature = "async")]
    pub async fn process_file(&self, path: &Path) -> Result<ParseReport> {
        let document = RawDocument::from_path_async(path).await?;
        Ok(self.process(&document)?)
    }
}

fn build_report(filename: &str, text: &ExtractedText, result: InferenceResult, start: Instant) -> ParseReport {
    let source = match text.page_count() {
        Some(_) => SourceKind::Pdf,
        None => SourceKind::Text,
    };

    ParseReport {
        data: result.data,
        metadata: ParseMetadata {
            filename: filename.to_string(),
            source,
            page_count: text.page_count(),
            text_length: text.as_str().chars().count(),
            field_sources: result.sources,
            warnings: result.warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
            processed_at: Utc::now(),
        },
    }
}

fn recovery_report(filename: &str, err: &DocumentError, start: Instant) -> ParseReport {
    let data = ParsedResumeData::from_filename(filename);
    let field_sources = ["name", "skills", "experience", "education", "about"]
        .into_iter()
        .map(|field| (field.to_string(), FieldSource::Default))
        .collect();

    ParseReport {
        data,
        metadata: ParseMetadata {
            filename: filename.to_string(),
            source: SourceKind::FilenameOnly,
            page_count: None,
            text_length: 0,
            field_sources,
            warnings: vec![format!("{}; record built from filename", err)],
            processing_time_ms: start.elapsed().as_millis() as u64,
            processed_at: Utc::now(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::LoaderConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_empty_text() {
        let data = ResumePipeline::default().parse_text("");

        assert_eq!(data.name, None);
        assert_eq!(data.email, None);
        assert_eq!(data.phone, None);
        assert_eq!(data.location, None);
        assert_eq!(data.about, None);
        assert_eq!(data.skills, vec!["Communication", "Problem Solving", "Teamwork"]);
        assert_eq!(data.education.as_deref(), Some("Bachelor's Degree"));
        assert_eq!(data.experience, Some(1));
    }

    #[test]
    fn test_explicit_experience_wins() {
        let text = format!("Jane Doe\n5 years of experience\n{}", "filler ".repeat(2000));
        let data = ResumePipeline::default().parse_text(&text);
        assert_eq!(data.experience, Some(5));
    }

    #[test]
    fn test_process_text_document() {
        let doc = RawDocument::new("Jane Doe\njane@example.com", "text/plain", "jane.txt");
        let report = ResumePipeline::default().process(&doc).unwrap();

        assert_eq!(report.data.email.as_deref(), Some("jane@example.com"));
        assert_eq!(report.metadata.source, SourceKind::Text);
        assert_eq!(report.metadata.page_count, None);
        assert_eq!(report.metadata.text_length, 25);
        assert_eq!(report.metadata.field_sources.get("education"), Some(&FieldSource::Default));
    }

    #[test]
    fn test_process_reports_document_errors() {
        let doc = RawDocument::new(b"garbage".to_vec(), "application/pdf", "cv.pdf");
        let err = ResumePipeline::default().process(&doc).unwrap_err();
        assert!(matches!(err, DocumentError::ExtractionFailed(_)));
    }

    #[test]
    fn test_process_or_default_recovers() {
        let doc = RawDocument::new(b"garbage".to_vec(), "application/pdf", "john_smith.pdf");
        let report = ResumePipeline::default().process_or_default(&doc);

        assert_eq!(report.data.name.as_deref(), Some("John Smith"));
        assert_eq!(report.data.experience, Some(1));
        assert_eq!(report.metadata.source, SourceKind::FilenameOnly);
        assert_eq!(report.metadata.warnings.len(), 1);
    }

    #[test]
    fn test_unsupported_format_recovers() {
        let config = VitaeConfig {
            loader: LoaderConfig {
                treat_unknown_as_text: false,
                ..LoaderConfig::default()
            },
            ..VitaeConfig::default()
        };
        let pipeline = ResumePipeline::new(config);
        let doc = RawDocument::new(b"\x89PNG".to_vec(), "image/png", "scan.png");

        assert!(matches!(pipeline.process(&doc), Err(DocumentError::UnsupportedFormat(_))));
        assert_eq!(
            pipeline.process_or_default(&doc).data.name.as_deref(),
            Some("Scan")
        );
    }

    #[test]
    fn test_process_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jane_doe.txt");
        std::fs::write(&path, "Jane Doe\nSkills: Rust, Kafka").unwrap();

        let report = ResumePipeline::default().process_path(&path).unwrap();
        assert_eq!(report.metadata.filename, "jane_doe.txt");
        assert_eq!(report.data.skills, vec!["Rust", "Kafka"]);
    }

    #[test]
    fn test_try_new_rejects_inverted_experience_bounds() {
        let mut config = VitaeConfig::default();
        config.inference.min_estimated_experience = 6;

        let err = ResumePipeline::try_new(config.clone()).unwrap_err();
        assert!(matches!(err, crate::error::VitaeError::Config(_)));

        // Built without validation, the pipeline still completes.
        let data = ResumePipeline::new(config).parse_text("");
        assert_eq!(data.experience, Some(5));
    }
}
