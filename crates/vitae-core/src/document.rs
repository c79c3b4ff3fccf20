//! Document loading: pick an extraction strategy from the declared media type.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::DocumentError;
use crate::models::config::LoaderConfig;
use crate::pdf::PdfExtractor;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Declared media types that carry no information about the content.
const GENERIC_MEDIA_TYPES: &[&str] = &["", "application/octet-stream", "binary/octet-stream"];

/// How the loader will read a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    /// `application/pdf`.
    Pdf,
    /// `text/*`.
    PlainText,
    /// Anything else, with the declared MIME string.
    Other(String),
}

impl MediaType {
    /// Parse a declared MIME string. Parameters such as `; charset=utf-8` are ignored.
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "application/pdf" | "application/x-pdf" => Self::Pdf,
            s if s.starts_with("text/") => Self::PlainText,
            _ => Self::Other(essence),
        }
    }

    /// Guess a media type from a filename extension.
    pub fn from_filename(filename: &str) -> Self {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "pdf" => Self::Pdf,
            "txt" | "text" | "md" => Self::PlainText,
            "" => Self::Other(String::new()),
            other => Self::Other(format!("application/x-{}", other)),
        }
    }

    /// Whether the declared type says nothing about the content.
    pub fn is_generic(&self) -> bool {
        matches!(self, Self::Other(s) if GENERIC_MEDIA_TYPES.contains(&s.as_str()))
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => write!(f, "application/pdf"),
            Self::PlainText => write!(f, "text/plain"),
            Self::Other(s) if s.is_empty() => write!(f, "unknown"),
            Self::Other(s) => write!(f, "{}", s),
        }
    }
}

/// An uploaded file: bytes, declared media type and original filename.
#[derive(Debug, Clone)]
pub struct RawDocument {
    bytes: Vec<u8>,
    media_type: MediaType,
    filename: String,
}

impl RawDocument {
    /// Create a document from its bytes and declared MIME type.
    pub fn new(bytes: impl Into<Vec<u8>>, mime: &str, filename: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: MediaType::from_mime(mime),
            filename: filename.into(),
        }
    }

    /// Create a document with an already resolved media type.
    pub fn with_media_type(
        bytes: impl Into<Vec<u8>>,
        media_type: MediaType,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            media_type,
            filename: filename.into(),
        }
    }

    /// Read a document from disk, guessing the media type from its extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_read(bytes, path))
    }

    /// Read a document from disk without blocking the runtime.
    #[cfg(feature = "async")]
    pub async fn from_path_async(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::from_read(bytes, path))
    }

    fn from_read(bytes: Vec<u8>, path: &Path) -> Self {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let media_type = MediaType::from_filename(&filename);
        Self::with_media_type(bytes, media_type, filename)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Whether the content starts with the PDF header.
    pub fn has_pdf_magic(&self) -> bool {
        self.bytes.starts_with(PDF_MAGIC)
    }
}

/// Text recovered from a document, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    text: String,
    page_count: Option<u32>,
}

impl ExtractedText {
    /// Text that did not come from a paged document.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            page_count: None,
        }
    }

    /// Text joined from `page_count` PDF pages.
    pub fn paged(text: impl Into<String>, page_count: u32) -> Self {
        Self {
            text: text.into(),
            page_count: Some(page_count),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of pages, for PDF sources.
    pub fn page_count(&self) -> Option<u32> {
        self.page_count
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl AsRef<str> for ExtractedText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Turns a [`RawDocument`] into [`ExtractedText`].
#[derive(Debug, Clone, Default)]
pub struct DocumentLoader {
    config: LoaderConfig,
}

impl DocumentLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// The strategy that will be used for a document.
    ///
    /// A generic declared type is refined from the content's PDF header,
    /// then from the filename extension.
    pub fn resolve(&self, document: &RawDocument) -> MediaType {
        let declared = document.media_type();
        if !declared.is_generic() {
            return declared.clone();
        }

        if self.config.sniff_pdf_magic && document.has_pdf_magic() {
            debug!("Declared type is generic but content is PDF: {}", document.filename());
            return MediaType::Pdf;
        }

        match MediaType::from_filename(document.filename()) {
            MediaType::Other(_) => declared.clone(),
            guessed => {
                debug!("Guessed {} from filename {}", guessed, document.filename());
                guessed
            }
        }
    }

    /// Extract the text of a document.
    pub fn load(&self, document: &RawDocument) -> Result<ExtractedText, DocumentError> {
        let media_type = self.resolve(document);
        info!(
            "Loading {} ({}, {} bytes)",
            document.filename(),
            media_type,
            document.bytes().len()
        );

        match media_type {
            MediaType::Pdf => {
                use crate::pdf::PdfProcessor;

                let mut extractor = PdfExtractor::new();
                extractor.load(document.bytes())?;
                let text = extractor.extract_text()?;
                Ok(ExtractedText::paged(text, extractor.page_count()))
            }
            MediaType::PlainText => Ok(decode_text(document.bytes())),
            MediaType::Other(_) if self.config.treat_unknown_as_text => {
                debug!("Treating {} as text", media_type);
                Ok(decode_text(document.bytes()))
            }
            MediaType::Other(_) => Err(DocumentError::UnsupportedFormat(media_type.to_string())),
        }
    }
}

fn decode_text(bytes: &[u8]) -> ExtractedText {
    ExtractedText::plain(String::from_utf8_lossy(bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_from_mime() {
        assert_eq!(MediaType::from_mime("application/pdf"), MediaType::Pdf);
        assert_eq!(MediaType::from_mime("Application/PDF"), MediaType::Pdf);
        assert_eq!(MediaType::from_mime("text/plain; charset=utf-8"), MediaType::PlainText);
        assert_eq!(MediaType::from_mime("text/markdown"), MediaType::PlainText);
        assert_eq!(
            MediaType::from_mime("image/png"),
            MediaType::Other("image/png".to_string())
        );
        assert!(MediaType::from_mime("").is_generic());
        assert!(MediaType::from_mime("application/octet-stream").is_generic());
    }

    #[test]
    fn test_media_type_from_filename() {
        assert_eq!(MediaType::from_filename("cv.PDF"), MediaType::Pdf);
        assert_eq!(MediaType::from_filename("cv.txt"), MediaType::PlainText);
        assert!(MediaType::from_filename("resume").is_generic());
        assert!(!MediaType::from_filename("resume.docx").is_generic());
    }

    #[test]
    fn test_plain_text_is_verbatim() {
        let input = "  Jane Doe\r\n\tjane@example.com \u{00e9}\n\n";
        let doc = RawDocument::new(input, "text/plain", "jane.txt");
        let text = DocumentLoader::default().load(&doc).unwrap();

        assert_eq!(text.as_str(), input);
        assert_eq!(text.page_count(), None);
    }

    #[test]
    fn test_unknown_type_treated_as_text() {
        let doc = RawDocument::new("hello", "application/msword", "cv.doc");
        let text = DocumentLoader::default().load(&doc).unwrap();
        assert_eq!(text.as_str(), "hello");
    }

    #[test]
    fn test_unknown_type_rejected_when_strict() {
        let loader = DocumentLoader::new(LoaderConfig {
            treat_unknown_as_text: false,
            ..LoaderConfig::default()
        });
        let doc = RawDocument::new("hello", "image/png", "cv.png");

        let err = loader.load(&doc).unwrap_err();
        assert_eq!(err, DocumentError::UnsupportedFormat("image/png".to_string()));

        let doc = RawDocument::new("hello", "text/plain", "cv.txt");
        assert!(loader.load(&doc).is_ok());
    }

    #[test]
    fn test_corrupt_pdf_fails_extraction() {
        let doc = RawDocument::new(b"not a pdf at all".to_vec(), "application/pdf", "cv.pdf");
        let err = DocumentLoader::default().load(&doc).unwrap_err();
        assert!(matches!(err, DocumentError::ExtractionFailed(_)));
    }

    #[test]
    fn test_generic_type_sniffs_pdf_magic() {
        let doc = RawDocument::new(b"%PDF-1.7 broken".to_vec(), "application/octet-stream", "upload");
        let loader = DocumentLoader::default();
        assert_eq!(loader.resolve(&doc), MediaType::Pdf);

        let loader = DocumentLoader::new(LoaderConfig {
            sniff_pdf_magic: false,
            ..LoaderConfig::default()
        });
        assert!(loader.resolve(&doc).is_generic());
    }

    #[test]
    fn test_generic_type_uses_extension() {
        let loader = DocumentLoader::default();

        let doc = RawDocument::new(b"plain".to_vec(), "", "cv.pdf");
        assert_eq!(loader.resolve(&doc), MediaType::Pdf);

        let doc = RawDocument::new(b"plain".to_vec(), "application/octet-stream", "cv.txt");
        assert_eq!(loader.resolve(&doc), MediaType::PlainText);

        let doc = RawDocument::new(b"plain".to_vec(), "image/png", "cv.pdf");
        assert_eq!(loader.resolve(&doc), MediaType::Other("image/png".to_string()));
    }

    #[test]
    fn test_empty_upload() {
        let doc = RawDocument::new(Vec::<u8>::new(), "text/plain", "empty.txt");
        let text = DocumentLoader::default().load(&doc).unwrap();
        assert!(text.is_empty());
    }
}
