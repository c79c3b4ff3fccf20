//! Core library for résumé ingestion.
//!
//! This crate provides:
//! - Document loading (PDF or plain text, chosen by declared media type)
//! - PDF text extraction, page by page
//! - Candidate field inference (name, contact details, skills, education,
//!   location, experience, summary)
//! - A fallback policy so required form fields are never left empty

pub mod document;
pub mod error;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod resume;

pub use document::{DocumentLoader, ExtractedText, MediaType, RawDocument};
pub use error::{DocumentError, Result, VitaeError};
pub use models::config::VitaeConfig;
pub use models::resume::{FieldSource, ParseMetadata, ParseReport, ParsedResumeData, SourceKind};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use pipeline::ResumePipeline;
pub use resume::{FallbackPolicy, FieldInferenceEngine, InferenceResult};
