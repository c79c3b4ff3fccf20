//! Defaults for fields a candidate form cannot leave empty.

use tracing::{debug, info};

use super::parser::InferenceResult;
use super::rules::estimate_experience;
use super::rules::patterns::GENERIC_SKILLS;
use crate::models::config::InferenceConfig;
use crate::models::resume::ParsedResumeData;

/// Education assigned when none is found.
pub const DEFAULT_EDUCATION: &str = "Bachelor's Degree";

/// Name used when a filename yields nothing.
pub const DEFAULT_NAME: &str = "New Candidate";

/// Summary attached to records rebuilt from a filename alone.
pub const RECOVERY_ABOUT: &str = "This is a candidate with experience in general skills. \
     Their resume was uploaded but detailed information couldn't be automatically extracted.";

/// Guarantees `skills`, `education` and `experience` are populated.
#[derive(Debug, Clone, Default)]
pub struct FallbackPolicy {
    config: InferenceConfig,
}

impl FallbackPolicy {
    pub fn new(config: InferenceConfig) -> Self {
        Self { config }
    }

    /// Fill missing required fields. `text` is the text inference ran on.
    pub fn apply(&self, result: &mut InferenceResult, text: &str) {
        if result.data.experience.is_none() {
            let years = estimate_experience(text, &self.config);
            debug!("Estimated {} years of experience from text length", years);
            result.data.experience = Some(years);
            result.record_default(
                "experience",
                format!("experience estimated from text length: {} years", years),
            );
        }

        if result.data.education.is_none() {
            result.data.education = Some(DEFAULT_EDUCATION.to_string());
            result.record_default("education", "no education found, using default");
        }

        if result.data.skills.is_empty() {
            result.data.skills = generic_skills();
            result.record_default("skills", "no skills found, using generic skills");
        }

        if !result.warnings.is_empty() {
            info!("Applied {} field defaults", result.warnings.len());
        }
    }
}

fn generic_skills() -> Vec<String> {
    GENERIC_SKILLS.iter().map(|s| s.to_string()).collect()
}

/// Record for a document whose text could not be read.
///
/// The name is the filename without directory or extension, split on
/// `_`, `-` and whitespace with each part title-cased.
pub fn recovery_record(filename: &str) -> ParsedResumeData {
    let name = name_from_filename(filename);

    ParsedResumeData {
        name: Some(if name.is_empty() { DEFAULT_NAME.to_string() } else { name }),
        skills: generic_skills(),
        experience: Some(1),
        education: Some(DEFAULT_EDUCATION.to_string()),
        about: Some(RECOVERY_ABOUT.to_string()),
        ..Default::default()
    }
}

fn name_from_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or_default();
    let stem = match base.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() => stem,
        _ => base,
    };

    stem.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
