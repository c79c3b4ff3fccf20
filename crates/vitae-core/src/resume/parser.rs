//! Rule-based field inference over extracted résumé text.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::models::config::InferenceConfig;
use crate::models::resume::{FieldSource, ParsedResumeData};

use super::rules::{
    synthesize_about, EducationExtractor, EmailExtractor, ExperienceExtractor, FieldExtractor,
    LocationExtractor, NameExtractor, PhoneExtractor, SkillsExtractor, SummaryExtractor,
};

/// Fields recovered from text, with the rule behind each one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InferenceResult {
    /// Recovered fields.
    pub data: ParsedResumeData,
    /// Provenance of each populated field, keyed by field name.
    pub sources: BTreeMap<String, FieldSource>,
    /// Fields that were defaulted rather than found.
    pub warnings: Vec<String>,
}

impl InferenceResult {
    fn record(&mut self, field: &str, rule: &str) {
        trace!("{} matched by rule {}", field, rule);
        self.sources
            .insert(field.to_string(), FieldSource::Extracted(rule.to_string()));
    }

    /// Mark a field as supplied by a default, with a warning.
    pub fn record_default(&mut self, field: &str, warning: impl Into<String>) {
        self.sources.insert(field.to_string(), FieldSource::Default);
        self.warnings.push(warning.into());
    }
}

/// Runs the field extractors in a fixed order.
///
/// Pass order is Email, Phone, Name, Skills, Education, Location,
/// Experience, About. A field set by an earlier pass is never overwritten,
/// and a pass that finds nothing leaves its field unset.
#[derive(Debug, Clone, Default)]
pub struct FieldInferenceEngine {
    config: InferenceConfig,
}

impl FieldInferenceEngine {
    /// Create an engine with the given settings.
    pub fn new(config: InferenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Recover candidate fields from text.
    pub fn infer(&self, text: &str) -> InferenceResult {
        let mut result = InferenceResult::default();

        debug!("Inferring fields from {} characters of text", text.chars().count());

        self.infer_contact(text, &mut result);
        self.infer_name(text, &mut result);
        self.infer_skills(text, &mut result);
        self.infer_education(text, &mut result);
        self.infer_location(text, &mut result);
        self.infer_experience(text, &mut result);
        self.infer_about(text, &mut result);

        debug!("Inferred {} fields", result.sources.len());
        result
    }

    fn infer_contact(&self, text: &str, result: &mut InferenceResult) {
        if result.data.email.is_none() {
            if let Some(email) = EmailExtractor.extract(text) {
                result.data.email = Some(email.value);
                result.record("email", email.rule);
            }
        }

        if result.data.phone.is_none() {
            if let Some(phone) = PhoneExtractor.extract(text) {
                result.data.phone = Some(phone.value);
                result.record("phone", phone.rule);
            }
        }
    }

    fn infer_name(&self, text: &str, result: &mut InferenceResult) {
        if result.data.name.is_some() {
            return;
        }

        let extractor = NameExtractor::new()
            .with_scan_lines(self.config.name_scan_lines)
            .with_max_tokens(self.config.max_name_tokens);
        if let Some(name) = extractor.extract(text) {
            result.data.name = Some(name.value);
            result.record("name", name.rule);
        }
    }

    /// Only skills found in the text are set here; the generic list is
    /// left to the fallback policy so it is reported as a default.
    fn infer_skills(&self, text: &str, result: &mut InferenceResult) {
        if !result.data.skills.is_empty() {
            return;
        }

        let skills = SkillsExtractor.extract(text);
        if skills.is_extracted() {
            result.data.skills = skills.skills;
            result.record("skills", skills.source.rule());
        }
    }

    fn infer_education(&self, text: &str, result: &mut InferenceResult) {
        if result.data.education.is_some() {
            return;
        }

        let extractor =
            EducationExtractor::new().with_institution_defaults(self.config.institution_defaults);
        if let Some(education) = extractor.extract(text) {
            result.data.education = Some(education.value);
            result.record("education", education.rule);
        }
    }

    fn infer_location(&self, text: &str, result: &mut InferenceResult) {
        if result.data.location.is_some() {
            return;
        }

        let extractor = LocationExtractor::new()
            .with_skills(&result.data.skills)
            .with_institution_defaults(self.config.institution_defaults);
        if let Some(location) = extractor.extract(text) {
            result.data.location = Some(location.value);
            result.record("location", location.rule);
        }
    }

    fn infer_experience(&self, text: &str, result: &mut InferenceResult) {
        if result.data.experience.is_some() {
            return;
        }

        if let Some(years) = ExperienceExtractor.extract(text) {
            result.data.experience = Some(years.value);
            result.record("experience", years.rule);
        }
    }

    fn infer_about(&self, text: &str, result: &mut InferenceResult) {
        if result.data.about.is_some() {
            return;
        }

        let extractor = SummaryExtractor::new().with_max_chars(self.config.about_max_chars);
        if let Some(about) = extractor.extract(text) {
            result.data.about = Some(about.value);
            result.record("about", about.rule);
            return;
        }

        if !self.config.synthesize_about || result.data.skills.is_empty() {
            return;
        }
        if let Some(name) = result.data.name.as_deref() {
            let about = synthesize_about(name, result.data.experience, &result.data.skills);
            result.data.about = Some(about);
            result.record("about", "synthesized");
        }
    }
}
