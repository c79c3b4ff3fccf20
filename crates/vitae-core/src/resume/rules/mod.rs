//! Rule-based field extractors for résumés.
//!
//! Each extractor is a pure function of the text it is given. None of them
//! fail: no match simply means `None`.

pub mod contact;
pub mod education;
pub mod experience;
pub mod location;
pub mod name;
pub mod patterns;
pub mod sections;
pub mod skills;
pub mod summary;

pub use contact::{EmailExtractor, PhoneExtractor};
pub use education::EducationExtractor;
pub use experience::{estimate_experience, ExperienceExtractor};
pub use location::LocationExtractor;
pub use name::NameExtractor;
pub use sections::{find_section, is_section_heading, Section};
pub use skills::{SkillsExtractor, SkillsMatch, SkillsSource};
pub use summary::{synthesize_about, SummaryExtractor};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value found in the text, with the rule that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Name of the rule that matched.
    pub rule: &'static str,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: &'static str) -> Self {
        Self {
            value,
            rule,
            position: None,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
