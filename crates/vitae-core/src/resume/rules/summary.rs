//! About/summary extraction.

use super::patterns::SUMMARY_HEADING;
use super::sections::find_section;
use super::{ExtractionMatch, FieldExtractor};

/// Takes the first line of a summary, objective, profile or about section.
#[derive(Debug, Clone)]
pub struct SummaryExtractor {
    max_chars: usize,
}

impl SummaryExtractor {
    pub fn new() -> Self {
        Self { max_chars: 150 }
    }

    /// Set the maximum summary length, in characters.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }
}

impl Default for SummaryExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for SummaryExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let section = find_section(text, &SUMMARY_HEADING)?;
        let line = section.first_line()?;
        let summary: String = line.chars().take(self.max_chars).collect();
        Some(ExtractionMatch::new(summary.trim_end().to_string(), "summary_section"))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.extract(text).into_iter().collect()
    }
}

/// Templated summary built from fields already found.
pub fn synthesize_about(name: &str, experience: Option<u32>, skills: &[String]) -> String {
    let top_skills = skills.iter().take(3).map(String::as_str).collect::<Vec<_>>().join(", ");
    let who = match experience {
        Some(years) => format!("a {}-years-experienced professional", years),
        None => "an experienced professional".to_string(),
    };

    format!(
        "{} is {} with expertise in {}. \
         They have a strong background in technology and are seeking new opportunities.",
        name, who, top_skills
    )
}
