//! Years-of-experience extraction.

use super::patterns::{EXPERIENCE_IN_YEARS, YEARS_OF_EXPERIENCE};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::config::InferenceConfig;

/// Finds an explicit "5+ years of experience" or "Experience: 5 years" phrase.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExperienceExtractor;

impl FieldExtractor for ExperienceExtractor {
    type Output = ExtractionMatch<u32>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        [
            (&*YEARS_OF_EXPERIENCE, "years_of_experience"),
            (&*EXPERIENCE_IN_YEARS, "experience_in_years"),
        ]
        .into_iter()
        .flat_map(|(pattern, rule)| {
            pattern.captures_iter(text).filter_map(move |caps| {
                let full = caps.get(0)?;
                let years = caps.get(1)?.as_str().parse::<u32>().ok()?;
                Some(ExtractionMatch::new(years, rule).with_position(full.start(), full.end()))
            })
        })
        .collect()
    }
}

/// Estimate years of experience from the amount of text.
///
/// One year per `chars_per_experience_year` characters, clamped to the
/// configured bounds. Inverted bounds are swapped rather than trusted.
pub fn estimate_experience(text: &str, config: &InferenceConfig) -> u32 {
    let per_year = config.chars_per_experience_year.max(1);
    let years = u32::try_from(text.chars().count() / per_year).unwrap_or(u32::MAX);

    let (min, max) = (config.min_estimated_experience, config.max_estimated_experience);
    years.clamp(min.min(max), min.max(max))
}
