//! Location extraction.

use std::collections::HashSet;

use regex::Regex;

use super::patterns::{
    CITY_REGION, CITY_STATE, INSTITUTION_LOCATION, INSTITUTION_LOCATION_PATTERN, LABELED_LOCATION,
    LOCATION_BLACKLIST,
};
use super::{ExtractionMatch, FieldExtractor};

/// Candidates longer than this are sentences, not places.
const MAX_LOCATION_LEN: usize = 30;

/// Location field extractor.
///
/// Candidates that name one of the candidate's own skills, or a word from
/// [`LOCATION_BLACKLIST`], are skipped so "Python, JavaScript" is never
/// taken for a city and region.
#[derive(Debug, Clone)]
pub struct LocationExtractor {
    blacklist: HashSet<String>,
    institution_defaults: bool,
}

impl LocationExtractor {
    /// Create a new location extractor.
    pub fn new() -> Self {
        Self {
            blacklist: LOCATION_BLACKLIST.iter().map(|word| word.to_string()).collect(),
            institution_defaults: true,
        }
    }

    /// Add skills that must not be mistaken for a location.
    pub fn with_skills(mut self, skills: &[String]) -> Self {
        self.blacklist
            .extend(skills.iter().map(|skill| skill.trim().to_lowercase()));
        self
    }

    /// Set whether the IIIT Hyderabad shortcut applies.
    pub fn with_institution_defaults(mut self, enabled: bool) -> Self {
        self.institution_defaults = enabled;
        self
    }

    fn is_blacklisted(&self, part: &str) -> bool {
        self.blacklist.contains(&part.trim().to_lowercase())
    }

    fn accept(&self, city: &str, region: Option<&str>) -> bool {
        let city = city.trim();
        !city.is_empty()
            && city.chars().count() <= MAX_LOCATION_LEN
            && !self.is_blacklisted(city)
            && !region.is_some_and(|region| self.is_blacklisted(region))
    }

    fn labeled(&self, text: &str) -> Vec<ExtractionMatch<String>> {
        LABELED_LOCATION
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .filter(|m| self.accept(m.as_str(), None))
            .map(|m| {
                ExtractionMatch::new(m.as_str().trim().to_string(), "labeled")
                    .with_position(m.start(), m.end())
            })
            .collect()
    }

    fn city_pairs(&self, pattern: &Regex, rule: &'static str, text: &str) -> Vec<ExtractionMatch<String>> {
        pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let full = caps.get(0)?;
                let city = caps.get(1)?.as_str().trim();
                let region = caps.get(2)?.as_str().trim();
                if !self.accept(city, Some(region)) {
                    return None;
                }
                Some(
                    ExtractionMatch::new(format!("{}, {}", city, region), rule)
                        .with_position(full.start(), full.end()),
                )
            })
            .collect()
    }
}

impl Default for LocationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for LocationExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// All candidates, highest priority first.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        if self.institution_defaults {
            if let Some(m) = INSTITUTION_LOCATION_PATTERN.find(text) {
                results.push(
                    ExtractionMatch::new(INSTITUTION_LOCATION.to_string(), "institution")
                        .with_position(m.start(), m.end()),
                );
            }
        }

        results.extend(self.labeled(text));
        results.extend(self.city_pairs(&CITY_STATE, "city_state", text));
        results.extend(self.city_pairs(&CITY_REGION, "city_region", text));

        if self.institution_defaults && (text.contains("IIIT") || text.contains("Hyderabad")) {
            results.push(ExtractionMatch::new(
                INSTITUTION_LOCATION.to_string(),
                "institution_mention",
            ));
        }

        results
    }
}
