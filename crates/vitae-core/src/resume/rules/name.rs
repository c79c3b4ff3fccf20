//! Candidate name extraction.

use super::patterns::{DIGIT_RUN, EMAIL, RESUME_BOILERPLATE};
use super::{ExtractionMatch, FieldExtractor};

/// Picks the name from the first few non-blank lines of a résumé.
#[derive(Debug, Clone)]
pub struct NameExtractor {
    scan_lines: usize,
    max_tokens: usize,
}

impl NameExtractor {
    /// Create a new name extractor.
    pub fn new() -> Self {
        Self {
            scan_lines: 5,
            max_tokens: 4,
        }
    }

    /// Set how many non-blank lines are considered.
    pub fn with_scan_lines(mut self, lines: usize) -> Self {
        self.scan_lines = lines;
        self
    }

    /// Set the maximum number of words in a name.
    pub fn with_max_tokens(mut self, tokens: usize) -> Self {
        self.max_tokens = tokens;
        self
    }

    /// Whether a line could be a person's name.
    pub fn looks_like_name(&self, line: &str) -> bool {
        !EMAIL.is_match(line)
            && !DIGIT_RUN.is_match(line)
            && line.split_whitespace().count() <= self.max_tokens
            && line.chars().count() > 2
            && !RESUME_BOILERPLATE.is_match(line)
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NameExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(self.scan_lines)
            .filter(|line| self.looks_like_name(line))
            .map(|line| ExtractionMatch::new(line.to_string(), "leading_line"))
            .collect()
    }
}
