//! Email and phone extraction.

use super::patterns::{EMAIL, PHONE_PATTERNS};
use super::{ExtractionMatch, FieldExtractor};

/// Email field extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailExtractor;

impl FieldExtractor for EmailExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        EMAIL
            .find_iter(text)
            .map(|m| ExtractionMatch::new(m.as_str().to_string(), "email").with_position(m.start(), m.end()))
            .collect()
    }
}

/// Phone field extractor.
///
/// Patterns are tried in priority order; the first pattern with a match
/// wins even when a later pattern matches earlier in the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneExtractor;

impl FieldExtractor for PhoneExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        PHONE_PATTERNS.iter().find_map(|(rule, pattern)| {
            pattern
                .find(text)
                .map(|m| ExtractionMatch::new(m.as_str().to_string(), *rule).with_position(m.start(), m.end()))
        })
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = Vec::new();

        for (rule, pattern) in PHONE_PATTERNS.iter() {
            for m in pattern.find_iter(text) {
                // Skip numbers already covered by a higher-priority pattern
                let overlaps = results.iter().any(|r| {
                    r.position
                        .map(|(start, end)| m.start() < end && start < m.end())
                        .unwrap_or(false)
                });
                if overlaps {
                    continue;
                }
                results.push(
                    ExtractionMatch::new(m.as_str().to_string(), *rule).with_position(m.start(), m.end()),
                );
            }
        }

        results
    }
}
