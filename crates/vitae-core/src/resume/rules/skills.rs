//! Skills extraction.
//!
//! Three tiers, tried in order: a skills section, a scan of the whole text
//! for known technical keywords, and finally a generic default list.

use std::collections::HashSet;

use super::patterns::{GENERIC_SKILLS, SKILLS_HEADING, SKILL_SEPARATORS, TECH_KEYWORD_PATTERNS};
use super::sections::{find_section, split_label};

/// Skill tokens from a section must be longer than this...
const MIN_SKILL_LEN: usize = 2;
/// ...and shorter than this.
const MAX_SKILL_LEN: usize = 30;

/// Where a skills list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillsSource {
    /// A headed skills section.
    Section,
    /// Known keywords found anywhere in the text.
    Keywords,
    /// Nothing found; generic defaults.
    Generic,
}

impl SkillsSource {
    /// Rule name used in field provenance.
    pub fn rule(&self) -> &'static str {
        match self {
            Self::Section => "skills_section",
            Self::Keywords => "tech_keywords",
            Self::Generic => "generic_skills",
        }
    }
}

/// Skills found in a résumé.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillsMatch {
    /// Skills in first-seen order.
    pub skills: Vec<String>,
    /// Which tier produced them.
    pub source: SkillsSource,
}

impl SkillsMatch {
    /// The generic default list.
    pub fn generic() -> Self {
        Self {
            skills: GENERIC_SKILLS.iter().map(|s| s.to_string()).collect(),
            source: SkillsSource::Generic,
        }
    }

    /// Whether the skills were found in the text rather than defaulted.
    pub fn is_extracted(&self) -> bool {
        self.source != SkillsSource::Generic
    }
}

/// Skills extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkillsExtractor;

impl SkillsExtractor {
    /// Extract skills, never returning an empty list.
    pub fn extract(&self, text: &str) -> SkillsMatch {
        if let Some(skills) = self.from_section(text) {
            return SkillsMatch {
                skills,
                source: SkillsSource::Section,
            };
        }

        let keywords = self.from_keywords(text);
        if !keywords.is_empty() {
            return SkillsMatch {
                skills: keywords,
                source: SkillsSource::Keywords,
            };
        }

        SkillsMatch::generic()
    }

    /// Tokens of the first skills section, if it has any.
    pub fn from_section(&self, text: &str) -> Option<Vec<String>> {
        let section = find_section(text, &SKILLS_HEADING)?;

        let mut seen = HashSet::new();
        let skills: Vec<String> = section
            .lines()
            .map(strip_sub_label)
            .flat_map(|line| line.split(SKILL_SEPARATORS))
            .map(clean_token)
            .filter(|token| {
                let len = token.chars().count();
                len > MIN_SKILL_LEN && len < MAX_SKILL_LEN
            })
            .filter(|token| seen.insert(token.to_lowercase()))
            .map(str::to_string)
            .collect();

        if skills.is_empty() { None } else { Some(skills) }
    }

    /// Known technical keywords present anywhere in the text, in list order.
    pub fn from_keywords(&self, text: &str) -> Vec<String> {
        TECH_KEYWORD_PATTERNS
            .iter()
            .filter(|(_, pattern)| pattern.is_match(text))
            .map(|(keyword, _)| keyword.to_string())
            .collect()
    }
}

/// Drop a short "Languages:" style prefix inside a skills block.
fn strip_sub_label(line: &str) -> &str {
    match split_label(line) {
        Some((label, Some(inline))) if !label.chars().any(|c| c.is_ascii_digit()) => inline,
        _ => line,
    }
}

fn clean_token(token: &str) -> &str {
    token
        .trim()
        .trim_start_matches(|c: char| c == '-' || c == '*' || c == '–' || c.is_whitespace())
        .trim_end_matches('.')
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_inline_skills_section() {
        let text = "John Smith\nSkills: Python, AWS, Docker\nHyderabad, Telangana";
        let result = SkillsExtractor.extract(text);

        assert_eq!(result.source, SkillsSource::Section);
        assert_eq!(result.skills, strings(&["Python", "AWS", "Docker"]));
    }

    #[test]
    fn test_block_skills_section() {
        let text = "\
TECHNICAL SKILLS
• Rust • Go • PostgreSQL
Languages: TypeScript; Python | Rust
- Kubernetes
C
A very long token that is definitely over the limit

EXPERIENCE
Acme Corp, Staff Engineer";
        let result = SkillsExtractor.extract(text);

        assert_eq!(
            result.skills,
            strings(&["Rust", "PostgreSQL", "TypeScript", "Python", "Kubernetes"])
        );
    }

    #[test]
    fn test_section_tokens_are_unique_and_bounded() {
        let text = "Skills\nrust, Rust, RUST, go, sql, sql\nabcdefghijklmnopqrstuvwxyzabc, abcdefghijklmnopqrstuvwxyzabcd";
        let skills = SkillsExtractor.from_section(text).unwrap();

        assert_eq!(skills, strings(&["rust", "sql", "abcdefghijklmnopqrstuvwxyzabc"]));
        for skill in &skills {
            let len = skill.chars().count();
            assert!(len >= 3 && len <= 29);
        }
    }

    #[test]
    fn test_keyword_fallback() {
        let text = "Jane Doe\nBuilt services in Node.js and C++ on AWS, deployed with docker.\nUsed JavaScript.";
        let result = SkillsExtractor.extract(text);

        assert_eq!(result.source, SkillsSource::Keywords);
        assert_eq!(result.skills, strings(&["JavaScript", "Node.js", "C++", "AWS", "Docker"]));
    }

    #[test]
    fn test_empty_section_falls_back_to_keywords() {
        let text = "Skills\n\nEducation\nStudied Python";
        let result = SkillsExtractor.extract(text);
        assert_eq!(result.source, SkillsSource::Keywords);
        assert_eq!(result.skills, strings(&["Python"]));
    }

    #[test]
    fn test_generic_fallback() {
        let result = SkillsExtractor.extract("");
        assert_eq!(result.source, SkillsSource::Generic);
        assert_eq!(result.skills, strings(&["Communication", "Problem Solving", "Teamwork"]));
        assert!(!result.is_extracted());
    }
}
