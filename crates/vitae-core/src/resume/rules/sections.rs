//! Locating headed sections in flattened résumé text.
//!
//! A section starts at a line whose label (the text before an optional
//! colon) matches a heading pattern. When the heading line carries content
//! after the colon ("Skills: Rust, Go") that content is the whole section.
//! Otherwise the section runs over the following lines until the next
//! section heading or the end of the text.

use regex::Regex;

use super::patterns::{HEADING_SHAPE, SECTION_WORDS};

/// Labels longer than this are prose, not headings.
const MAX_LABEL_WORDS: usize = 4;

/// A section found in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    /// The heading label, without the colon.
    pub heading: &'a str,
    /// Content following the colon on the heading line.
    pub inline: Option<&'a str>,
    /// Lines after the heading, up to the next heading.
    pub body: Vec<&'a str>,
}

impl<'a> Section<'a> {
    /// All non-blank lines of the section, inline content first.
    pub fn lines(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.inline
            .into_iter()
            .chain(self.body.iter().copied())
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }

    /// First non-blank line of the section.
    pub fn first_line(&self) -> Option<&'a str> {
        self.lines().next()
    }
}

/// Split a line into its label and inline content.
///
/// Returns `None` for lines that are too long to be a heading.
pub fn split_label(line: &str) -> Option<(&str, Option<&str>)> {
    let line = line.trim();
    let (label, inline) = match line.split_once(':') {
        Some((label, rest)) => (label, Some(rest.trim()).filter(|r| !r.is_empty())),
        None => (line, None),
    };

    let label = label.trim_matches(|c: char| c == '#' || c == '*' || c.is_whitespace());
    if label.is_empty() || label.split_whitespace().count() > MAX_LABEL_WORDS {
        return None;
    }
    Some((label, inline))
}

/// Whether a line starts a new section.
///
/// A heading is a short capitalised label, either a bare label ending with
/// a colon or one starting with a known section word ("Education",
/// "WORK EXPERIENCE", "Projects:").
pub fn is_section_heading(line: &str) -> bool {
    let Some((label, inline)) = split_label(line) else {
        return false;
    };
    if !HEADING_SHAPE.is_match(label) {
        return false;
    }

    let bare_with_colon = inline.is_none() && line.trim_end().ends_with(':');
    let first_word = label
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();

    bare_with_colon || SECTION_WORDS.contains(&first_word.as_str())
}

/// Find the first section whose label matches `heading`.
pub fn find_section<'a>(text: &'a str, heading: &Regex) -> Option<Section<'a>> {
    let lines: Vec<&str> = text.lines().collect();

    for (i, &line) in lines.iter().enumerate() {
        let Some((label, inline)) = split_label(line) else {
            continue;
        };
        if !heading.is_match(label) {
            continue;
        }

        let body = match inline {
            Some(_) => Vec::new(),
            None => lines[i + 1..]
                .iter()
                .take_while(|line| !is_section_heading(line))
                .copied()
                .collect(),
        };

        return Some(Section {
            heading: label,
            inline,
            body,
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::rules::patterns::{SKILLS_HEADING, SUMMARY_HEADING};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inline_section() {
        let text = "Jane Doe\nSkills: Rust, Go\nAustin, TX";
        let section = find_section(text, &SKILLS_HEADING).unwrap();

        assert_eq!(section.heading, "Skills");
        assert_eq!(section.inline, Some("Rust, Go"));
        assert!(section.body.is_empty());
    }

    #[test]
    fn test_block_section_ends_at_next_heading() {
        let text = "TECHNICAL SKILLS\nRust, Go\nPostgreSQL\n\nEDUCATION\nB.Tech 2016-2020";
        let section = find_section(text, &SKILLS_HEADING).unwrap();

        assert_eq!(section.heading, "TECHNICAL SKILLS");
        assert_eq!(section.lines().collect::<Vec<_>>(), vec!["Rust, Go", "PostgreSQL"]);
    }

    #[test]
    fn test_block_section_runs_to_end() {
        let text = "Summary\n\nBackend engineer building payment systems.\nLoves Rust.";
        let section = find_section(text, &SUMMARY_HEADING).unwrap();
        assert_eq!(section.first_line(), Some("Backend engineer building payment systems."));
    }

    #[test]
    fn test_section_headings() {
        assert!(is_section_heading("EDUCATION"));
        assert!(is_section_heading("Work Experience"));
        assert!(is_section_heading("  Projects:"));
        assert!(is_section_heading("Tools:"));
        assert!(is_section_heading("## Education"));

        assert!(!is_section_heading("Python"));
        assert!(!is_section_heading("Languages: Rust, Go"));
        assert!(!is_section_heading("Hyderabad, Telangana"));
        assert!(!is_section_heading("Experience with distributed systems and large teams"));
        assert!(!is_section_heading(""));
    }

    #[test]
    fn test_no_section() {
        assert!(find_section("Jane Doe\nRust developer", &SKILLS_HEADING).is_none());
    }
}
