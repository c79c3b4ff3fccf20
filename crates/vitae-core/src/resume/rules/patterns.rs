//! Common regex patterns and keyword lists for résumé field extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Technical keywords searched for when a résumé has no skills section.
pub const TECH_KEYWORDS: &[&str] = &[
    "JavaScript", "TypeScript", "React", "Angular", "Vue", "Node.js",
    "Python", "Java", "C#", "C++", "Ruby", "PHP", "Swift", "Kotlin",
    "HTML", "CSS", "SQL", "NoSQL", "MongoDB", "AWS", "Azure", "GCP",
    "Docker", "Kubernetes", "CI/CD", "Git", "REST API", "GraphQL",
];

/// Skills assigned when nothing better is found.
pub const GENERIC_SKILLS: &[&str] = &["Communication", "Problem Solving", "Teamwork"];

/// Words that are never a location, on top of the candidate's own skills.
pub const LOCATION_BLACKLIST: &[&str] = &[
    "javascript", "python", "react", "node.js", "html", "css", "sql", "mongodb", "git",
    "languages", "frameworks", "libraries", "developer", "tools",
];

/// First words of lines that start a new résumé section.
pub const SECTION_WORDS: &[&str] = &[
    "about", "achievements", "activities", "awards", "certifications", "certificates",
    "contact", "courses", "coursework", "declaration", "education", "employment",
    "experience", "extracurricular", "hobbies", "honors", "interests", "internship",
    "internships", "leadership", "objective", "personal", "professional", "profile",
    "project", "projects", "publications", "qualifications", "references", "skills",
    "strengths", "summary", "training", "volunteer", "work",
];

/// Characters separating entries in a skills list.
pub const SKILL_SEPARATORS: &[char] = &[',', ';', '|', '\n', '\t', '•', '·', '▪', '◦', '‣', '●'];

/// Institution literal used by the location and education defaults.
pub const INSTITUTION: &str = "IIIT Hyderabad";

/// Location reported for résumés from [`INSTITUTION`].
pub const INSTITUTION_LOCATION: &str = "Hyderabad, Telangana";

lazy_static! {
    // Contact details
    pub static ref EMAIL: Regex = Regex::new(
        r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b"
    ).unwrap();

    /// Phone patterns in priority order.
    pub static ref PHONE_PATTERNS: Vec<(&'static str, Regex)> = vec![
        ("plain", Regex::new(
            r"\b\d{10}\b"
        ).unwrap()),
        ("grouped", Regex::new(
            r"\b\d{3}[-. ]\d{3}[-. ]\d{4}\b"
        ).unwrap()),
        ("parenthesized", Regex::new(
            r"\(\d{3}\)[-. ]?\d{3}[-. ]?\d{4}\b"
        ).unwrap()),
        ("international", Regex::new(
            r"\+\d{1,3}[-. ]?(?:\(?\d{3}\)?[-. ]?\d{3}[-. ]?\d{4}|\d{5}[-. ]?\d{5})\b"
        ).unwrap()),
    ];

    // Name line filters
    pub static ref DIGIT_RUN: Regex = Regex::new(r"[0-9]{3}").unwrap();

    pub static ref RESUME_BOILERPLATE: Regex = Regex::new(
        r"(?i)\b(?:resume|résumé|curriculum|vitae|cv|profile)\b"
    ).unwrap();

    // Section headings
    pub static ref HEADING_SHAPE: Regex = Regex::new(
        r"^[A-Z][A-Za-z &/]{2,30}$"
    ).unwrap();

    pub static ref SKILLS_HEADING: Regex = Regex::new(
        r"(?i)^(?:[a-z&/]+\s+){0,3}(?:skills?|competenc\w*|technolog\w*)(?:\s+(?:set|summary|overview|(?:&|and)\s+[a-z]+))?$"
    ).unwrap();

    pub static ref SUMMARY_HEADING: Regex = Regex::new(
        r"(?i)^(?:professional\s+|career\s+|executive\s+|personal\s+)?(?:summary|objective|profile|about(?:\s+me)?)$"
    ).unwrap();

    /// Whole-word, case-insensitive matchers for [`TECH_KEYWORDS`].
    pub static ref TECH_KEYWORD_PATTERNS: Vec<(&'static str, Regex)> = TECH_KEYWORDS
        .iter()
        .map(|keyword| {
            let pattern = format!(r"(?i)(?:^|[^\w]){}(?:[^\w]|$)", regex::escape(keyword));
            (*keyword, Regex::new(&pattern).unwrap())
        })
        .collect();

    // Education
    pub static ref DEGREE_YEAR_RANGE: Regex = Regex::new(
        r"(?i)(?:bachelor|b\.?\s?tech)[^\n]*?\b(20\d{2})\b[^\d]{0,20}?\b(20\d{2}|present)\b"
    ).unwrap();

    pub static ref DEGREE_SCORE: Regex = Regex::new(
        r"(?i)(?:bachelor|b\.?\s?tech)[^\n]*?(?:(?:c?gpa|score)\s*:?|:)\s*(\d+(?:\.\d+)?)"
    ).unwrap();

    pub static ref BACHELOR_SUBJECT: Regex = Regex::new(
        r"(?i)bachelor(?:'s|s)?\s+(?:of|in)\s+([^,\n.]+)"
    ).unwrap();

    pub static ref BTECH_SUBJECT: Regex = Regex::new(
        r"(?i)b\.?\s?tech\.?\s+(?:in\s+)?([^,\n.]+)"
    ).unwrap();

    pub static ref COMPUTER_SCIENCE: Regex = Regex::new(
        r"(?i)computer\s+science|\bcse\b"
    ).unwrap();

    // Location
    pub static ref INSTITUTION_LOCATION_PATTERN: Regex = Regex::new(
        r"(?i)hyderabad,?\s*telangana"
    ).unwrap();

    pub static ref LABELED_LOCATION: Regex = Regex::new(
        r"(?i)\b(?:location|address)[ \t]*:[ \t]*([^,\n]+(?:,[ \t]*[^,\n]+)?)"
    ).unwrap();

    pub static ref CITY_STATE: Regex = Regex::new(
        r"\b([A-Za-z][A-Za-z .]*?),[ \t]*([A-Z]{2})\b"
    ).unwrap();

    pub static ref CITY_REGION: Regex = Regex::new(
        r"\b([A-Za-z][A-Za-z .]*?),[ \t]*([A-Za-z]{2,}(?: [A-Za-z]{2,})?)\b"
    ).unwrap();

    // Experience
    pub static ref YEARS_OF_EXPERIENCE: Regex = Regex::new(
        r"(?i)\b(\d{1,2})\s*\+?\s*(?:years?|yrs?)(?:\s+of)?\s+(?:[a-z]+\s+)?(?:experience|exp)\b"
    ).unwrap();

    pub static ref EXPERIENCE_IN_YEARS: Regex = Regex::new(
        r"(?i)\bexperience\s*:?\s*(\d{1,2})\s*\+?\s*(?:years?|yrs?)\b"
    ).unwrap();
}
