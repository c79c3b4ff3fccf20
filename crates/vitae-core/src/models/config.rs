//! Configuration structures for the résumé pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, VitaeError};

/// Main configuration for the vitae pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitaeConfig {
    /// Document loading configuration.
    pub loader: LoaderConfig,

    /// Field inference configuration.
    pub inference: InferenceConfig,
}

/// Document loading configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Decode media types other than PDF as text instead of rejecting them.
    pub treat_unknown_as_text: bool,

    /// Treat content starting with `%PDF-` as PDF when the declared type is generic.
    pub sniff_pdf_magic: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            treat_unknown_as_text: true,
            sniff_pdf_magic: true,
        }
    }
}

/// Field inference configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Number of non-blank lines at the top of the text searched for a name.
    pub name_scan_lines: usize,

    /// Maximum number of words in a name line.
    pub max_name_tokens: usize,

    /// Maximum length of a summary taken from the text.
    pub about_max_chars: usize,

    /// Characters of text per estimated year of experience.
    pub chars_per_experience_year: usize,

    /// Lower bound of the experience estimate.
    pub min_estimated_experience: u32,

    /// Upper bound of the experience estimate.
    pub max_estimated_experience: u32,

    /// Apply the IIIT Hyderabad location and education defaults.
    pub institution_defaults: bool,

    /// Generate a summary sentence when the text has no summary section.
    pub synthesize_about: bool,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            name_scan_lines: 5,
            max_name_tokens: 4,
            about_max_chars: 150,
            chars_per_experience_year: 2000,
            min_estimated_experience: 1,
            max_estimated_experience: 5,
            institution_defaults: true,
            synthesize_about: true,
        }
    }
}

impl VitaeConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check that the numeric settings are usable.
    pub fn validate(&self) -> Result<()> {
        let inference = &self.inference;
        if inference.chars_per_experience_year == 0 {
            return Err(VitaeError::Config(
                "inference.chars_per_experience_year must be greater than zero".to_string(),
            ));
        }
        if inference.min_estimated_experience > inference.max_estimated_experience {
            return Err(VitaeError::Config(format!(
                "inference.min_estimated_experience ({}) exceeds inference.max_estimated_experience ({})",
                inference.min_estimated_experience, inference.max_estimated_experience
            )));
        }
        if inference.name_scan_lines == 0 {
            return Err(VitaeError::Config(
                "inference.name_scan_lines must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
