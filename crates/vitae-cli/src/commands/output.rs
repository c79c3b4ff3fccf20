//! Rendering parse results as JSON, CSV or text.

use vitae_core::{FieldSource, ParseReport, ParsedResumeData};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for per-file outputs.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

/// Render a parse result. With `include_report` the JSON and text forms
/// carry the extraction metadata too.
pub fn format_report(
    report: &ParseReport,
    format: OutputFormat,
    include_report: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if include_report => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report.data)?),
        OutputFormat::Csv => format_csv(&report.data),
        OutputFormat::Text => Ok(format_text(report, include_report)),
    }
}

fn format_csv(data: &ParsedResumeData) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "name",
        "email",
        "phone",
        "location",
        "skills",
        "experience",
        "education",
        "about",
    ])?;

    wtr.write_record([
        data.name.as_deref().unwrap_or_default(),
        data.email.as_deref().unwrap_or_default(),
        data.phone.as_deref().unwrap_or_default(),
        data.location.as_deref().unwrap_or_default(),
        data.skills.join("; ").as_str(),
        data.experience.map(|y| y.to_string()).unwrap_or_default().as_str(),
        data.education.as_deref().unwrap_or_default(),
        data.about.as_deref().unwrap_or_default(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(report: &ParseReport, include_report: bool) -> String {
    let data = &report.data;
    let mut output = String::new();

    let fields = [
        ("Name", data.name.as_deref()),
        ("Email", data.email.as_deref()),
        ("Phone", data.phone.as_deref()),
        ("Location", data.location.as_deref()),
        ("Education", data.education.as_deref()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            output.push_str(&format!("{}: {}\n", label, value));
        }
    }
    if let Some(years) = data.experience {
        output.push_str(&format!("Experience: {} years\n", years));
    }
    if !data.skills.is_empty() {
        output.push_str(&format!("Skills: {}\n", data.skills.join(", ")));
    }
    if let Some(about) = &data.about {
        output.push_str(&format!("\nAbout:\n  {}\n", about));
    }

    if include_report {
        let metadata = &report.metadata;
        output.push_str("\nReport:\n");
        output.push_str(&format!("  File: {}\n", metadata.filename));
        output.push_str(&format!("  Source: {:?}\n", metadata.source));
        if let Some(pages) = metadata.page_count {
            output.push_str(&format!("  Pages: {}\n", pages));
        }
        output.push_str(&format!("  Text length: {} chars\n", metadata.text_length));
        for (field, source) in &metadata.field_sources {
            let source = match source {
                FieldSource::Extracted(rule) => format!("extracted ({})", rule),
                FieldSource::Default => "default".to_string(),
            };
            output.push_str(&format!("  {}: {}\n", field, source));
        }
        for warning in &metadata.warnings {
            output.push_str(&format!("  warning: {}\n", warning));
        }
        output.push_str(&format!(
            "  Processed at: {} ({} ms)\n",
            metadata
                .processed_at
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            metadata.processing_time_ms
        ));
    }

    output
}
