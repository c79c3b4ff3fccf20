//! Batch command - parse many résumés matched by a glob pattern.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, error, warn};

use vitae_core::{ParseReport, RawDocument, ResumePipeline, SourceKind};

use super::load_config;
use super::output::{format_report, OutputFormat};

/// File extensions picked up from the glob.
const RESUME_EXTENSIONS: &[&str] = &["pdf", "txt", "text", "md"];

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for input files
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Include extraction metadata in each output
    #[arg(long)]
    report: bool,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Build a record from the filename when a file cannot be read
    #[arg(long)]
    lenient: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    report: Option<ParseReport>,
    error: Option<String>,
    processing_time_ms: u64,
}

/// One line of the summary CSV.
#[derive(Serialize)]
struct SummaryRow<'a> {
    filename: &'a str,
    status: &'a str,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    experience: String,
    skills: usize,
    defaults: usize,
    processing_time_ms: u64,
    error: &'a str,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            RESUME_EXTENSIONS.contains(&ext.to_lowercase().as_str())
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let pipeline = ResumePipeline::try_new(config)?;
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = process_single_file(&path, &pipeline, args.lenient).await;
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(report) => results.push(FileResult {
                path,
                report: Some(report),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path,
                        report: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    if let Some(output_dir) = &args.output_dir {
        write_outputs(output_dir, &results, args.format, args.report)?;
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<&FileResult> = results.iter().filter(|r| r.error.is_some()).collect();
    let recovered = results
        .iter()
        .filter_map(|r| r.report.as_ref())
        .filter(|report| report.metadata.source == SourceKind::FilenameOnly)
        .count();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} recovered from filename, {} failed",
        style(results.len() - failed.len() - recovered).green(),
        style(recovered).yellow(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

async fn process_single_file(
    path: &Path,
    pipeline: &ResumePipeline,
    lenient: bool,
) -> anyhow::Result<ParseReport> {
    let document = RawDocument::from_path_async(path).await?;

    if lenient {
        Ok(pipeline.process_or_default(&document))
    } else {
        Ok(pipeline.process(&document)?)
    }
}

fn write_outputs(
    output_dir: &Path,
    results: &[FileResult],
    format: OutputFormat,
    include_report: bool,
) -> anyhow::Result<()> {
    for result in results {
        let Some(report) = &result.report else {
            continue;
        };

        let output_name = result
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("resume");
        let output_path = output_dir.join(format!("{}.{}", output_name, format.extension()));

        fs::write(&output_path, format_report(report, format, include_report)?)?;
        debug!("Wrote output to {}", output_path.display());
    }

    Ok(())
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        let row = match &result.report {
            Some(report) => {
                let data = &report.data;
                SummaryRow {
                    filename,
                    status: match report.metadata.source {
                        SourceKind::FilenameOnly => "recovered",
                        _ => "success",
                    },
                    name: data.name.as_deref().unwrap_or_default(),
                    email: data.email.as_deref().unwrap_or_default(),
                    phone: data.phone.as_deref().unwrap_or_default(),
                    experience: data.experience.map(|y| y.to_string()).unwrap_or_default(),
                    skills: data.skills.len(),
                    defaults: report.metadata.warnings.len(),
                    processing_time_ms: result.processing_time_ms,
                    error: "",
                }
            }
            None => SummaryRow {
                filename,
                status: "error",
                name: "",
                email: "",
                phone: "",
                experience: String::new(),
                skills: 0,
                defaults: 0,
                processing_time_ms: result.processing_time_ms,
                error: result.error.as_deref().unwrap_or_default(),
            },
        };

        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}
