//! Parse command - extract candidate details from a single résumé.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use vitae_core::{RawDocument, ResumePipeline, SourceKind};

use super::load_config;
use super::output::{format_report, OutputFormat};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input file (PDF or text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Declared media type (default: guessed from the file extension)
    #[arg(long)]
    mime: Option<String>,

    /// Build a record from the filename when the file cannot be read
    #[arg(long)]
    lenient: bool,

    /// Include extraction metadata in the output
    #[arg(long)]
    report: bool,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Parsing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Reading file...");

    let document = match &args.mime {
        Some(mime) => {
            let bytes = tokio::fs::read(&args.input).await?;
            let filename = args
                .input
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            RawDocument::new(bytes, mime, filename)
        }
        None => RawDocument::from_path_async(&args.input).await?,
    };

    pb.set_message("Extracting fields...");
    let pipeline = ResumePipeline::try_new(config)?;
    let report = if args.lenient {
        pipeline.process_or_default(&document)
    } else {
        pipeline.process(&document)?
    };

    pb.finish_and_clear();

    for warning in &report.metadata.warnings {
        debug!("{}", warning);
    }
    if report.metadata.source == SourceKind::FilenameOnly {
        eprintln!(
            "{} Could not read {}; fields were filled from the filename",
            style("!").yellow(),
            args.input.display()
        );
    }

    let output = format_report(&report, args.format, args.report)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output.trim_end());
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
