//! Batch command for multiple input files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use docfields_core::models::DocumentOutput;
use docfields_core::pipeline::DocumentPipeline;
use docfields_core::statement::ClassificationPolicy;

use super::extract::apply_overrides;
use super::output::{render, OutputFormat};
use super::{load_config, read_source_text};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for input files (PDF or .txt)
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Profile id for every file (default: detect per file)
    #[arg(short, long)]
    profile: Option<String>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Skip the label/value fallback pass
    #[arg(long)]
    no_fallback: bool,

    /// How two uncued statement amounts are read
    #[arg(long)]
    policy: Option<ClassificationPolicy>,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    output: Option<DocumentOutput>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    apply_overrides(&mut config, args.no_fallback, args.policy);
    let pipeline = DocumentPipeline::from_config(config)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
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

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = process_single_file(&path, &pipeline, args.profile.as_deref());
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(output) => {
                results.push(ProcessResult {
                    path,
                    output: Some(output),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        output: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_and_clear();

    let successful: Vec<_> = results.iter().filter(|r| r.output.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            let Some(output) = &result.output else {
                continue;
            };

            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("document");
            let output_path =
                output_dir.join(format!("{}.{}", output_name, args.format.extension()));

            fs::write(&output_path, render(output, args.format, None)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
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

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
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

fn process_single_file(
    path: &Path,
    pipeline: &DocumentPipeline,
    profile: Option<&str>,
) -> anyhow::Result<DocumentOutput> {
    let text = read_source_text(path, pipeline.config())?;
    Ok(pipeline.process(&text, profile)?)
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "profile",
        "kind",
        "filled_or_transactions",
        "total_fields",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let time = result.processing_time_ms.to_string();

        match &result.output {
            Some(DocumentOutput::Fields(fields)) => {
                wtr.write_record([
                    filename,
                    "success",
                    &fields.profile,
                    "fields",
                    &fields.metadata.filled_field_count.to_string(),
                    &fields.metadata.total_field_count.to_string(),
                    &time,
                    "",
                ])?;
            }
            Some(DocumentOutput::Statement(statement)) => {
                wtr.write_record([
                    filename,
                    "success",
                    &statement.profile,
                    "statement",
                    &statement.metadata.transaction_count.to_string(),
                    "",
                    &time,
                    "",
                ])?;
            }
            None => {
                wtr.write_record([
                    filename,
                    "error",
                    "",
                    "",
                    "",
                    "",
                    &time,
                    result.error.as_deref().unwrap_or(""),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
