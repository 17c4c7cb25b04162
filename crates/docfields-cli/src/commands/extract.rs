//! Extract command - fields or transactions from a single file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use docfields_core::models::{DocfieldsConfig, DocumentOutput};
use docfields_core::pipeline::DocumentPipeline;
use docfields_core::statement::ClassificationPolicy;

use super::output::{render, OutputFormat};
use super::{load_config, read_source_text};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Profile id (default: detect from the text)
    #[arg(short, long)]
    profile: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Skip the label/value fallback pass
    #[arg(long)]
    no_fallback: bool,

    /// How two uncued statement amounts are read (second-is-balance, second-is-credit)
    #[arg(long)]
    policy: Option<ClassificationPolicy>,

    /// Embed the source text in JSON output
    #[arg(long)]
    include_text: bool,
}

/// Apply command-line overrides on top of the loaded config.
pub fn apply_overrides(
    config: &mut DocfieldsConfig,
    no_fallback: bool,
    policy: Option<ClassificationPolicy>,
) {
    if no_fallback {
        config.extraction.enable_fallback = false;
    }
    if let Some(policy) = policy {
        config.statement.classification = policy;
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    apply_overrides(&mut config, args.no_fallback, args.policy);

    let pipeline = DocumentPipeline::from_config(config)?;

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );

    pb.set_message("Reading text...");
    let text = read_source_text(&args.input, pipeline.config())?;

    pb.set_message("Extracting...");
    let output = pipeline.process(&text, args.profile.as_deref())?;

    pb.finish_and_clear();

    let source_text = args.include_text.then_some(text.as_str());
    let rendered = render(&output, args.format, source_text)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &rendered)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", rendered);
    }

    report(&output);
    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn report(output: &DocumentOutput) {
    match output {
        DocumentOutput::Fields(result) => {
            for warning in &result.warnings {
                eprintln!("{} {}", style("⚠").yellow(), warning);
            }
            debug!(
                "Profile {} filled {}/{} fields",
                result.profile,
                result.metadata.filled_field_count,
                result.metadata.total_field_count
            );
        }
        DocumentOutput::Statement(result) => {
            debug!(
                "Profile {} found {} transactions",
                result.profile, result.metadata.transaction_count
            );
        }
    }
}
