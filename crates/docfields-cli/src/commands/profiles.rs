//! Profiles command - list, show and detect document profiles.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use docfields_core::pipeline::DocumentPipeline;
use docfields_core::profile::DocumentKind;

use super::{load_config, read_source_text};

/// Arguments for the profiles command.
#[derive(Args)]
pub struct ProfilesArgs {
    #[command(subcommand)]
    command: ProfilesCommand,
}

#[derive(Subcommand)]
enum ProfilesCommand {
    /// List registered profiles
    List,

    /// Print a profile as a JSON definition
    Show {
        /// Profile id
        id: String,
    },

    /// Show which profile a file would be processed with
    Detect {
        /// Input file (PDF or plain text)
        input: PathBuf,
    },
}

pub async fn run(args: ProfilesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let pipeline = DocumentPipeline::from_config(load_config(config_path)?)?;

    match args.command {
        ProfilesCommand::List => list_profiles(&pipeline),
        ProfilesCommand::Show { id } => show_profile(&pipeline, &id),
        ProfilesCommand::Detect { input } => detect_profile(&pipeline, &input),
    }
}

fn list_profiles(pipeline: &DocumentPipeline) -> anyhow::Result<()> {
    for profile in pipeline.registry().iter() {
        let kind = match profile.kind() {
            DocumentKind::Fields => format!("{} fields", profile.field_count()),
            DocumentKind::BankStatement => "bank statement".to_string(),
        };

        println!("{:<16} {:<16} {}", profile.id(), kind, profile.description());
        if !profile.markers().is_empty() {
            println!("{:<16} markers: {}", "", profile.markers().join(", "));
        }
    }

    Ok(())
}

fn show_profile(pipeline: &DocumentPipeline, id: &str) -> anyhow::Result<()> {
    let profile = pipeline.registry().get(id)?;
    println!("{}", serde_json::to_string_pretty(&profile.to_definition())?);
    Ok(())
}

fn detect_profile(pipeline: &DocumentPipeline, input: &Path) -> anyhow::Result<()> {
    let text = read_source_text(input, pipeline.config())?;

    match pipeline.registry().detect(&text) {
        Some(profile) => println!("{}", profile.id()),
        None => {
            let fallback = &pipeline.config().extraction.default_profile;
            println!("{}", fallback);
            eprintln!(
                "{} No institution markers found, using default profile",
                style("ℹ").blue()
            );
        }
    }

    Ok(())
}
