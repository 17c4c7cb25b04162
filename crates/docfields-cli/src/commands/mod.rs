//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod extract;
pub mod output;
pub mod profiles;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use docfields_core::models::DocfieldsConfig;
use docfields_core::pdf::{PdfExtractor, PdfProcessor};

/// Default location of the config file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("docfields")
        .join("config.json")
}

/// Config file named on the command line, else the default location.
pub fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load the config named on the command line, else the default file if it
/// exists, else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<DocfieldsConfig> {
    if let Some(path) = config_path {
        return DocfieldsConfig::from_file(Path::new(path))
            .with_context(|| format!("Failed to load config from {}", path));
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Using config at {}", path.display());
        return DocfieldsConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    Ok(DocfieldsConfig::default())
}

/// Text of a PDF or plain-text input file.
pub fn read_source_text(path: &Path, config: &DocfieldsConfig) -> anyhow::Result<String> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let text = match extension.as_str() {
        "pdf" => {
            let extractor = PdfExtractor::from_config(&config.pdf).open(path)?;
            debug!("PDF has {} pages", extractor.page_count());
            extractor.extract_text()?
        }
        _ => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {} as UTF-8 text", path.display()))?,
    };

    Ok(text)
}
