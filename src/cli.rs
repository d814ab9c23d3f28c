//! Command-line arguments.
//!
//! Flags override values from `--config`, which in turn override the
//! built-in defaults.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{BatchConfig, ConfigLoadError};

/// Convert article dumps (JSON arrays) into HWPX documents
#[derive(Parser, Debug)]
#[command(name = "hwpx-batch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON files, each holding a list of article records
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Path to the converter executable [default: target/release/jsontohwpx]
    #[arg(long)]
    pub converter: Option<PathBuf>,

    /// Directory receiving one sub-directory per input [default: output]
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Render the author/department/date header in each document
    #[arg(long)]
    pub include_header: bool,

    /// Convert at most N records per input (0 means all)
    #[arg(long, value_name = "N")]
    pub max_per_file: Option<usize>,

    /// Name files `<title>_<YYYY-MM-DD>` instead of by article id
    #[arg(long)]
    pub title_date_name: bool,

    /// Default log filter when RUST_LOG is unset [default: info]
    #[arg(long)]
    pub log_level: Option<String>,

    /// YAML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Loads `--config` (or the defaults) and applies the flags on top.
    pub fn load_config(&self) -> Result<BatchConfig, ConfigLoadError> {
        let mut config = match &self.config {
            Some(path) => BatchConfig::from_file(path)?,
            None => BatchConfig::default(),
        };

        if let Some(converter) = &self.converter {
            config.converter = converter.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(limit) = self.max_per_file {
            config.max_per_file = Some(limit);
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config.include_header |= self.include_header;
        config.title_date_name |= self.title_date_name;

        config.validate()?;
        Ok(config)
    }
}
