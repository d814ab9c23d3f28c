//! YAML configuration for batch runs.
//!
//! Every field has a default, so an empty file (or no file at all) is a
//! valid configuration. Command-line flags are layered on top in
//! [`crate::cli`].
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! converter: target/release/jsontohwpx
//! output_dir: output
//! extension: hwpx
//! include_header: false
//! title_date_name: false
//! max_per_file: 50
//! log_level: info
//! log_format: json
//!
//! date:
//!   substitutions:
//!     - ["오전", "AM"]
//!     - ["오후", "PM"]
//!     - [".", "-"]
//!   patterns:
//!     - "%Y-%m-%d %p %I:%M:%S"
//!     - "%Y-%m-%d %H:%M:%S"
//!     - "%Y-%m-%d"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use ingest::DateConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::batch::BatchOptions;
use crate::transform::TransformOptions;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Log output format for the binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Top-level configuration for a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BatchConfig {
    /// Configuration format version
    pub version: String,

    /// Path to the converter executable
    pub converter: PathBuf,

    /// Parent directory of the per-input output directories
    pub output_dir: PathBuf,

    /// Output file extension, without the dot
    pub extension: String,

    pub include_header: bool,

    /// Name files `<title>_<date>` instead of by identifier
    pub title_date_name: bool,

    /// Records processed per input; absent or 0 means all
    pub max_per_file: Option<usize>,

    /// Default filter directive when `RUST_LOG` is unset
    pub log_level: String,

    pub log_format: LogFormat,

    pub date: DateConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            converter: PathBuf::from("target/release/jsontohwpx"),
            output_dir: PathBuf::from("output"),
            extension: "hwpx".to_string(),
            include_header: false,
            title_date_name: false,
            max_per_file: None,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            date: DateConfig::default(),
        }
    }
}

impl BatchConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        // An empty document deserializes to unit, not to a mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: BatchConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        if self.extension.is_empty() {
            return Err(ConfigLoadError::Validation(
                "extension must not be empty".into(),
            ));
        }
        if self.extension.contains(['.', '/', '\\']) {
            return Err(ConfigLoadError::Validation(format!(
                "extension {:?} must not contain '.' or path separators",
                self.extension
            )));
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "log_level must not be empty".into(),
            ));
        }
        self.date
            .validate()
            .map_err(|err| ConfigLoadError::Validation(err.to_string()))?;

        Ok(())
    }

    /// Options handed to the batch runner.
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            output_dir: self.output_dir.clone(),
            extension: self.extension.clone(),
            max_per_file: self.max_per_file,
            transform: TransformOptions {
                include_header: self.include_header,
                title_date_name: self.title_date_name,
                date: self.date.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1.0"
converter: /opt/bin/jsontohwpx
output_dir: converted
include_header: true
max_per_file: 25
log_format: json
"#;

        let config = BatchConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.converter, PathBuf::from("/opt/bin/jsontohwpx"));
        assert_eq!(config.output_dir, PathBuf::from("converted"));
        assert!(config.include_header);
        assert!(!config.title_date_name);
        assert_eq!(config.max_per_file, Some(25));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.extension, "hwpx");
        assert_eq!(config.date, DateConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let yaml = "version: \"1\"\ntitle_date_name: true\n";

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = BatchConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.version, "1");
        assert!(config.title_date_name);
    }

    #[test]
    fn test_missing_file() {
        let err = BatchConfig::from_file("/no/such/batch.yaml").unwrap_err();
        assert!(matches!(err, ConfigLoadError::FileRead(_)));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(BatchConfig::from_yaml("").unwrap(), BatchConfig::default());
        assert_eq!(
            BatchConfig::from_yaml("version: \"1.0\"\n").unwrap(),
            BatchConfig::default()
        );
    }

    #[test]
    fn test_unsupported_version() {
        let err = BatchConfig::from_yaml("version: \"2.0\"\n").unwrap_err();
        assert!(matches!(err, ConfigLoadError::UnsupportedVersion(v) if v == "2.0"));
    }

    #[test]
    fn test_extension_validation() {
        let err = BatchConfig::from_yaml("extension: \".hwpx\"\n").unwrap_err();
        assert!(err.to_string().contains("must not contain"));

        let err = BatchConfig::from_yaml("extension: \"\"\n").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_date_validation() {
        let yaml = r#"
date:
  patterns: []
"#;
        let err = BatchConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Validation(_)));
        assert!(err.to_string().contains("date pattern"));
    }

    #[test]
    fn test_custom_date_table() {
        let yaml = r#"
date:
  substitutions:
    - ["午前", "AM"]
    - ["午後", "PM"]
    - ["/", "-"]
"#;
        let config = BatchConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.date.substitutions.len(), 3);
        assert_eq!(config.date.patterns, DateConfig::default().patterns);
        assert_eq!(
            config
                .date
                .parse_created_date(Some("2024/03/05 午後 02:15:30"))
                .as_deref(),
            Some("2024-03-05")
        );
    }

    #[test]
    fn test_batch_options() {
        let config = BatchConfig {
            include_header: true,
            max_per_file: Some(3),
            ..Default::default()
        };
        let options = config.batch_options();
        assert_eq!(options.output_dir, PathBuf::from("output"));
        assert_eq!(options.extension, "hwpx");
        assert_eq!(options.max_per_file, Some(3));
        assert!(options.transform.include_header);
        assert!(!options.transform.title_date_name);
    }
}
