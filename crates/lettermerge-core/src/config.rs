//! Pipeline configuration for lettermerge
//!
//! Configuration lives in `<root>/lettermerge.toml`. The file is optional and
//! every key has a default matching the canonical directory layout.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{LetterError, Result};

/// Name of the configuration file under the pipeline root
pub const CONFIG_FILE: &str = "lettermerge.toml";

/// Pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PipelineConfig {
    /// Directory names under the pipeline root
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Document naming
    #[serde(default)]
    pub documents: DocumentConfig,
}

/// Directory names of the three trees
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_input_dir")]
    pub input_dir: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    #[serde(default = "default_archive_dir")]
    pub archive_dir: String,
}

/// Document extension and output naming
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentConfig {
    /// Extension (without the dot) of documents considered by discovery
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Prefix of merged output files (`<prefix>-<studentId>.<ext>`)
    #[serde(default = "default_combined_prefix")]
    pub combined_prefix: String,

    /// File stem of the run report (`<name>.<ext>`)
    #[serde(default = "default_report_name")]
    pub report_name: String,
}

fn default_input_dir() -> String {
    "Input".to_string()
}

fn default_output_dir() -> String {
    "Output".to_string()
}

fn default_archive_dir() -> String {
    "Archive".to_string()
}

fn default_extension() -> String {
    "txt".to_string()
}

fn default_combined_prefix() -> String {
    "combined".to_string()
}

fn default_report_name() -> String {
    "report".to_string()
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            archive_dir: default_archive_dir(),
        }
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            combined_prefix: default_combined_prefix(),
            report_name: default_report_name(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| LetterError::io_operation("read config", path.display(), e))?;
        let config: PipelineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `<root>/lettermerge.toml`, falling back to defaults when absent
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading config");
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject values that would break the directory layout or the
    /// `<prefix>-<id>.<ext>` naming scheme.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("layout.input_dir", &self.layout.input_dir),
            ("layout.output_dir", &self.layout.output_dir),
            ("layout.archive_dir", &self.layout.archive_dir),
        ] {
            validate_component(key, value)?;
        }

        let layout = &self.layout;
        if layout.input_dir == layout.output_dir
            || layout.input_dir == layout.archive_dir
            || layout.output_dir == layout.archive_dir
        {
            return Err(LetterError::invalid_value(
                "layout",
                "input_dir, output_dir and archive_dir must be distinct",
            ));
        }

        for (key, value) in [
            ("documents.extension", &self.documents.extension),
            ("documents.combined_prefix", &self.documents.combined_prefix),
            ("documents.report_name", &self.documents.report_name),
        ] {
            validate_component(key, value)?;
            if value.contains('.') {
                return Err(LetterError::invalid_value(key, value));
            }
        }

        if self.documents.combined_prefix.contains('-') || self.documents.extension.contains('-')
        {
            return Err(LetterError::invalid_value(
                "documents naming",
                "prefix and extension must not contain '-'",
            ));
        }

        Ok(())
    }
}

fn validate_component(key: &str, value: &str) -> Result<()> {
    if value.is_empty() || value.contains('/') || value.contains('\\') || value == ".." {
        return Err(LetterError::invalid_value(key, value));
    }
    Ok(())
}
