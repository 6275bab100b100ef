//! Resolution of the input, output and archive trees under a pipeline root

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::config::PipelineConfig;
use crate::partition::partition_name;

/// Concrete directories of one pipeline root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
    input_root: PathBuf,
    output_root: PathBuf,
    archive_root: PathBuf,
}

impl Layout {
    pub fn new(root: &Path, config: &PipelineConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            input_root: root.join(&config.layout.input_dir),
            output_root: root.join(&config.layout.output_dir),
            archive_root: root.join(&config.layout.archive_dir),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/Input`
    pub fn input_root(&self) -> &Path {
        &self.input_root
    }

    /// `<root>/Output`
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// `<root>/Archive`
    pub fn archive_root(&self) -> &Path {
        &self.archive_root
    }

    /// `<root>/Input/<category>/<partition>`
    pub fn input_partition(&self, category: &str, partition: &str) -> PathBuf {
        self.input_root.join(category).join(partition)
    }

    /// `<root>/Output/<YYYYMMDD>` for a run date
    pub fn output_partition(&self, run_date: NaiveDate) -> PathBuf {
        output_partition(&self.output_root, run_date)
    }

    /// `<root>/Archive/<partition>`
    pub fn archive_partition(&self, partition: &str) -> PathBuf {
        self.archive_root.join(partition)
    }
}

/// `<output_root>/<YYYYMMDD>`
pub fn output_partition(output_root: &Path, run_date: NaiveDate) -> PathBuf {
    output_root.join(partition_name(run_date))
}
