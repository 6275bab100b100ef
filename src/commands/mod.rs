pub mod archive;
pub mod combine;
pub mod dispatch;
pub mod format;
pub mod report;
pub mod run;
pub mod seed;

use std::env;
use std::path::PathBuf;

use crate::cli::Cli;
use lettermerge_core::error::Result;
use lettermerge_core::{Layout, PipelineConfig};

/// Configuration and resolved directories for one invocation
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub config: PipelineConfig,
    pub layout: Layout,
}

impl Pipeline {
    /// Resolve the pipeline root (`--root` or the current directory) and load
    /// its configuration.
    pub fn open(cli: &Cli) -> Result<Self> {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        let config = PipelineConfig::load_or_default(&root)?;
        let layout = Layout::new(&root, &config);
        Ok(Self { config, layout })
    }

    pub fn extension(&self) -> &str {
        &self.config.documents.extension
    }
}
