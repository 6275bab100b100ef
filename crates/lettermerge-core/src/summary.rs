//! Per-phase outcome summaries

use std::fmt;

use serde::Serialize;

use crate::error::LetterError;

/// Pipeline phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Discover,
    Consolidate,
    Report,
    Archive,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Discover => write!(f, "discover"),
            Phase::Consolidate => write!(f, "consolidate"),
            Phase::Report => write!(f, "report"),
            Phase::Archive => write!(f, "archive"),
        }
    }
}

/// What one phase achieved, with enough detail to remediate failures by hand
#[derive(Debug)]
pub struct PhaseSummary {
    pub phase: Phase,
    pub succeeded: usize,
    /// Recoverable problems that did not fail an item (e.g. skipped files)
    pub warnings: Vec<LetterError>,
    /// Items that could not be processed
    pub failures: Vec<LetterError>,
    /// Set when the phase stopped early on request
    pub interrupted: bool,
}

impl PhaseSummary {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            succeeded: 0,
            warnings: Vec::new(),
            failures: Vec::new(),
            interrupted: false,
        }
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && !self.interrupted
    }

    pub fn to_json(&self) -> serde_json::Value {
        let errors = |list: &[LetterError]| -> Vec<serde_json::Value> {
            list.iter().map(|e| e.to_json()["error"].clone()).collect()
        };
        serde_json::json!({
            "phase": self.phase,
            "succeeded": self.succeeded,
            "failed": self.failed(),
            "interrupted": self.interrupted,
            "warnings": errors(&self.warnings),
            "failures": errors(&self.failures),
        })
    }
}
