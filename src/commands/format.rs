//! Shared output formatting for phase summaries

use lettermerge_core::error::{LetterError, Result};
use lettermerge_core::PhaseSummary;

use crate::cli::Cli;

/// Print one summary line per phase followed by its warnings and failures.
pub fn print_phase_summaries(cli: &Cli, summaries: &[&PhaseSummary]) {
    for summary in summaries {
        if !cli.quiet {
            println!(
                "{}: {} succeeded, {} failed{}",
                summary.phase,
                summary.succeeded,
                summary.failed(),
                if summary.interrupted { " (interrupted)" } else { "" }
            );
            for warning in &summary.warnings {
                println!("  warning: {}", warning);
            }
        }
        for failure in &summary.failures {
            eprintln!("  failed: {}", failure);
        }
    }
}

/// JSON array of phase summaries
pub fn phases_json(summaries: &[&PhaseSummary]) -> serde_json::Value {
    serde_json::Value::Array(summaries.iter().map(|s| s.to_json()).collect())
}

/// Turn recorded failures into a non-zero exit.
///
/// An interrupted phase wins over failures so the caller knows to rerun.
pub fn check_summaries(summaries: &[&PhaseSummary]) -> Result<()> {
    if let Some(interrupted) = summaries.iter().find(|s| s.interrupted) {
        return Err(LetterError::Interrupted {
            phase: interrupted.phase.to_string(),
        });
    }

    let failed: usize = summaries.iter().map(|s| s.failed()).sum();
    if failed > 0 {
        return Err(LetterError::Other(format!(
            "{} item(s) failed; see the run summary",
            failed
        )));
    }
    Ok(())
}

/// Print a JSON value, pretty
pub fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
