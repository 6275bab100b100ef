//! `lettermerge run` command - every phase in order
//!
//! Consolidation finishes before the report reads the output partition, and
//! archiving runs last because it removes the files the earlier phases read.
//! An interrupt skips the remaining phases, but the summaries of the phases
//! that ran are still printed.

use chrono::NaiveDate;

use crate::cli::{Cli, OutputFormat};
use crate::commands::format::{check_summaries, phases_json, print_json, print_phase_summaries};
use crate::commands::{archive, combine, report, seed, Pipeline};
use lettermerge_core::error::Result;
use lettermerge_core::{
    ArchivePass, ConsolidationRun, GroupedDocuments, Interrupt, Phase, PhaseSummary,
    ReportSummary,
};

/// Everything one run produced. Phases skipped after an interrupt are `None`.
pub struct RunOutcome {
    pub grouped: GroupedDocuments,
    pub run: ConsolidationRun,
    pub report: Option<ReportSummary>,
    pub pass: Option<ArchivePass>,
    /// Stands in for the archive phase when an interrupt arrived after the report
    skipped_archive: Option<PhaseSummary>,
}

impl RunOutcome {
    pub fn summaries(&self) -> Vec<&PhaseSummary> {
        let mut summaries = vec![&self.grouped.summary, &self.run.summary];
        if let Some(report) = &self.report {
            summaries.push(&report.summary);
        }
        if let Some(pass) = &self.pass {
            summaries.push(&pass.summary);
        }
        if let Some(skipped) = &self.skipped_archive {
            summaries.push(skipped);
        }
        summaries
    }
}

/// Run combine, report and archive without printing
pub fn perform(pipeline: &Pipeline, run_date: NaiveDate, interrupt: &Interrupt) -> Result<RunOutcome> {
    let (grouped, run) = combine::perform(pipeline, run_date, interrupt)?;
    let mut outcome = RunOutcome {
        grouped,
        run,
        report: None,
        pass: None,
        skipped_archive: None,
    };
    if outcome.run.summary.interrupted {
        return Ok(outcome);
    }

    outcome.report = Some(report::perform(pipeline, run_date));

    if interrupt.is_raised() {
        tracing::warn!("interrupted before archiving");
        let mut skipped = PhaseSummary::new(Phase::Archive);
        skipped.interrupted = true;
        outcome.skipped_archive = Some(skipped);
        return Ok(outcome);
    }
    outcome.pass = Some(archive::perform(pipeline, interrupt)?);
    Ok(outcome)
}

/// JSON document for a run, covering the phases that ran
pub fn outcome_json(outcome: &RunOutcome) -> serde_json::Value {
    let mut output = combine::run_json(&outcome.run);
    output["report"] = outcome
        .report
        .as_ref()
        .map_or(serde_json::Value::Null, report::report_json);
    output["moves"] = outcome
        .pass
        .as_ref()
        .map_or(serde_json::Value::Null, archive::moves_json);
    output["phases"] = phases_json(&outcome.summaries());
    output
}

/// Execute the run command
pub fn execute(
    cli: &Cli,
    pipeline: &Pipeline,
    run_date: NaiveDate,
    with_seed: bool,
    interrupt: &Interrupt,
) -> Result<()> {
    if with_seed {
        let created = seed::perform(pipeline)?;
        tracing::info!(files = created.len(), "sample input created");
    }

    let outcome = perform(pipeline, run_date, interrupt)?;
    let summaries = outcome.summaries();

    match cli.format {
        OutputFormat::Json => print_json(&outcome_json(&outcome))?,
        OutputFormat::Human => {
            combine::print_run_human(cli, &outcome.grouped, &outcome.run);
            if let Some(report) = &outcome.report {
                report::print_report_human(cli, report);
            }
            if let Some(pass) = &outcome.pass {
                archive::print_pass_human(cli, pass);
            }
            print_phase_summaries(cli, &summaries);
        }
    }

    check_summaries(&summaries)
}
