//! `lettermerge report` command - summarize a run's output partition

use chrono::NaiveDate;

use crate::cli::{Cli, OutputFormat};
use crate::commands::format::{check_summaries, phases_json, print_json, print_phase_summaries};
use crate::commands::Pipeline;
use lettermerge_core::error::Result;
use lettermerge_core::partition::partition_name;
use lettermerge_core::{report, ReportOptions, ReportSummary};

pub fn perform(pipeline: &Pipeline, run_date: NaiveDate) -> ReportSummary {
    report(
        pipeline.layout.output_root(),
        run_date,
        &ReportOptions::from(&pipeline.config),
    )
}

pub fn report_json(summary: &ReportSummary) -> serde_json::Value {
    serde_json::json!({
        "run_date": partition_name(summary.run_date),
        "path": summary.path.display().to_string(),
        "total": summary.student_ids.len(),
        "student_ids": summary.student_ids,
    })
}

pub fn print_report_human(cli: &Cli, summary: &ReportSummary) {
    if !cli.quiet && summary.summary.failures.is_empty() {
        println!(
            "Report written to {} ({} combined letters)",
            summary.path.display(),
            summary.student_ids.len()
        );
    }
}

/// Execute the report command
pub fn execute(cli: &Cli, pipeline: &Pipeline, run_date: NaiveDate) -> Result<()> {
    let summary = perform(pipeline, run_date);
    let summaries = [&summary.summary];

    match cli.format {
        OutputFormat::Json => {
            let mut output = report_json(&summary);
            output["phases"] = phases_json(&summaries);
            print_json(&output)?;
        }
        OutputFormat::Human => {
            print_report_human(cli, &summary);
            print_phase_summaries(cli, &summaries);
        }
    }

    check_summaries(&summaries)
}
