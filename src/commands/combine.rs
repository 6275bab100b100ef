//! `lettermerge combine` command - discover, group and merge letters

use chrono::NaiveDate;

use crate::cli::{Cli, OutputFormat};
use crate::commands::format::{check_summaries, phases_json, print_json, print_phase_summaries};
use crate::commands::Pipeline;
use lettermerge_core::error::Result;
use lettermerge_core::partition::partition_name;
use lettermerge_core::{
    consolidate, discover_and_group, ConsolidateOptions, ConsolidationRun, GroupedDocuments,
    Interrupt,
};

/// Discover and consolidate without printing
pub fn perform(
    pipeline: &Pipeline,
    run_date: NaiveDate,
    interrupt: &Interrupt,
) -> Result<(GroupedDocuments, ConsolidationRun)> {
    let grouped = discover_and_group(pipeline.layout.input_root(), pipeline.extension())?;
    let run = consolidate(
        &grouped.groups,
        pipeline.layout.output_root(),
        run_date,
        &ConsolidateOptions::from(&pipeline.config),
        interrupt,
    );
    Ok((grouped, run))
}

/// JSON fields describing a consolidation
pub fn run_json(run: &ConsolidationRun) -> serde_json::Value {
    serde_json::json!({
        "run_date": partition_name(run.run_date),
        "output_partition": run.output_partition.display().to_string(),
        "merged_ids": run.merged_ids,
    })
}

/// Human lines describing a consolidation
pub fn print_run_human(cli: &Cli, grouped: &GroupedDocuments, run: &ConsolidationRun) {
    if cli.quiet {
        return;
    }
    println!(
        "Found {} letters for {} students",
        grouped.groups.document_count(),
        grouped.groups.len()
    );
    if run.merged_ids.is_empty() {
        println!("No letters to combine.");
    } else {
        println!(
            "Combined letters for {} student(s) into {}",
            run.merged_ids.len(),
            run.output_partition.display()
        );
        for id in &run.merged_ids {
            println!("  {}", id);
        }
    }
}

/// Execute the combine command
pub fn execute(
    cli: &Cli,
    pipeline: &Pipeline,
    run_date: NaiveDate,
    interrupt: &Interrupt,
) -> Result<()> {
    let (grouped, run) = perform(pipeline, run_date, interrupt)?;
    let summaries = [&grouped.summary, &run.summary];

    match cli.format {
        OutputFormat::Json => {
            let mut output = run_json(&run);
            output["phases"] = phases_json(&summaries);
            print_json(&output)?;
        }
        OutputFormat::Human => {
            print_run_human(cli, &grouped, &run);
            print_phase_summaries(cli, &summaries);
        }
    }

    check_summaries(&summaries)
}
