//! `lettermerge archive` command - move processed inputs into the archive

use crate::cli::{Cli, OutputFormat};
use crate::commands::format::{check_summaries, phases_json, print_json, print_phase_summaries};
use crate::commands::Pipeline;
use lettermerge_core::error::Result;
use lettermerge_core::{archive, ArchivePass, Interrupt};

pub fn perform(pipeline: &Pipeline, interrupt: &Interrupt) -> Result<ArchivePass> {
    archive(
        pipeline.layout.input_root(),
        pipeline.layout.archive_root(),
        interrupt,
    )
}

pub fn moves_json(pass: &ArchivePass) -> serde_json::Value {
    serde_json::json!(pass.moves)
}

pub fn print_pass_human(cli: &Cli, pass: &ArchivePass) {
    if cli.quiet {
        return;
    }
    if cli.verbose {
        for m in &pass.moves {
            println!(
                "Archived {} -> {}",
                m.source_path.display(),
                m.dest_path.display()
            );
        }
    }
    println!("Archived {} files", pass.moves.len());
}

/// Execute the archive command
pub fn execute(cli: &Cli, pipeline: &Pipeline, interrupt: &Interrupt) -> Result<()> {
    let pass = perform(pipeline, interrupt)?;
    let summaries = [&pass.summary];

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "moves": moves_json(&pass),
                "phases": phases_json(&summaries),
            });
            print_json(&output)?;
        }
        OutputFormat::Human => {
            print_pass_human(cli, &pass);
            print_phase_summaries(cli, &summaries);
        }
    }

    check_summaries(&summaries)
}
