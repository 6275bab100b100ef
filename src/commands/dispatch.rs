//! Command dispatch logic for lettermerge
use std::time::Instant;

use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::commands::{self, Pipeline};
use lettermerge_core::error::Result;
use lettermerge_core::partition::today;
use lettermerge_core::Interrupt;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let Some(command) = &cli.command else {
        return handle_no_command();
    };

    let pipeline = Pipeline::open(cli)?;
    if cli.verbose {
        debug!(elapsed = ?start.elapsed(), root = %pipeline.layout.root().display(), "load_config");
    }

    let result = match command {
        Commands::Seed => commands::seed::execute(cli, &pipeline),

        Commands::Combine { date } => {
            let interrupt = Interrupt::install_ctrlc();
            commands::combine::execute(cli, &pipeline, date.unwrap_or_else(today), &interrupt)
        }

        Commands::Report { date } => {
            commands::report::execute(cli, &pipeline, date.unwrap_or_else(today))
        }

        Commands::Archive => {
            let interrupt = Interrupt::install_ctrlc();
            commands::archive::execute(cli, &pipeline, &interrupt)
        }

        Commands::Run { date, seed } => {
            let interrupt = Interrupt::install_ctrlc();
            commands::run::execute(cli, &pipeline, date.unwrap_or_else(today), *seed, &interrupt)
        }
    };

    if cli.verbose {
        debug!(elapsed = ?start.elapsed(), "execute_command");
    }
    result
}

fn handle_no_command() -> Result<()> {
    println!("lettermerge - merge per-student letters");
    println!();
    println!("Run `lettermerge --help` for usage information.");
    Ok(())
}
