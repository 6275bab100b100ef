//! `lettermerge seed` command - create sample input letters

use std::fs;
use std::path::PathBuf;

use crate::cli::{Cli, OutputFormat};
use crate::commands::format::print_json;
use crate::commands::Pipeline;
use lettermerge_core::error::{LetterError, Result};
use lettermerge_core::name::format_document_name;

/// Date-partition the sample letters are filed under
pub const SAMPLE_PARTITION: &str = "20230518";

/// (category, prefix, letter kind, student id)
const SAMPLE_LETTERS: &[(&str, &str, &str, &str)] = &[
    ("Admission", "admission", "Admission", "12345678"),
    ("Admission", "admission", "Admission", "87654321"),
    ("Scholarship", "scholarship", "Scholarship", "12345678"),
    ("Scholarship", "scholarship", "Scholarship", "56781234"),
];

/// Write the sample letters, returning their paths
pub fn perform(pipeline: &Pipeline) -> Result<Vec<PathBuf>> {
    let mut created = Vec::with_capacity(SAMPLE_LETTERS.len());

    for (category, prefix, kind, student_id) in SAMPLE_LETTERS {
        let dir = pipeline.layout.input_partition(category, SAMPLE_PARTITION);
        fs::create_dir_all(&dir)
            .map_err(|e| LetterError::io_operation("create", dir.display(), e))?;

        let path = dir.join(format_document_name(prefix, student_id, pipeline.extension()));
        let content = format!("{} Letter for Student {}\n", kind, student_id);
        fs::write(&path, content)
            .map_err(|e| LetterError::io_operation("write", path.display(), e))?;

        tracing::debug!(path = %path.display(), "created sample letter");
        created.push(path);
    }

    Ok(created)
}

/// Execute the seed command
pub fn execute(cli: &Cli, pipeline: &Pipeline) -> Result<()> {
    let created = perform(pipeline)?;

    match cli.format {
        OutputFormat::Json => {
            let paths: Vec<String> = created.iter().map(|p| p.display().to_string()).collect();
            print_json(&serde_json::json!({
                "status": "ok",
                "created": paths,
            }))?;
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Sample input files created successfully.");
                if cli.verbose {
                    for path in &created {
                        println!("  {}", path.display());
                    }
                }
            }
        }
    }

    Ok(())
}
