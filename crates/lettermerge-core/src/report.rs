//! Run report derived from the output partition on disk
//!
//! The report never trusts in-memory consolidation state: identifiers are
//! re-derived from the combined file names present in the partition, so a
//! restart between consolidation and reporting still yields a correct report.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::config::PipelineConfig;
use crate::error::LetterError;
use crate::fs_ops::write_atomic;
use crate::layout::output_partition;
use crate::name::parse_document_name;
use crate::partition::REPORT_DATE_FORMAT;
use crate::summary::{Phase, PhaseSummary};

/// Naming of combined documents and of the report itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub combined_prefix: String,
    pub extension: String,
    pub report_name: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::from(&PipelineConfig::default())
    }
}

impl From<&PipelineConfig> for ReportOptions {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            combined_prefix: config.documents.combined_prefix.clone(),
            extension: config.documents.extension.clone(),
            report_name: config.documents.report_name.clone(),
        }
    }
}

impl ReportOptions {
    pub fn report_file_name(&self) -> String {
        format!("{}.{}", self.report_name, self.extension)
    }
}

/// What the report contains and where it was written
#[derive(Debug)]
pub struct ReportSummary {
    pub run_date: NaiveDate,
    pub path: PathBuf,
    /// Identifiers in on-disk lexicographic order of the combined files
    pub student_ids: Vec<String>,
    pub summary: PhaseSummary,
}

/// Render the report text.
pub fn render_report(run_date: NaiveDate, student_ids: &[String]) -> String {
    let mut text = format!(
        "Processing Date: {}\nTotal Combined Letters: {}\n",
        run_date.format(REPORT_DATE_FORMAT),
        student_ids.len()
    );
    for id in student_ids {
        text.push_str(id);
        text.push('\n');
    }
    text
}

/// Combined document file names in `partition`, sorted.
fn combined_file_names(partition: &Path, options: &ReportOptions) -> std::io::Result<Vec<String>> {
    let marker = format!("{}-", options.combined_prefix);
    let mut names = Vec::new();
    for entry in fs::read_dir(partition)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        let matches_extension = Path::new(&name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&options.extension));
        if name.starts_with(&marker) && matches_extension {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Write `<output_root>/<YYYYMMDD>/<report_name>.<ext>` for `run_date`.
///
/// Lists the run date, the number of combined documents in the partition
/// and the identifier of each. Malformed combined names are skipped with a
/// warning. Failures are recorded in the returned summary.
#[tracing::instrument(skip_all, fields(run_date = %run_date))]
pub fn report(output_root: &Path, run_date: NaiveDate, options: &ReportOptions) -> ReportSummary {
    let partition = output_partition(output_root, run_date);
    let path = partition.join(options.report_file_name());
    let mut result = ReportSummary {
        run_date,
        path: path.clone(),
        student_ids: Vec::new(),
        summary: PhaseSummary::new(Phase::Report),
    };

    if let Err(e) = fs::create_dir_all(&partition) {
        result
            .summary
            .failures
            .push(LetterError::io_operation("create", partition.display(), e));
        return result;
    }

    let names = match combined_file_names(&partition, options) {
        Ok(names) => names,
        Err(e) => {
            result
                .summary
                .failures
                .push(LetterError::io_operation("read", partition.display(), e));
            return result;
        }
    };

    for name in names {
        match parse_document_name(&name) {
            Ok(parsed) if parsed.prefix == options.combined_prefix => {
                result.student_ids.push(parsed.student_id.to_string());
            }
            Ok(_) => {}
            Err(e) => {
                let err = LetterError::malformed(partition.join(&name), e.to_string());
                tracing::warn!(error = %err, "skipping combined file");
                result.summary.warnings.push(err);
            }
        }
    }

    let text = render_report(run_date, &result.student_ids);
    match write_atomic(&path, [text.as_bytes()]) {
        Ok(()) => {
            result.summary.succeeded = 1;
            tracing::info!(
                path = %path.display(),
                total = result.student_ids.len(),
                "report written"
            );
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to write report");
            result
                .summary
                .failures
                .push(LetterError::io_operation("write", path.display(), e));
        }
    }

    result
}
