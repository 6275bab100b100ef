//! Merging of multi-document student groups into combined documents

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;

use crate::config::PipelineConfig;
use crate::discover::DocumentRecord;
use crate::error::LetterError;
use crate::fs_ops::write_atomic;
use crate::group::StudentGroups;
use crate::interrupt::Interrupt;
use crate::layout::output_partition;
use crate::name::format_document_name;
use crate::summary::{Phase, PhaseSummary};
use crate::trace_time;

/// Naming of combined documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidateOptions {
    pub combined_prefix: String,
    pub extension: String,
}

impl Default for ConsolidateOptions {
    fn default() -> Self {
        Self::from(&PipelineConfig::default())
    }
}

impl From<&PipelineConfig> for ConsolidateOptions {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            combined_prefix: config.documents.combined_prefix.clone(),
            extension: config.documents.extension.clone(),
        }
    }
}

impl ConsolidateOptions {
    /// File name of the combined document for a student
    pub fn combined_name(&self, student_id: &str) -> String {
        format_document_name(&self.combined_prefix, student_id, &self.extension)
    }
}

/// Outcome of one consolidation pass
#[derive(Debug)]
pub struct ConsolidationRun {
    pub run_date: NaiveDate,
    pub output_partition: PathBuf,
    /// Students whose combined document was written, in group order
    pub merged_ids: Vec<String>,
    pub summary: PhaseSummary,
}

/// Line written before each member so readers can tell sources apart
pub fn record_boundary(record: &DocumentRecord) -> String {
    format!(
        "===== {}/{}/{} =====\n",
        record.category,
        record.date_partition,
        record.file_name()
    )
}

/// Read every member of a group, in order. The first unreadable member
/// fails the whole student.
fn read_members(student_id: &str, members: &[DocumentRecord]) -> Result<Vec<Vec<u8>>, LetterError> {
    members
        .iter()
        .map(|record| {
            fs::read(&record.path).map_err(|e| LetterError::SourceReadFailure {
                student_id: student_id.to_string(),
                path: record.path.clone(),
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Assemble the combined document body.
fn render(members: &[DocumentRecord], contents: &[Vec<u8>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (record, content) in members.iter().zip(contents) {
        body.extend_from_slice(record_boundary(record).as_bytes());
        body.extend_from_slice(content);
        if !content.ends_with(b"\n") {
            body.push(b'\n');
        }
    }
    body
}

fn merge_group(
    student_id: &str,
    members: &[DocumentRecord],
    target: &Path,
) -> Result<(), LetterError> {
    let contents = read_members(student_id, members)?;
    let body = render(members, &contents);
    write_atomic(target, [body.as_slice()]).map_err(|e| LetterError::OutputWriteFailure {
        student_id: student_id.to_string(),
        path: target.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Write one combined document per group of two or more documents into
/// `<output_root>/<YYYYMMDD>` for `run_date`.
///
/// Single-document groups are left alone. A student whose sources cannot be
/// read or whose output cannot be written is recorded as a failure and the
/// remaining students continue. Reruns on the same day overwrite that day's
/// combined documents.
#[tracing::instrument(skip_all, fields(run_date = %run_date, students = groups.len()))]
pub fn consolidate(
    groups: &StudentGroups,
    output_root: &Path,
    run_date: NaiveDate,
    options: &ConsolidateOptions,
    interrupt: &Interrupt,
) -> ConsolidationRun {
    let start = Instant::now();
    let partition = output_partition(output_root, run_date);
    let mut run = ConsolidationRun {
        run_date,
        output_partition: partition.clone(),
        merged_ids: Vec::new(),
        summary: PhaseSummary::new(Phase::Consolidate),
    };

    if let Err(e) = fs::create_dir_all(&partition) {
        // Every write below fails and is recorded per student.
        tracing::error!(path = %partition.display(), error = %e, "failed to create output partition");
    }

    if groups.mergeable().next().is_none() {
        tracing::info!("no letters to combine");
    }

    for (student_id, members) in groups.mergeable() {
        if interrupt.is_raised() {
            tracing::warn!(merged = run.merged_ids.len(), "consolidation interrupted");
            run.summary.interrupted = true;
            break;
        }

        let target = partition.join(options.combined_name(student_id));
        match merge_group(student_id, members, &target) {
            Ok(()) => {
                tracing::info!(
                    student_id,
                    documents = members.len(),
                    path = %target.display(),
                    "combined letters"
                );
                run.merged_ids.push(student_id.to_string());
                run.summary.succeeded += 1;
            }
            Err(e) => {
                tracing::error!(student_id, error = %e, "failed to combine letters");
                run.summary.failures.push(e);
            }
        }
    }

    trace_time!(start, "consolidate", merged = run.merged_ids.len());
    run
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::group_documents;
    use tempfile::tempdir;

    fn write_doc(root: &Path, category: &str, partition: &str, file: &str, content: &str) -> DocumentRecord {
        let path = root.join(category).join(partition).join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        DocumentRecord {
            category: category.to_string(),
            date_partition: partition.to_string(),
            student_id: crate::name::extract_student_id(file).unwrap(),
            path,
        }
    }

    fn run_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()
    }

    #[test]
    fn test_merges_only_multi_document_groups() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("Input");
        let output = dir.path().join("Output");
        let groups = group_documents(vec![
            write_doc(&input, "Admission", "20230518", "admission-1.txt", "A\n"),
            write_doc(&input, "Scholarship", "20230518", "scholarship-1.txt", "B\n"),
            write_doc(&input, "Admission", "20230518", "admission-2.txt", "C\n"),
        ]);

        let run = consolidate(
            &groups,
            &output,
            run_date(),
            &ConsolidateOptions::default(),
            &Interrupt::new(),
        );

        assert_eq!(run.merged_ids, vec!["1"]);
        assert_eq!(run.output_partition, output.join("20230601"));
        assert!(run.summary.is_clean());

        let combined = fs::read_to_string(output.join("20230601/combined-1.txt")).unwrap();
        assert_eq!(
            combined,
            "===== Admission/20230518/admission-1.txt =====\nA\n\
             ===== Scholarship/20230518/scholarship-1.txt =====\nB\n"
        );
        assert!(!output.join("20230601/combined-2.txt").exists());
    }

    #[test]
    fn test_missing_trailing_newline_is_added() {
        let dir = tempdir().unwrap();
        let groups = group_documents(vec![
            write_doc(dir.path(), "A", "20230518", "a-9.txt", "first"),
            write_doc(dir.path(), "B", "20230518", "b-9.txt", ""),
        ]);

        let out = dir.path().join("Output");
        consolidate(&groups, &out, run_date(), &ConsolidateOptions::default(), &Interrupt::new());

        let combined = fs::read_to_string(out.join("20230601/combined-9.txt")).unwrap();
        assert_eq!(
            combined,
            "===== A/20230518/a-9.txt =====\nfirst\n===== B/20230518/b-9.txt =====\n\n"
        );
    }

    #[test]
    fn test_unreadable_source_skips_student() {
        let dir = tempdir().unwrap();
        let good_a = write_doc(dir.path(), "A", "20230518", "a-1.txt", "x");
        let good_b = write_doc(dir.path(), "B", "20230518", "b-1.txt", "y");
        let present = write_doc(dir.path(), "A", "20230518", "a-2.txt", "z");
        let mut missing = present.clone();
        missing.path = dir.path().join("B/20230518/b-2.txt");
        missing.category = "B".to_string();

        let groups = group_documents(vec![good_a, good_b, present, missing]);
        let out = dir.path().join("Output");
        let run = consolidate(&groups, &out, run_date(), &ConsolidateOptions::default(), &Interrupt::new());

        assert_eq!(run.merged_ids, vec!["1"]);
        assert_eq!(run.summary.failed(), 1);
        assert!(matches!(
            run.summary.failures[0],
            LetterError::SourceReadFailure { ref student_id, .. } if student_id == "2"
        ));
        assert!(!out.join("20230601/combined-2.txt").exists());
    }

    #[test]
    fn test_unwritable_output_skips_student() {
        let dir = tempdir().unwrap();
        let groups = group_documents(vec![
            write_doc(dir.path(), "A", "20230518", "a-1.txt", "x"),
            write_doc(dir.path(), "B", "20230518", "b-1.txt", "y"),
            write_doc(dir.path(), "A", "20230518", "a-2.txt", "z"),
            write_doc(dir.path(), "B", "20230518", "b-2.txt", "w"),
        ]);
        let out = dir.path().join("Output");
        let blocked = out.join("20230601/combined-1.txt");
        fs::create_dir_all(&blocked).unwrap();

        let run = consolidate(&groups, &out, run_date(), &ConsolidateOptions::default(), &Interrupt::new());

        assert_eq!(run.merged_ids, vec!["2"]);
        assert_eq!(run.summary.succeeded, 1);
        assert_eq!(run.summary.failed(), 1);
        match &run.summary.failures[0] {
            LetterError::OutputWriteFailure {
                student_id, path, ..
            } => {
                assert_eq!(student_id, "1");
                assert_eq!(path, &blocked);
            }
            other => panic!("unexpected failure: {other:?}"),
        }
        assert!(blocked.is_dir());
        assert!(!out.join("20230601/.combined-1.txt.tmp").exists());
        assert!(out.join("20230601/combined-2.txt").is_file());
    }

    #[test]
    fn test_interrupt_stops_before_next_student() {
        let dir = tempdir().unwrap();
        let groups = group_documents(vec![
            write_doc(dir.path(), "A", "20230518", "a-1.txt", "x"),
            write_doc(dir.path(), "B", "20230518", "b-1.txt", "y"),
        ]);
        let interrupt = Interrupt::new();
        interrupt.raise();

        let out = dir.path().join("Output");
        let run = consolidate(&groups, &out, run_date(), &ConsolidateOptions::default(), &interrupt);

        assert!(run.summary.interrupted);
        assert!(run.merged_ids.is_empty());
        assert!(!out.join("20230601/combined-1.txt").exists());
    }

    #[test]
    fn test_custom_naming() {
        let options = ConsolidateOptions {
            combined_prefix: "merged".to_string(),
            extension: "md".to_string(),
        };
        assert_eq!(options.combined_name("42"), "merged-42.md");
    }
}
