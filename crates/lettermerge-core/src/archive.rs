//! Archiving of processed inputs
//!
//! Every file under `<input_root>/<category>/<partition>/` moves to
//! `<archive_root>/<partition>/`, whether or not it was merged or even
//! parsed. Existing archive files are overwritten, so rerunning after an
//! interrupted pass converges on the same end state.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use walkdir::WalkDir;

use crate::error::{LetterError, Result};
use crate::fs_ops::move_file;
use crate::interrupt::Interrupt;
use crate::summary::{Phase, PhaseSummary};
use crate::trace_time;

const PARTITION_DEPTH: usize = 2;
const FILE_DEPTH: usize = 3;

/// One file moved into the archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveMove {
    pub source_path: PathBuf,
    pub dest_path: PathBuf,
}

/// Outcome of one archive pass
#[derive(Debug)]
pub struct ArchivePass {
    /// Completed moves, in traversal order
    pub moves: Vec<ArchiveMove>,
    pub summary: PhaseSummary,
}

impl ArchivePass {
    fn move_one(&mut self, source_path: PathBuf, dest_path: PathBuf) {
        match move_file(&source_path, &dest_path) {
            Ok(()) => {
                tracing::info!(
                    source = %source_path.display(),
                    dest = %dest_path.display(),
                    "archived file"
                );
                self.moves.push(ArchiveMove {
                    source_path,
                    dest_path,
                });
                self.summary.succeeded += 1;
            }
            Err(e) => {
                let err = LetterError::ArchiveMoveFailure {
                    source_path,
                    dest_path,
                    reason: e.to_string(),
                };
                tracing::error!(error = %err, "failed to archive file");
                self.summary.failures.push(err);
            }
        }
    }
}

/// Tracks the partition being walked so empty ones can be reported.
struct OpenPartition {
    path: PathBuf,
    files: usize,
}

impl OpenPartition {
    fn close(self) {
        if self.files == 0 {
            tracing::info!(path = %self.path.display(), "no files to archive");
        }
    }
}

/// Move every input file into its archive partition.
///
/// Fails only when the input root is missing; a file that cannot be moved
/// is recorded as `ArchiveMoveFailure` and the pass continues.
#[tracing::instrument(skip_all, fields(input_root = %input_root.display()))]
pub fn archive(input_root: &Path, archive_root: &Path, interrupt: &Interrupt) -> Result<ArchivePass> {
    if !input_root.is_dir() {
        return Err(LetterError::InputRootMissing {
            path: input_root.to_path_buf(),
        });
    }

    let start = Instant::now();
    let mut pass = ArchivePass {
        moves: Vec::new(),
        summary: PhaseSummary::new(Phase::Archive),
    };
    let mut written: HashSet<PathBuf> = HashSet::new();
    let mut open: Option<OpenPartition> = None;

    // Sorting makes walkdir read each directory fully before yielding, so
    // moving files out while walking is safe.
    let walker = WalkDir::new(input_root)
        .min_depth(PARTITION_DEPTH)
        .max_depth(FILE_DEPTH)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| input_root.display().to_string());
                tracing::error!(path = %path, error = %e, "failed to read input directory");
                pass.summary
                    .failures
                    .push(LetterError::io_operation("read", path, e));
                continue;
            }
        };

        if entry.depth() == PARTITION_DEPTH {
            if !entry.file_type().is_dir() {
                tracing::debug!(path = %entry.path().display(), "ignoring file outside a partition");
                continue;
            }
            if let Some(previous) = open.take() {
                previous.close();
            }
            let partition = entry.file_name();
            let dest_dir = archive_root.join(partition);
            if let Err(e) = fs::create_dir_all(&dest_dir) {
                // Each move into this partition fails and is recorded.
                tracing::error!(path = %dest_dir.display(), error = %e, "failed to create archive partition");
            }
            open = Some(OpenPartition {
                path: entry.path().to_path_buf(),
                files: 0,
            });
            continue;
        }

        if !entry.file_type().is_file() {
            continue;
        }

        if interrupt.is_raised() {
            tracing::warn!(moved = pass.moves.len(), "archive interrupted");
            pass.summary.interrupted = true;
            break;
        }

        let source_path = entry.path().to_path_buf();
        let Some(partition) = source_path.parent().and_then(Path::file_name) else {
            continue;
        };
        let dest_path = archive_root.join(partition).join(entry.file_name());
        if let Some(current) = open.as_mut() {
            current.files += 1;
        }

        if !written.insert(dest_path.clone()) {
            tracing::warn!(
                source = %source_path.display(),
                dest = %dest_path.display(),
                "file name already archived from another category; overwriting"
            );
        }

        pass.move_one(source_path, dest_path);
    }

    if let Some(last) = open.take() {
        last.close();
    }

    trace_time!(start, "archive", moved = pass.moves.len());
    Ok(pass)
}
