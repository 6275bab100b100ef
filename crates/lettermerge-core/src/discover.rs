//! Discovery of documents in the input tree
//!
//! The input tree is `<input_root>/<category>/<partition>/<file>`. Every
//! level is visited in lexicographic file-name order so that grouping and
//! output are identical across runs and platforms.

use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::error::{LetterError, Result};
use crate::name::parse_path;

/// Depth of document files below the input root
const DOCUMENT_DEPTH: usize = 3;

/// A document found in the input tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    pub category: String,
    pub date_partition: String,
    pub student_id: String,
    pub path: PathBuf,
}

impl DocumentRecord {
    /// File name of the backing document
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Lazy, sorted walk over the documents of an input tree.
///
/// Yields `Err(MalformedFilename)` for files with the document extension
/// whose names do not parse, and IO errors for unreadable directories; the
/// walk continues after either.
pub struct DocumentIter {
    root: PathBuf,
    walker: walkdir::IntoIter,
    extension: String,
}

/// Start discovery under `input_root`, considering files with `extension`.
pub fn discover(input_root: &Path, extension: &str) -> Result<DocumentIter> {
    if !input_root.is_dir() {
        return Err(LetterError::InputRootMissing {
            path: input_root.to_path_buf(),
        });
    }

    let walker = WalkDir::new(input_root)
        .min_depth(DOCUMENT_DEPTH)
        .max_depth(DOCUMENT_DEPTH)
        .sort_by_file_name()
        .into_iter();

    Ok(DocumentIter {
        root: input_root.to_path_buf(),
        walker,
        extension: extension.to_string(),
    })
}

impl DocumentIter {
    fn has_document_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&self.extension))
    }

    fn record_for(&self, path: &Path) -> Result<DocumentRecord> {
        let name = parse_path(path)?;

        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let mut components = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned());
        let category = components.next().unwrap_or_default();
        let date_partition = components.next().unwrap_or_default();

        Ok(DocumentRecord {
            category,
            date_partition,
            student_id: name.student_id.to_string(),
            path: path.to_path_buf(),
        })
    }
}

impl Iterator for DocumentIter {
    type Item = Result<DocumentRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| self.root.display().to_string());
                    tracing::warn!(path = %path, error = %e, "failed to read input directory");
                    return Some(Err(LetterError::io_operation("read", path, e)));
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !self.has_document_extension(path) {
                tracing::debug!(path = %path.display(), "ignoring non-document file");
                continue;
            }

            return Some(self.record_for(path));
        }
    }
}
