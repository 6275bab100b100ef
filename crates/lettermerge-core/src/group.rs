//! Grouping of discovered documents by student identifier

use std::collections::BTreeMap;
use std::path::Path;

use crate::discover::{discover, DocumentRecord};
use crate::error::{LetterError, Result};
use crate::summary::{Phase, PhaseSummary};

/// Documents bucketed by student identifier.
///
/// Within a bucket records keep discovery order. Buckets iterate in
/// ascending identifier order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentGroups {
    groups: BTreeMap<String, Vec<DocumentRecord>>,
}

impl StudentGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to its student's bucket. Duplicates are kept.
    pub fn push(&mut self, record: DocumentRecord) {
        self.groups
            .entry(record.student_id.clone())
            .or_default()
            .push(record);
    }

    pub fn get(&self, student_id: &str) -> Option<&[DocumentRecord]> {
        self.groups.get(student_id).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DocumentRecord])> {
        self.groups
            .iter()
            .map(|(id, records)| (id.as_str(), records.as_slice()))
    }

    /// Groups with at least two documents, i.e. those that get merged
    pub fn mergeable(&self) -> impl Iterator<Item = (&str, &[DocumentRecord])> {
        self.iter().filter(|(_, records)| records.len() >= 2)
    }

    /// Number of distinct students
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of documents across all groups
    pub fn document_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

impl FromIterator<DocumentRecord> for StudentGroups {
    fn from_iter<I: IntoIterator<Item = DocumentRecord>>(iter: I) -> Self {
        let mut groups = StudentGroups::new();
        for record in iter {
            groups.push(record);
        }
        groups
    }
}

/// Bucket records by student identifier in a single pass.
pub fn group_documents<I>(records: I) -> StudentGroups
where
    I: IntoIterator<Item = DocumentRecord>,
{
    records.into_iter().collect()
}

/// Groups together with the discovery summary
#[derive(Debug)]
pub struct GroupedDocuments {
    pub groups: StudentGroups,
    /// Discovered documents count as succeeded; skipped files are warnings
    pub summary: PhaseSummary,
}

impl GroupedDocuments {
    /// Recoverable discovery problems (malformed names, unreadable dirs)
    pub fn skipped(&self) -> &[LetterError] {
        &self.summary.warnings
    }
}

/// Discover the input tree and group its documents.
///
/// Fails only when the input root is missing. Malformed file names are
/// logged, recorded as warnings and left out of every group.
#[tracing::instrument(skip_all, fields(input_root = %input_root.display()))]
pub fn discover_and_group(input_root: &Path, extension: &str) -> Result<GroupedDocuments> {
    let mut groups = StudentGroups::new();
    let mut summary = PhaseSummary::new(Phase::Discover);

    for item in discover(input_root, extension)? {
        match item {
            Ok(record) => {
                tracing::debug!(
                    student_id = %record.student_id,
                    path = %record.path.display(),
                    "discovered document"
                );
                groups.push(record);
                summary.succeeded += 1;
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping document");
                summary.warnings.push(e);
            }
        }
    }

    tracing::info!(
        students = groups.len(),
        documents = groups.document_count(),
        skipped = summary.warnings.len(),
        "discovery complete"
    );

    Ok(GroupedDocuments { groups, summary })
}
