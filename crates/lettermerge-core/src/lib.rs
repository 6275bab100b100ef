//! Lettermerge Core Library
//!
//! Discovers per-student letters in a dated, categorized input tree, merges
//! them into one document per student, writes a run report and moves the
//! processed inputs into the archive tree.

pub mod archive;
pub mod config;
pub mod consolidate;
pub mod discover;
pub mod error;
mod fs_ops;
pub mod group;
pub mod interrupt;
pub mod layout;
pub mod logging;
pub mod name;
pub mod partition;
pub mod report;
pub mod summary;

pub use archive::{archive, ArchiveMove, ArchivePass};
pub use config::PipelineConfig;
pub use consolidate::{consolidate, ConsolidateOptions, ConsolidationRun};
pub use discover::{discover, DocumentIter, DocumentRecord};
pub use error::{LetterError, Result};
pub use group::{discover_and_group, group_documents, GroupedDocuments, StudentGroups};
pub use interrupt::Interrupt;
pub use layout::Layout;
pub use report::{report, ReportOptions, ReportSummary};
pub use summary::{Phase, PhaseSummary};
