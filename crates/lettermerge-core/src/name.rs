//! Document file names: `<prefix>-<studentId>.<ext>`
//!
//! The name carries exactly one `-` (prefix / identifier) and exactly one
//! `.` (identifier / extension), in that order, with all three parts
//! non-empty. The identifier therefore never contains `-` or `.`.

use std::path::Path;

use thiserror::Error;

use crate::error::{LetterError, Result};

/// Why a file name does not follow the document naming scheme
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("expected exactly one '-', found {0}")]
    DashCount(usize),

    #[error("expected exactly one '.', found {0}")]
    DotCount(usize),

    #[error("extension separator '.' precedes the '-'")]
    DotBeforeDash,

    #[error("empty prefix")]
    EmptyPrefix,

    #[error("empty student identifier")]
    EmptyStudentId,

    #[error("empty extension")]
    EmptyExtension,

    #[error("file name is not valid UTF-8")]
    NotUtf8,
}

/// The three parts of a conforming document file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentName<'a> {
    pub prefix: &'a str,
    pub student_id: &'a str,
    pub extension: &'a str,
}

/// Split a file name into prefix, student identifier and extension.
pub fn parse_document_name(file_name: &str) -> std::result::Result<DocumentName<'_>, NameError> {
    let dashes = file_name.matches('-').count();
    if dashes != 1 {
        return Err(NameError::DashCount(dashes));
    }
    let dots = file_name.matches('.').count();
    if dots != 1 {
        return Err(NameError::DotCount(dots));
    }

    let (prefix, rest) = file_name
        .split_once('-')
        .ok_or(NameError::DashCount(0))?;
    let (student_id, extension) = rest.split_once('.').ok_or(NameError::DotBeforeDash)?;

    if prefix.is_empty() {
        return Err(NameError::EmptyPrefix);
    }
    if student_id.is_empty() {
        return Err(NameError::EmptyStudentId);
    }
    if extension.is_empty() {
        return Err(NameError::EmptyExtension);
    }

    Ok(DocumentName {
        prefix,
        student_id,
        extension,
    })
}

/// Parse the file name component of `path`, mapping failures to
/// `MalformedFilename` with the full path attached.
pub fn parse_path(path: &Path) -> Result<DocumentName<'_>> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LetterError::malformed(path, NameError::NotUtf8.to_string()))?;
    parse_document_name(file_name).map_err(|e| LetterError::malformed(path, e.to_string()))
}

/// Extract the student identifier from a document file name.
pub fn extract_student_id(file_name: &str) -> Result<String> {
    parse_document_name(file_name)
        .map(|name| name.student_id.to_string())
        .map_err(|e| LetterError::malformed(file_name, e.to_string()))
}

/// Build a document file name; the inverse of [`parse_document_name`].
pub fn format_document_name(prefix: &str, student_id: &str, extension: &str) -> String {
    format!("{}-{}.{}", prefix, student_id, extension)
}
