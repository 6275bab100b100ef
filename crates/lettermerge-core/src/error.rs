//! Error types and exit codes for lettermerge
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (including phases that recorded per-item failures)
//! - 2: Usage error (bad flags/args, invalid configuration values)
//! - 3: Data error (missing input root)

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - missing input tree (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during lettermerge operations
///
/// Only `InputRootMissing` aborts a run. The per-item variants
/// (`MalformedFilename`, `SourceReadFailure`, `OutputWriteFailure`,
/// `ArchiveMoveFailure`) are collected by the phase that produced them.
#[derive(Error, Debug)]
pub enum LetterError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("input root not found: {path:?}")]
    InputRootMissing { path: PathBuf },

    // Recoverable per-item failures (exit code 1 when surfaced)
    #[error("malformed filename {path:?}: {reason}")]
    MalformedFilename { path: PathBuf, reason: String },

    #[error("failed to read {path:?} for student {student_id}: {reason}")]
    SourceReadFailure {
        student_id: String,
        path: PathBuf,
        reason: String,
    },

    #[error("failed to write {path:?} for student {student_id}: {reason}")]
    OutputWriteFailure {
        student_id: String,
        path: PathBuf,
        reason: String,
    },

    #[error("failed to move {source_path:?} to {dest_path:?}: {reason}")]
    ArchiveMoveFailure {
        source_path: PathBuf,
        dest_path: PathBuf,
        reason: String,
    },

    // Generic failures (exit code 1)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("interrupted during {phase}; rerun to resume")]
    Interrupted { phase: String },

    #[error("{0}")]
    Other(String),
}

impl LetterError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        LetterError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        LetterError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a malformed filename error
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        LetterError::MalformedFilename {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            LetterError::UsageError(_)
            | LetterError::InvalidValue { .. } => ExitCode::Usage,

            LetterError::InputRootMissing { .. } => ExitCode::Data,

            LetterError::MalformedFilename { .. }
            | LetterError::SourceReadFailure { .. }
            | LetterError::OutputWriteFailure { .. }
            | LetterError::ArchiveMoveFailure { .. }
            | LetterError::Json(_)
            | LetterError::Toml(_)
            | LetterError::FailedOperationWithTarget { .. }
            | LetterError::Interrupted { .. }
            | LetterError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            LetterError::UsageError(_) => "usage_error",
            LetterError::InvalidValue { .. } => "invalid_value",
            LetterError::InputRootMissing { .. } => "input_root_missing",
            LetterError::MalformedFilename { .. } => "malformed_filename",
            LetterError::SourceReadFailure { .. } => "source_read_failure",
            LetterError::OutputWriteFailure { .. } => "output_write_failure",
            LetterError::ArchiveMoveFailure { .. } => "archive_move_failure",
            LetterError::Json(_) => "json_error",
            LetterError::Toml(_) => "toml_error",
            LetterError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            LetterError::Interrupted { .. } => "interrupted",
            LetterError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured output.
    ///
    /// Per-item failures carry the path and identifier needed to remediate
    /// them by hand.
    pub fn to_json(&self) -> serde_json::Value {
        let mut error_obj = serde_json::json!({
            "code": self.exit_code() as i32,
            "type": self.error_type(),
            "message": self.to_string(),
        });

        match self {
            LetterError::InputRootMissing { path } | LetterError::MalformedFilename { path, .. } => {
                error_obj["path"] = serde_json::json!(path.display().to_string());
            }
            LetterError::SourceReadFailure {
                student_id, path, ..
            }
            | LetterError::OutputWriteFailure {
                student_id, path, ..
            } => {
                error_obj["student_id"] = serde_json::json!(student_id);
                error_obj["path"] = serde_json::json!(path.display().to_string());
            }
            LetterError::ArchiveMoveFailure {
                source_path,
                dest_path,
                ..
            } => {
                error_obj["source_path"] = serde_json::json!(source_path.display().to_string());
                error_obj["dest_path"] = serde_json::json!(dest_path.display().to_string());
            }
            _ => {}
        }

        serde_json::json!({ "error": error_obj })
    }
}

/// Result type alias for lettermerge operations
pub type Result<T> = std::result::Result<T, LetterError>;
