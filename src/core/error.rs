// Error handling for navigation file readers

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, NavError>;

#[derive(Error, Debug)]
pub enum NavError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Filename {path:?} does not match _YYMMDD_NNNN.ext: {reason}")]
    InvalidFilenameConvention { path: PathBuf, reason: String },

    #[error("Cannot open {path:?}: {source}")]
    FileUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("End of file reading record {index}")]
    EndOfFile { index: u64 },

    #[error("Invalid record index {0}: records are numbered from 1")]
    InvalidRecordIndex(u64),

    #[error("File holds {count} whole record(s), at least 2 are needed")]
    InsufficientRecords { count: u64 },

    #[error("Field count mismatch: expected {expected}, got {got}")]
    FieldCount { expected: usize, got: usize },

    #[error("Timestamp {timestamp} outside file domain [{start}, {end}]")]
    TimestampOutOfDomain { timestamp: i64, start: i64, end: i64 },

    #[error("Dropout at {timestamp}: nearest record is at {nearest}")]
    DropoutNoInterpolation { timestamp: i64, nearest: i64 },

    #[error("Internal consistency failure: {0}")]
    InternalConsistency(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
