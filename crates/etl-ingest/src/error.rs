//! Error types for column ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading source files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file too large: {path} ({size} bytes, max {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === CSV Errors ===
    /// Failed to parse CSV.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Requested column is not in the header row.
    #[error("column '{column}' not found in {path}")]
    ColumnNotFound { column: String, path: PathBuf },

    // === Request Errors ===
    /// Request file is not a valid timeline request.
    #[error("invalid request {path}: {source}")]
    InvalidRequest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/file.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /path/to/file.csv");

        let err = IngestError::ColumnNotFound {
            column: "VISITDT".to_string(),
            path: PathBuf::from("visits.csv"),
        };
        assert_eq!(err.to_string(), "column 'VISITDT' not found in visits.csv");
    }
}
