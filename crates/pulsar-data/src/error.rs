//! Error types for catalog ingestion

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while reading a pulsar catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A row failed to decode; the row is skipped and ingestion continues
    #[error("malformed record at line {line}, column {column}: {reason}")]
    MalformedRecord {
        line: u64,
        column: usize,
        reason: String,
    },

    /// No row survived decoding
    #[error("catalog contains no usable rows")]
    EmptyCatalog,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn malformed(line: u64, column: usize, reason: impl Into<String>) -> Self {
        CatalogError::MalformedRecord {
            line,
            column,
            reason: reason.into(),
        }
    }

    pub fn is_malformed_record(&self) -> bool {
        matches!(self, CatalogError::MalformedRecord { .. })
    }
}
