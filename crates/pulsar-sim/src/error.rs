//! Error types for bodies and population building

use pulsar_data::CatalogError;
use thiserror::Error;

/// Result type for body lifecycle operations
pub type BodyResult<T> = Result<T, BodyError>;

/// Result type for population operations
pub type PopulationResult<T> = Result<T, PopulationError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BodyError {
    #[error("body '{0}' was already created")]
    AlreadyCreated(String),
}

#[derive(Error, Debug)]
pub enum PopulationError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Body error: {0}")]
    Body(#[from] BodyError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
