//! Error types for the ontology core

use thiserror::Error;

/// Result type for ontology operations
pub type Result<T> = std::result::Result<T, OntologyError>;

/// Ontology core errors
#[derive(Error, Debug)]
pub enum OntologyError {
    #[error("Class not found: {0}")]
    ClassNotFound(String),

    #[error("Property not found: {0}")]
    PropertyNotFound(String),

    #[error("Relation not found: {0}")]
    RelationNotFound(String),

    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Unknown use case: {0}")]
    UnknownUseCase(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] config_crate::ConfigError),
}
