use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while loading a new catalog snapshot from a source.
///
/// None of these are fatal to the service: the refresh task logs them and the
/// previously installed snapshot keeps serving requests.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO operation '{operation}' failed on path '{path}': {source}")]
    IoOperation {
        operation: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid catalog file at '{path}': {source}")]
    InvalidCatalogFile {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Duplicate extension id '{0}' in catalog source")]
    DuplicateExtension(String),
}
