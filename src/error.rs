//! Error types for the catalog boundary.
//!
//! The ranking engine itself never fails; these cover loading catalogs and
//! parsing field names supplied on the command line.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while provisioning a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("catalog must be a JSON array of records")]
    NotAnArray,

    #[error("catalog entry {index} is not an object")]
    NotAnObject { index: usize },

    #[error("unsupported catalog format '{0}': expected .json or .csv")]
    UnsupportedFormat(String),
}

/// Returned when a field, direction or platform name is not recognised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseFieldError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseFieldError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
