//! Error types for matrix resolution, manifest reading and catalog loading

use std::path::PathBuf;
use thiserror::Error;

/// Failure of the resolution engine itself
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// Nothing was left after filtering, canonicalizing and matching
    #[error("no valid versions")]
    NoValidVersions,
}

pub type Result<T> = std::result::Result<T, MatrixError>;

/// Errors reading the PHP requirement out of a composer.json
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors loading the release catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to read release catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse release catalog: {0}")]
    JsonParse(#[from] serde_json::Error),
}
