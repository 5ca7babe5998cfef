//! Error types for the exclusion-policy store.

use brewfile::{PackageIdError, PackageTypeError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading, saving, or mutating the ignore document.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading the ignore file failed
    #[error("failed to read ignore file {path}: {source}")]
    Read {
        /// Path of the document
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The ignore file is not valid YAML for the expected schema
    #[error("failed to parse ignore file {path}: {source}")]
    Parse {
        /// Path of the document
        path: PathBuf,
        /// Underlying YAML error
        source: serde_yaml::Error,
    },

    /// Writing the ignore file failed
    #[error("failed to write ignore file {path}: {source}")]
    Write {
        /// Path of the document
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Serializing the document to YAML failed
    #[error("failed to serialize ignore file: {0}")]
    Serialize(#[source] serde_yaml::Error),

    /// The home directory could not be determined
    #[error("could not determine home directory")]
    NoHomeDir,

    /// A category token passed to a mutator is not in the registry
    #[error(transparent)]
    Category(#[from] PackageTypeError),

    /// A package identifier passed to a mutator is malformed
    #[error(transparent)]
    PackageId(#[from] PackageIdError),
}

/// Result type for ignore-store operations.
pub type Result<T> = std::result::Result<T, Error>;
