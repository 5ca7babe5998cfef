//! Error types for manifest operations.
//!
//! Malformed manifest content is never an error: unparseable lines are
//! dropped by the parser. Only I/O failures propagate, carrying the
//! offending path. Identity-key parsing gets its own error type since those
//! strings come from user input (ignore commands), not from files.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur reading or writing manifest files.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading a manifest file failed
    #[error("failed to read manifest {path}: {source}")]
    Read {
        /// Path of the manifest that could not be read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Writing a manifest file failed
    #[error("failed to write manifest {path}: {source}")]
    Write {
        /// Path of the manifest that could not be written
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Result type for manifest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A category token that is not part of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown package category: {0}")]
pub struct PackageTypeError(pub String);

/// A package identifier string that does not parse as `category:name`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackageIdError {
    /// No `:` separator between category and name
    #[error("invalid package ID format: {0} (expected category:name)")]
    MissingSeparator(String),

    /// More than one `:` separator
    #[error("invalid package ID format: {0} (expected exactly one separator)")]
    ExtraSeparator(String),

    /// Category token not in the registry
    #[error("invalid package ID {id}: unknown category {category}")]
    UnknownCategory {
        /// The full identifier as given
        id: String,
        /// The unrecognized category token
        category: String,
    },

    /// Nothing after the separator
    #[error("invalid package ID format: {0} (empty name)")]
    EmptyName(String),
}
