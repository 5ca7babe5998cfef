//! # brewfile
//!
//! Pure library for declarative package manifests.
//!
//! This crate provides functionality for:
//! - Parsing Brewfile-style manifests into typed record sets
//! - Writing record sets back out as deterministic manifest text
//! - Diffing two record sets into additions, removals, and common records
//! - Filtering a diff against ignore and machine-pin key sets
//!
//! The crate never talks to package managers and never enumerates live
//! system state; callers supply record sets (from manifests or from their
//! own enumeration) and consume the pure results.
//!
//! ## Example
//!
//! ```
//! use brewfile::{diff, parser};
//!
//! let source = parser::parse_string("brew \"git\"\nbrew \"fzf\"\ncask \"raycast\"");
//! let current = parser::parse_string("brew \"git\"\nbrew \"bat\"");
//!
//! let result = diff::diff(&source, &current);
//! assert_eq!(result.additions.len(), 2);
//! assert_eq!(result.removals.len(), 1);
//! assert_eq!(result.common.len(), 1);
//! ```
//!
//! ## Round-trip
//!
//! Formatting a set and reparsing the text preserves identity keys, options,
//! and descriptions:
//!
//! ```
//! use brewfile::{parser, writer, Package, Packages};
//!
//! let set: Packages = vec![
//!     Package::brew("fd").with_description("Fast file search"),
//!     Package::mas("Xcode", "497799835"),
//! ]
//! .into();
//!
//! let reparsed = parser::parse_string(&writer::format(&set));
//! assert_eq!(reparsed.ids(), set.ids());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod diff;
pub mod error;
pub mod parser;
pub mod types;
pub mod writer;

pub use diff::DiffResult;
pub use error::{Error, PackageIdError, PackageTypeError, Result};
pub use types::{Package, PackageId, PackageType, Packages};
