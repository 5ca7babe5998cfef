//! # stoplist
//!
//! Exclusion policy for manifest syncing: which categories and packages to
//! leave alone per machine, plus machine-pinned packages.
//!
//! The persisted ignore document has a global scope and per-machine scopes,
//! merged additively. Its effective key sets feed the pure diff filters in
//! the `brewfile` crate:
//!
//! ```no_run
//! use brewfile::{diff, parser};
//! use stoplist::IgnoreStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = IgnoreStore::default_location()?;
//! let ignore = store.load()?;
//!
//! let source = parser::parse_file("machines/studio/Brewfile".as_ref())?;
//! let current = parser::parse_file("machines/mini/Brewfile".as_ref())?;
//!
//! let result = diff::diff(&source, &current)
//!     .filter_ignored(&ignore.ignored_packages("mini"))
//!     .filter_machine_specific(&ignore.all_pins());
//! println!("{}", result.summary());
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

pub mod error;
pub mod file;
pub mod paths;
pub mod scope;
pub mod store;

pub use error::{Error, Result};
pub use file::{IgnoreFile, RedundantIgnore};
pub use scope::{IgnoreScope, PinList};
pub use store::IgnoreStore;
