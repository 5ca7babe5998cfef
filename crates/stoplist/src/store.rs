//! Load/save of the ignore document, plus one-call mutation operations.
//!
//! The store is an explicit value threaded by the caller; there is no
//! process-wide singleton. Concurrent read-modify-write mutation calls are
//! last-writer-wins with no file lock, which is the accepted policy for a
//! single-user, single-process tool.

use crate::error::{Error, Result};
use crate::file::IgnoreFile;
use crate::paths;
use brewfile::{PackageId, PackageType};
use std::path::{Path, PathBuf};

/// Handle on the persisted ignore document.
#[derive(Debug, Clone)]
pub struct IgnoreStore {
    path: PathBuf,
}

impl IgnoreStore {
    /// Create a store against an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store against the default location
    /// (`<config-dir>/ignore.yaml`).
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(paths::ignore_file_path()?))
    }

    /// Path of the underlying document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document. A missing file is an empty document, not an
    /// error.
    pub fn load(&self) -> Result<IgnoreFile> {
        if !self.path.exists() {
            log::debug!("Ignore file does not exist, using empty document");
            return Ok(IgnoreFile::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|source| Error::Read {
            path: self.path.clone(),
            source,
        })?;

        let file = serde_yaml::from_str(&content).map_err(|source| Error::Parse {
            path: self.path.clone(),
            source,
        })?;

        log::debug!("Loaded ignore file from {}", self.path.display());
        Ok(file)
    }

    /// Save the document, creating parent directories as needed.
    pub fn save(&self, file: &IgnoreFile) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| Error::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        let content = serde_yaml::to_string(file).map_err(Error::Serialize)?;
        std::fs::write(&self.path, content).map_err(|source| Error::Write {
            path: self.path.clone(),
            source,
        })?;

        log::debug!("Saved ignore file to {}", self.path.display());
        Ok(())
    }

    // =========================================================================
    // One-call mutations
    //
    // Load, mutate, save. Returns whether the document changed; a no-op
    // mutation skips the save.
    // =========================================================================

    /// Add a category ignore. The category token must be in the registry.
    pub fn add_category_ignore(&self, machine: Option<&str>, category: &str) -> Result<bool> {
        let category: PackageType = category.parse()?;
        self.mutate(|file| file.add_category_ignore(machine, category))
    }

    /// Remove a category ignore. Removing an absent entry is a no-op.
    pub fn remove_category_ignore(&self, machine: Option<&str>, category: &str) -> Result<bool> {
        let category: PackageType = category.parse()?;
        self.mutate(|file| file.remove_category_ignore(machine, category))
    }

    /// Add a package ignore. `id` must be a `category:name` identifier.
    pub fn add_package_ignore(&self, machine: Option<&str>, id: &str) -> Result<bool> {
        let id: PackageId = id.parse()?;
        self.mutate(|file| file.add_package_ignore(machine, &id))
    }

    /// Remove a package ignore. Removing an absent entry is a no-op.
    pub fn remove_package_ignore(&self, machine: Option<&str>, id: &str) -> Result<bool> {
        let id: PackageId = id.parse()?;
        self.mutate(|file| file.remove_package_ignore(machine, &id))
    }

    /// Drop every ignore entry at one scope.
    pub fn clear(&self, machine: Option<&str>) -> Result<bool> {
        self.mutate(|file| file.clear(machine))
    }

    fn mutate(&self, op: impl FnOnce(&mut IgnoreFile) -> bool) -> Result<bool> {
        let mut file = self.load()?;
        let changed = op(&mut file);
        if changed {
            self.save(&file)?;
        }
        Ok(changed)
    }
}
