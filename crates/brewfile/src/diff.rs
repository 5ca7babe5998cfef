//! Diff computation between two manifest record sets.
//!
//! `diff(source, current)` classifies every record by identity key into
//! additions (install to catch up to `source`), removals (present locally
//! but not in `source`), and common (present in both). The pure filters on
//! [`DiffResult`] are how exclusion policy and machine pins are applied: they
//! only ever remove additions/removals, never touch `common`, and compose in
//! any order.

use crate::types::{PackageId, PackageType, Packages};
use std::collections::{BTreeMap, HashSet};

/// Classified differences between a source and a current record set.
///
/// Ephemeral: computed fresh per comparison, never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffResult {
    /// Records in source but not in current
    pub additions: Packages,
    /// Records in current but not in source
    pub removals: Packages,
    /// Records in both (source's copy retained)
    pub common: Packages,
}

impl DiffResult {
    /// Whether the two sets agree. Common records alone are not a
    /// difference.
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    /// Additions grouped by category, in canonical category order.
    pub fn additions_by_type(&self) -> BTreeMap<PackageType, Vec<&crate::types::Package>> {
        self.additions.by_type()
    }

    /// Removals grouped by category, in canonical category order.
    pub fn removals_by_type(&self) -> BTreeMap<PackageType, Vec<&crate::types::Package>> {
        self.removals.by_type()
    }

    /// Copy of this diff with every addition/removal whose key is in
    /// `ignored` dropped.
    ///
    /// `common` is untouched: ignoring a package never un-installs it, it
    /// only suppresses install/removal action.
    pub fn filter_ignored(&self, ignored: &HashSet<PackageId>) -> DiffResult {
        DiffResult {
            additions: self.additions.without(ignored),
            removals: self.removals.without(ignored),
            common: self.common.clone(),
        }
    }

    /// Copy of this diff with every addition/removal whose key is in
    /// `pinned` dropped.
    ///
    /// Pinned keys are packages that belong exclusively to one machine; a
    /// sync must neither propose installing them elsewhere nor removing them
    /// locally. Same mechanics as [`filter_ignored`](Self::filter_ignored),
    /// so the two filters compose in either order.
    pub fn filter_machine_specific(&self, pinned: &HashSet<PackageId>) -> DiffResult {
        DiffResult {
            additions: self.additions.without(pinned),
            removals: self.removals.without(pinned),
            common: self.common.clone(),
        }
    }

    /// Human-readable one-line summary, e.g. "2 additions, 1 removal".
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return "no differences".to_string();
        }

        let mut parts = Vec::new();
        if !self.additions.is_empty() {
            parts.push(format_count(self.additions.len(), "addition"));
        }
        if !self.removals.is_empty() {
            parts.push(format_count(self.removals.len(), "removal"));
        }
        parts.join(", ")
    }
}

fn format_count(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Compute the differences between two record sets.
///
/// `source` is the state to reach (another machine's manifest); `current` is
/// the state already present. Identity is strictly `(category, name)`, so
/// `brew:python` and `cask:python` are unrelated entities and a name match
/// across categories still yields one addition and one removal.
pub fn diff(source: &Packages, current: &Packages) -> DiffResult {
    let current_keys = current.ids();
    let source_keys = source.ids();

    let mut result = DiffResult::default();

    for package in source {
        if current_keys.contains(&package.id()) {
            result.common.insert(package.clone());
        } else {
            result.additions.insert(package.clone());
        }
    }

    for package in current {
        if !source_keys.contains(&package.id()) {
            result.removals.insert(package.clone());
        }
    }

    result
}

/// Compute a diff restricted to the given categories.
///
/// Both inputs are filtered before diffing, so counts and membership reflect
/// only the selected categories. An empty category list applies no filter.
pub fn diff_by_type(source: &Packages, current: &Packages, types: &[PackageType]) -> DiffResult {
    diff(&source.filter(types), &current.filter(types))
}
