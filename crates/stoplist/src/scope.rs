//! One level of exclusion configuration.
//!
//! A scope is either the global section of the ignore document or one
//! machine's section; both hold fully ignored categories plus per-category
//! name sets. Ordered collections keep saved documents deterministic and
//! make add/remove idempotence fall out of set semantics.

use brewfile::{PackageId, PackageType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Per-machine pinned packages: category → set of names.
pub type PinList = BTreeMap<PackageType, BTreeSet<String>>;

/// Category- and package-level ignores at one scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreScope {
    /// Categories excluded wholesale
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub categories: BTreeSet<PackageType>,

    /// Individually excluded package names, keyed by category.
    ///
    /// Entries whose category is also in `categories` are redundant but are
    /// kept as written; [`IgnoreFile`](crate::IgnoreFile) reports them via
    /// its diagnostic instead of pruning user data.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub packages: BTreeMap<PackageType, BTreeSet<String>>,
}

impl IgnoreScope {
    /// Whether this scope holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.packages.is_empty()
    }

    /// Add a category ignore. Returns false if it was already present.
    pub fn add_category(&mut self, category: PackageType) -> bool {
        self.categories.insert(category)
    }

    /// Remove a category ignore. Returns false if it was not present.
    pub fn remove_category(&mut self, category: PackageType) -> bool {
        self.categories.remove(&category)
    }

    /// Whether a category is ignored at this scope.
    pub fn has_category(&self, category: PackageType) -> bool {
        self.categories.contains(&category)
    }

    /// Add a package ignore. Returns false if it was already present.
    pub fn add_package(&mut self, id: &PackageId) -> bool {
        self.packages
            .entry(id.package_type)
            .or_default()
            .insert(id.name.clone())
    }

    /// Remove a package ignore, pruning its category's set when it empties.
    /// Returns false if the entry was not present.
    pub fn remove_package(&mut self, id: &PackageId) -> bool {
        let Some(names) = self.packages.get_mut(&id.package_type) else {
            return false;
        };
        let removed = names.remove(&id.name);
        if names.is_empty() {
            self.packages.remove(&id.package_type);
        }
        removed
    }

    /// Whether a package is ignored at this scope (package-level only).
    pub fn has_package(&self, id: &PackageId) -> bool {
        self.packages
            .get(&id.package_type)
            .is_some_and(|names| names.contains(&id.name))
    }

    /// All package-level entries at this scope as identity keys.
    pub fn package_ids(&self) -> HashSet<PackageId> {
        self.packages
            .iter()
            .flat_map(|(package_type, names)| {
                names.iter().map(|name| PackageId::new(*package_type, name.clone()))
            })
            .collect()
    }
}

/// Expand a pin list to identity keys.
pub(crate) fn pin_ids(pins: &PinList) -> impl Iterator<Item = PackageId> + '_ {
    pins.iter().flat_map(|(package_type, names)| {
        names.iter().map(|name| PackageId::new(*package_type, name.clone()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> PackageId {
        s.parse().unwrap()
    }

    #[test]
    fn test_category_add_remove_idempotent() {
        let mut scope = IgnoreScope::default();
        assert!(scope.add_category(PackageType::Mas));
        assert!(!scope.add_category(PackageType::Mas));
        assert_eq!(scope.categories.len(), 1);

        assert!(scope.remove_category(PackageType::Mas));
        assert!(!scope.remove_category(PackageType::Mas));
        assert!(scope.is_empty());
    }

    #[test]
    fn test_package_add_remove_idempotent() {
        let mut scope = IgnoreScope::default();
        assert!(scope.add_package(&id("cask:bluestacks")));
        assert!(!scope.add_package(&id("cask:bluestacks")));
        assert!(scope.has_package(&id("cask:bluestacks")));

        assert!(scope.remove_package(&id("cask:bluestacks")));
        assert!(!scope.remove_package(&id("cask:bluestacks")));
        // Emptied category set is pruned
        assert!(scope.packages.is_empty());
    }

    #[test]
    fn test_has_package_is_package_level_only() {
        let mut scope = IgnoreScope::default();
        scope.add_category(PackageType::Cask);
        assert!(!scope.has_package(&id("cask:bluestacks")));
        assert!(scope.has_category(PackageType::Cask));
    }

    #[test]
    fn test_package_ids_expansion() {
        let mut scope = IgnoreScope::default();
        scope.add_package(&id("brew:postgresql"));
        scope.add_package(&id("brew:mysql"));
        scope.add_package(&id("cask:bluestacks"));

        let ids = scope.package_ids();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&id("brew:mysql")));
        assert!(ids.contains(&id("cask:bluestacks")));
    }

    #[test]
    fn test_yaml_shape() {
        let mut scope = IgnoreScope::default();
        scope.add_category(PackageType::Mas);
        scope.add_category(PackageType::Go);
        scope.add_package(&id("cask:bluestacks"));

        let yaml = serde_yaml::to_string(&scope).unwrap();
        let reloaded: IgnoreScope = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(reloaded, scope);

        // Absent fields default to empty
        let bare: IgnoreScope = serde_yaml::from_str("categories: [mas]").unwrap();
        assert!(bare.has_category(PackageType::Mas));
        assert!(bare.packages.is_empty());
    }
}
