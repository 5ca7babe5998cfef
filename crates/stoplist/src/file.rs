//! The ignore document: global and per-machine exclusion scopes plus
//! machine pins.
//!
//! Scopes merge additively: a machine's effective ignores are the union of
//! the global scope and its own. Category ignores and package ignores are
//! tracked independently even though a category ignore is a superset in
//! effect; entries shadowed by a category ignore stay in the document and
//! are surfaced by [`redundant_package_ignores`](IgnoreFile::redundant_package_ignores)
//! for an external health check to render.

use crate::scope::{IgnoreScope, PinList, pin_ids};
use brewfile::{PackageId, PackageType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// The persisted two-layer exclusion document.
///
/// The one stateful, on-disk entity in this core; see
/// [`IgnoreStore`](crate::IgnoreStore) for load/save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreFile {
    /// Ignores applying to every machine
    #[serde(default, skip_serializing_if = "IgnoreScope::is_empty")]
    pub global: IgnoreScope,

    /// Per-machine ignores, keyed by machine id
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub machines: BTreeMap<String, IgnoreScope>,

    /// Per-machine pinned packages, keyed by machine id.
    ///
    /// A pinned package belongs exclusively to its machine: a sync must
    /// neither propose installing it elsewhere nor removing it locally.
    /// Optional section; older documents without it load unchanged.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub machine_specific: BTreeMap<String, PinList>,
}

/// A package-level ignore entry shadowed by a category ignore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedundantIgnore {
    /// Machine whose scope holds the entry; `None` for the global scope
    pub machine: Option<String>,
    /// The shadowed entry
    pub id: PackageId,
}

impl IgnoreFile {
    // =========================================================================
    // Effective reads
    // =========================================================================

    /// Categories ignored for a machine: global ∪ machine.
    pub fn ignored_categories(&self, machine: &str) -> BTreeSet<PackageType> {
        let mut categories = self.global.categories.clone();
        if let Some(scope) = self.machines.get(machine) {
            categories.extend(&scope.categories);
        }
        categories
    }

    /// Package-level ignores for a machine as identity keys: global ∪
    /// machine.
    ///
    /// Deliberately excludes category-level ignores: the two layers are
    /// tracked independently, and entries are not dropped just because
    /// their category is also ignored. Callers wanting full effective
    /// exclusion check [`is_category_ignored`](Self::is_category_ignored)
    /// as well.
    pub fn ignored_packages(&self, machine: &str) -> HashSet<PackageId> {
        let mut ids = self.global.package_ids();
        if let Some(scope) = self.machines.get(machine) {
            ids.extend(scope.package_ids());
        }
        ids
    }

    /// Whether a category is ignored for a machine, at either scope.
    pub fn is_category_ignored(&self, machine: &str, category: PackageType) -> bool {
        self.global.has_category(category)
            || self
                .machines
                .get(machine)
                .is_some_and(|scope| scope.has_category(category))
    }

    /// Whether a package is individually ignored for a machine.
    ///
    /// Package-level only: a record in an ignored category for which no
    /// package entry exists returns false here.
    pub fn is_package_ignored(&self, machine: &str, id: &PackageId) -> bool {
        self.global.has_package(id)
            || self
                .machines
                .get(machine)
                .is_some_and(|scope| scope.has_package(id))
    }

    // =========================================================================
    // Pins
    // =========================================================================

    /// Identity keys pinned to one machine.
    pub fn pinned_to(&self, machine: &str) -> HashSet<PackageId> {
        self.machine_specific
            .get(machine)
            .map(|pins| pin_ids(pins).collect())
            .unwrap_or_default()
    }

    /// Identity keys pinned to any machine.
    ///
    /// This is the set a sync passes to
    /// [`DiffResult::filter_machine_specific`](brewfile::DiffResult::filter_machine_specific).
    pub fn all_pins(&self) -> HashSet<PackageId> {
        self.machine_specific
            .values()
            .flat_map(|pins| pin_ids(pins))
            .collect()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Scope targeted by a mutator: the global scope for `None`, otherwise
    /// the machine's scope, created on first use.
    fn scope_mut(&mut self, machine: Option<&str>) -> &mut IgnoreScope {
        match machine {
            None => &mut self.global,
            Some(machine) => self.machines.entry(machine.to_string()).or_default(),
        }
    }

    /// Add a category ignore at the given scope. Returns whether the
    /// document changed; adding a present entry is a no-op.
    pub fn add_category_ignore(&mut self, machine: Option<&str>, category: PackageType) -> bool {
        self.scope_mut(machine).add_category(category)
    }

    /// Remove a category ignore at the given scope. Removing an absent
    /// entry is a no-op. Machine scopes left empty are dropped.
    pub fn remove_category_ignore(&mut self, machine: Option<&str>, category: PackageType) -> bool {
        match machine {
            None => self.global.remove_category(category),
            Some(machine) => {
                let Some(scope) = self.machines.get_mut(machine) else {
                    return false;
                };
                let removed = scope.remove_category(category);
                if scope.is_empty() {
                    self.machines.remove(machine);
                }
                removed
            }
        }
    }

    /// Add a package ignore at the given scope. Returns whether the
    /// document changed; adding a present entry is a no-op.
    pub fn add_package_ignore(&mut self, machine: Option<&str>, id: &PackageId) -> bool {
        self.scope_mut(machine).add_package(id)
    }

    /// Remove a package ignore at the given scope. Removing an absent
    /// entry is a no-op. Machine scopes left empty are dropped.
    pub fn remove_package_ignore(&mut self, machine: Option<&str>, id: &PackageId) -> bool {
        match machine {
            None => self.global.remove_package(id),
            Some(machine) => {
                let Some(scope) = self.machines.get_mut(machine) else {
                    return false;
                };
                let removed = scope.remove_package(id);
                if scope.is_empty() {
                    self.machines.remove(machine);
                }
                removed
            }
        }
    }

    /// Drop every ignore entry at the given scope. Pins are untouched.
    /// Returns whether the document changed.
    pub fn clear(&mut self, machine: Option<&str>) -> bool {
        match machine {
            None => {
                let changed = !self.global.is_empty();
                self.global = IgnoreScope::default();
                changed
            }
            Some(machine) => self.machines.remove(machine).is_some(),
        }
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Package-level entries shadowed by a category ignore.
    ///
    /// Global entries are shadowed by a global category ignore; machine
    /// entries by a global or same-machine category ignore. Shadowed entries
    /// are dead data for filtering purposes but are never pruned here.
    /// Output is deterministic: global entries first, then machines by id.
    pub fn redundant_package_ignores(&self) -> Vec<RedundantIgnore> {
        let mut redundant = Vec::new();

        for (package_type, names) in &self.global.packages {
            if self.global.has_category(*package_type) {
                redundant.extend(names.iter().map(|name| RedundantIgnore {
                    machine: None,
                    id: PackageId::new(*package_type, name.clone()),
                }));
            }
        }

        for (machine, scope) in &self.machines {
            for (package_type, names) in &scope.packages {
                if self.global.has_category(*package_type) || scope.has_category(*package_type) {
                    redundant.extend(names.iter().map(|name| RedundantIgnore {
                        machine: Some(machine.clone()),
                        id: PackageId::new(*package_type, name.clone()),
                    }));
                }
            }
        }

        redundant
    }
}
