//! Core types for manifest records and record sets.

use crate::error::{PackageIdError, PackageTypeError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::str::FromStr;

/// Category of a manifest record.
///
/// The enum doubles as the category registry: declaration order is the
/// canonical order records are written in, and [`directive`](Self::directive),
/// [`from_directive`](Self::from_directive), and
/// [`section_header`](Self::section_header) are its table data. Adding a
/// category is a data change here, not a new conditional elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    /// Homebrew tap (third-party repository)
    Tap,
    /// Homebrew formula (CLI tool)
    Brew,
    /// Homebrew cask (GUI application)
    Cask,
    /// Mac App Store app (via mas)
    Mas,
    /// VS Code extension
    Vscode,
    /// Cursor editor extension
    Cursor,
    /// Go tool (installed via `go install`)
    Go,
}

impl PackageType {
    /// All categories, in canonical manifest order.
    pub const ALL: [PackageType; 7] = [
        PackageType::Tap,
        PackageType::Brew,
        PackageType::Cask,
        PackageType::Mas,
        PackageType::Vscode,
        PackageType::Cursor,
        PackageType::Go,
    ];

    /// Get the manifest directive name for this category.
    pub fn directive(&self) -> &'static str {
        match self {
            PackageType::Tap => "tap",
            PackageType::Brew => "brew",
            PackageType::Cask => "cask",
            PackageType::Mas => "mas",
            PackageType::Vscode => "vscode",
            PackageType::Cursor => "cursor",
            PackageType::Go => "go",
        }
    }

    /// Parse a category from a manifest directive.
    pub fn from_directive(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tap" => Some(PackageType::Tap),
            "brew" => Some(PackageType::Brew),
            "cask" => Some(PackageType::Cask),
            "mas" => Some(PackageType::Mas),
            "vscode" => Some(PackageType::Vscode),
            "cursor" => Some(PackageType::Cursor),
            "go" => Some(PackageType::Go),
            _ => None,
        }
    }

    /// Section header comment for extension categories.
    ///
    /// Categories that `brew bundle` does not understand natively are written
    /// under a marker comment so readers know the entries come from decant.
    /// The parser recognizes these exact strings as structural, never as
    /// record descriptions.
    pub fn section_header(&self) -> Option<&'static str> {
        match self {
            PackageType::Cursor => Some("cursor (decant extension)"),
            PackageType::Go => Some("go (decant extension)"),
            _ => None,
        }
    }

    /// Whether this category is a decant extension to the base format.
    pub fn is_extension(&self) -> bool {
        self.section_header().is_some()
    }
}

impl std::fmt::Display for PackageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.directive())
    }
}

impl FromStr for PackageType {
    type Err = PackageTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_directive(s).ok_or_else(|| PackageTypeError(s.to_string()))
    }
}

/// Identity key of a manifest record: the `(category, name)` pair.
///
/// Identity is the sole determinant of set and diff membership; options,
/// display names, and descriptions never participate. Renders as
/// `category:name` (e.g. `brew:git`) and parses back from that form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId {
    /// Record category
    pub package_type: PackageType,
    /// Record name (primary identifier)
    pub name: String,
}

impl PackageId {
    /// Create an identity key.
    pub fn new(package_type: PackageType, name: impl Into<String>) -> Self {
        Self {
            package_type,
            name: name.into(),
        }
    }
}

impl std::fmt::Display for PackageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.package_type, self.name)
    }
}

impl FromStr for PackageId {
    type Err = PackageIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((category, name)) = s.split_once(':') else {
            return Err(PackageIdError::MissingSeparator(s.to_string()));
        };
        if name.contains(':') {
            return Err(PackageIdError::ExtraSeparator(s.to_string()));
        }
        let package_type =
            PackageType::from_directive(category).ok_or_else(|| PackageIdError::UnknownCategory {
                id: s.to_string(),
                category: category.to_string(),
            })?;
        if name.is_empty() {
            return Err(PackageIdError::EmptyName(s.to_string()));
        }
        Ok(Self {
            package_type,
            name: name.to_string(),
        })
    }
}

/// A single manifest record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Record name (e.g. "git", "homebrew/cask-fonts", a mas store id)
    pub name: String,
    /// Record category
    pub package_type: PackageType,
    /// Human label when `name` is a machine-oriented id (the mas case)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Additional options (e.g. `link: true`, `id: 497799835`), values verbatim
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub options: HashMap<String, String>,
    /// One-line description sourced from an adjacent manifest comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Package {
    /// Create a new record with the given name and category.
    pub fn new(name: impl Into<String>, package_type: PackageType) -> Self {
        Self {
            name: name.into(),
            package_type,
            display_name: None,
            options: HashMap::new(),
            description: None,
        }
    }

    /// Create a tap record.
    pub fn tap(name: impl Into<String>) -> Self {
        Self::new(name, PackageType::Tap)
    }

    /// Create a formula record.
    pub fn brew(name: impl Into<String>) -> Self {
        Self::new(name, PackageType::Brew)
    }

    /// Create a cask record.
    pub fn cask(name: impl Into<String>) -> Self {
        Self::new(name, PackageType::Cask)
    }

    /// Create a Mac App Store record.
    ///
    /// The store id is the primary identifier; the human label travels as the
    /// display name (omitted when it is just the id again).
    pub fn mas(label: impl Into<String>, id: impl Into<String>) -> Self {
        let label = label.into();
        let id = id.into();
        let mut pkg = Self::new(id.clone(), PackageType::Mas);
        if label != pkg.name {
            pkg.display_name = Some(label);
        }
        pkg.options.insert("id".to_string(), id);
        pkg
    }

    /// Create a VS Code extension record.
    pub fn vscode(name: impl Into<String>) -> Self {
        Self::new(name, PackageType::Vscode)
    }

    /// Create a Cursor extension record.
    pub fn cursor(name: impl Into<String>) -> Self {
        Self::new(name, PackageType::Cursor)
    }

    /// Create a Go tool record.
    pub fn go(name: impl Into<String>) -> Self {
        Self::new(name, PackageType::Go)
    }

    /// Add an option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Get this record's identity key.
    pub fn id(&self) -> PackageId {
        PackageId::new(self.package_type, self.name.clone())
    }

    /// Get the mas store id if this is a mas record.
    pub fn mas_id(&self) -> Option<&str> {
        if self.package_type == PackageType::Mas {
            self.options.get("id").map(String::as_str)
        } else {
            None
        }
    }

    /// The name to list this record under in a manifest.
    ///
    /// Store apps are listed by their human label; the `id:` option carries
    /// the identity back through a reparse. Everything else lists by name.
    pub fn display_label(&self) -> &str {
        match (self.package_type, &self.display_name) {
            (PackageType::Mas, Some(label)) => label,
            _ => &self.name,
        }
    }
}

/// A set of manifest records, keyed by identity.
///
/// Inserting a record whose identity key is already present replaces the
/// existing record (last write wins), so a set never holds duplicates.
/// Iteration follows first-insertion order; the writer imposes the only
/// canonical order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Packages {
    records: Vec<Package>,
}

impl Packages {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any existing record with the same identity
    /// key. The incoming record wins entirely, description and options
    /// included.
    pub fn insert(&mut self, package: Package) {
        match self
            .records
            .iter_mut()
            .find(|p| p.package_type == package.package_type && p.name == package.name)
        {
            Some(existing) => *existing = package,
            None => self.records.push(package),
        }
    }

    /// Merge another set into this one, newer records winning per key.
    pub fn merge(&mut self, other: Packages) {
        for package in other {
            self.insert(package);
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Package> {
        self.records.iter()
    }

    /// Look up a record by identity key.
    pub fn get(&self, id: &PackageId) -> Option<&Package> {
        self.records
            .iter()
            .find(|p| p.package_type == id.package_type && p.name == id.name)
    }

    /// Whether a record with this identity key is present.
    pub fn contains(&self, id: &PackageId) -> bool {
        self.get(id).is_some()
    }

    /// All identity keys in the set.
    pub fn ids(&self) -> HashSet<PackageId> {
        self.records.iter().map(Package::id).collect()
    }

    /// All record names, in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|p| p.name.as_str()).collect()
    }

    /// Records of one category, in insertion order.
    pub fn of_type(&self, package_type: PackageType) -> Vec<&Package> {
        self.records
            .iter()
            .filter(|p| p.package_type == package_type)
            .collect()
    }

    /// Records grouped by category, groups in canonical category order.
    pub fn by_type(&self) -> BTreeMap<PackageType, Vec<&Package>> {
        let mut groups: BTreeMap<PackageType, Vec<&Package>> = BTreeMap::new();
        for package in &self.records {
            groups.entry(package.package_type).or_default().push(package);
        }
        groups
    }

    /// Copy of the set restricted to the given categories.
    ///
    /// An empty category list applies no filter and returns the whole set.
    pub fn filter(&self, types: &[PackageType]) -> Packages {
        if types.is_empty() {
            return self.clone();
        }
        self.records
            .iter()
            .filter(|p| types.contains(&p.package_type))
            .cloned()
            .collect()
    }

    /// Copy of the set with every record whose key is in `excluded` removed.
    pub fn without(&self, excluded: &HashSet<PackageId>) -> Packages {
        self.records
            .iter()
            .filter(|p| !excluded.contains(&p.id()))
            .cloned()
            .collect()
    }
}

impl FromIterator<Package> for Packages {
    fn from_iter<I: IntoIterator<Item = Package>>(iter: I) -> Self {
        let mut packages = Packages::new();
        for package in iter {
            packages.insert(package);
        }
        packages
    }
}

impl From<Vec<Package>> for Packages {
    fn from(records: Vec<Package>) -> Self {
        records.into_iter().collect()
    }
}

impl IntoIterator for Packages {
    type Item = Package;
    type IntoIter = std::vec::IntoIter<Package>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Packages {
    type Item = &'a Package;
    type IntoIter = std::slice::Iter<'a, Package>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
