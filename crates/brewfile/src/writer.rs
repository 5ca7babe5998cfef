//! Writer for the declarative manifest format.
//!
//! Output is deterministic: groups follow the canonical category order,
//! records sort by name within each group, and option keys sort
//! lexicographically. Extension categories get a section header comment so
//! `brew bundle` consumers know where its vocabulary ends.
//!
//! Formatting a set and parsing it back reproduces the same identity keys,
//! options, and descriptions.

use crate::error::{Error, Result};
use crate::types::{Package, Packages};
use std::fmt::Write as _;
use std::path::Path;

/// Render a record set as manifest text.
pub fn format(packages: &Packages) -> String {
    let mut output = String::new();
    let by_type = packages.by_type();
    let mut first_section = true;

    // by_type keys iterate in canonical category order
    for (package_type, mut group) in by_type {
        group.sort_by_key(|p| &p.name);

        if !first_section {
            output.push('\n');
        }
        first_section = false;

        if let Some(header) = package_type.section_header() {
            let _ = writeln!(output, "# {header}");
        }

        for package in group {
            if let Some(description) = &package.description
                && !description.is_empty()
            {
                let _ = writeln!(output, "# {description}");
            }
            write_record(&mut output, package);
        }
    }

    output
}

/// Write a record set to a manifest file, replacing its content.
pub fn write_file(path: &Path, packages: &Packages) -> Result<()> {
    std::fs::write(path, format(packages)).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Append a record set to an existing manifest file.
///
/// Creates the file if absent; inserts a newline first when the existing
/// content lacks a trailing one.
pub fn append_file(path: &Path, packages: &Packages) -> Result<()> {
    let mut content = match std::fs::read_to_string(path) {
        Ok(existing) => existing,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(source) => {
            return Err(Error::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(&format(packages));

    std::fs::write(path, content).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Write one declaration line.
fn write_record(output: &mut String, package: &Package) {
    let _ = write!(
        output,
        "{} \"{}\"",
        package.package_type.directive(),
        package.display_label()
    );

    let mut options: Vec<_> = package.options.iter().collect();
    options.sort_by_key(|(key, _)| *key);
    for (key, value) in options {
        let _ = write!(output, ", {key}: {}", format_value(value));
    }

    output.push('\n');
}

/// Render an option value per the manifest's typing rules.
///
/// Booleans, all-digit numerics, and `:symbol` markers go unquoted and
/// verbatim; everything else is double-quoted.
fn format_value(value: &str) -> String {
    let unquoted = value == "true"
        || value == "false"
        || (!value.is_empty() && value.chars().all(|c| c.is_ascii_digit()))
        || value.starts_with(':');

    if unquoted {
        value.to_string()
    } else {
        format!("\"{value}\"")
    }
}
