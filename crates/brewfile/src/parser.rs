//! Parser for the declarative manifest format.
//!
//! Manifests use one declaration per line with Ruby-like syntax:
//! ```text
//! tap "homebrew/cask-fonts"
//! # Distributed version control
//! brew "git"
//! brew "postgresql@14", restart_service: :changed
//! mas "Xcode", id: 497799835
//! cursor "ms-python.python"
//! go "golang.org/x/tools/gopls"
//! ```
//!
//! A `#` comment directly above a declaration becomes that record's
//! description. Lines that match no category are dropped; malformed content
//! is never an error.

use crate::error::{Error, Result};
use crate::types::{Package, PackageType, Packages};
use std::collections::HashMap;
use std::path::Path;

/// Scanner state for the comment-as-description rule.
enum ScanState {
    Idle,
    Pending(String),
}

/// Parse a manifest from a file path.
///
/// Fails only on I/O; content problems never error.
pub fn parse_file(path: &Path) -> Result<Packages> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_string(&content))
}

/// Parse a manifest from a string.
///
/// Comment handling: a comment line holds as the pending description,
/// surviving blank lines, until the next declaration either claims it
/// (successful parse) or orphans it (failed parse). The writer's own section
/// header comments are structural and never become descriptions.
pub fn parse_string(content: &str) -> Packages {
    let mut packages = Packages::new();
    let mut state = ScanState::Idle;

    for raw in content.lines() {
        let line = raw.trim();

        // Pending descriptions survive blank lines
        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            let text = comment.trim();
            state = if text.is_empty() || is_section_header(text) {
                ScanState::Idle
            } else {
                ScanState::Pending(text.to_string())
            };
            continue;
        }

        match parse_line(line) {
            Some(mut package) => {
                if let ScanState::Pending(description) =
                    std::mem::replace(&mut state, ScanState::Idle)
                {
                    package.description = Some(description);
                }
                packages.insert(package);
            }
            None => state = ScanState::Idle,
        }
    }

    packages
}

/// Whether a comment is one of the writer's section headers.
fn is_section_header(text: &str) -> bool {
    PackageType::ALL
        .iter()
        .any(|t| t.section_header() == Some(text))
}

/// Parse a single declaration line. Returns None for anything that is not a
/// well-formed `<category> "<name>"[, options]` line.
fn parse_line(line: &str) -> Option<Package> {
    let (directive, rest) = line.split_once(char::is_whitespace)?;
    let package_type = PackageType::from_directive(directive)?;

    let (name, rest) = extract_name(rest.trim())?;
    if name.is_empty() {
        return None;
    }

    let mut package = Package::new(name, package_type);

    // Options require a comma after the name; anything else trailing the
    // quoted name (an inline remark, say) is ignored
    if let Some(options_str) = rest.trim_start().strip_prefix(',') {
        parse_options(options_str, &mut package.options);
    }

    normalize_mas_identity(&mut package);
    Some(package)
}

/// Extract the double-quoted record name from the start of arguments.
/// Returns None for unquoted or unclosed names.
fn extract_name(args: &str) -> Option<(String, &str)> {
    let stripped = args.strip_prefix('"')?;
    let end = stripped.find('"')?;
    Some((stripped[..end].to_string(), &stripped[end + 1..]))
}

/// Parse comma-separated `key: value` options.
fn parse_options(options_str: &str, options: &mut HashMap<String, String>) {
    let mut current = options_str.trim();

    while !current.is_empty() {
        current = current.trim_start_matches(|c: char| c == ',' || c.is_whitespace());
        if current.is_empty() {
            break;
        }

        let Some(colon_pos) = current.find(':') else {
            break;
        };
        let key = current[..colon_pos].trim().to_string();
        current = current[colon_pos + 1..].trim_start();

        let (value, rest) = parse_option_value(current);
        options.insert(key, value);
        current = rest.trim_start();
    }
}

/// Parse one option value. Quoted values are unquoted; everything else
/// (booleans, numbers, `:symbol` markers) is kept verbatim up to the next
/// comma or whitespace. Type rendering is the writer's job.
fn parse_option_value(value_str: &str) -> (String, &str) {
    let value_str = value_str.trim_start();

    // Double-quoted string
    if let Some(stripped) = value_str.strip_prefix('"')
        && let Some(end) = stripped.find('"')
    {
        return (stripped[..end].to_string(), &stripped[end + 1..]);
    }

    // Single-quoted string
    if let Some(stripped) = value_str.strip_prefix('\'')
        && let Some(end) = stripped.find('\'')
    {
        return (stripped[..end].to_string(), &stripped[end + 1..]);
    }

    let end = value_str
        .find(|c: char| c == ',' || c.is_whitespace())
        .unwrap_or(value_str.len());
    (value_str[..end].to_string(), &value_str[end..])
}

/// Make the store id the primary identifier for mas records.
///
/// `mas "Xcode", id: 497799835` identifies as `mas:497799835`; the quoted
/// label becomes the display name so the writer can restore the line.
fn normalize_mas_identity(package: &mut Package) {
    if package.package_type != PackageType::Mas {
        return;
    }
    if let Some(id) = package.options.get("id")
        && package.name != *id
    {
        let label = std::mem::replace(&mut package.name, id.clone());
        package.display_name = Some(label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PackageId;

    #[test]
    fn test_parse_tap() {
        let packages = parse_string(r#"tap "homebrew/cask-fonts""#);
        assert_eq!(packages.len(), 1);
        let pkg = packages.iter().next().unwrap();
        assert_eq!(pkg.name, "homebrew/cask-fonts");
        assert_eq!(pkg.package_type, PackageType::Tap);
    }

    #[test]
    fn test_parse_brew_with_options() {
        let packages = parse_string(r#"brew "postgresql@14", restart_service: :changed, link: true"#);
        let pkg = packages.iter().next().unwrap();
        assert_eq!(pkg.name, "postgresql@14");
        // Symbol markers stay verbatim, colon included
        assert_eq!(pkg.options.get("restart_service"), Some(&":changed".to_string()));
        assert_eq!(pkg.options.get("link"), Some(&"true".to_string()));
    }

    #[test]
    fn test_parse_quoted_option_value() {
        let packages = parse_string(r#"brew "fd", args: ["HEAD"], note: "fast: and friendly""#);
        let pkg = packages.iter().next().unwrap();
        assert_eq!(pkg.options.get("args"), Some(&"[\"HEAD\"]".to_string()));
        assert_eq!(pkg.options.get("note"), Some(&"fast: and friendly".to_string()));
    }

    #[test]
    fn test_parse_mas_identity_swap() {
        let packages = parse_string(r#"mas "Xcode", id: 497799835"#);
        let pkg = packages.iter().next().unwrap();
        assert_eq!(pkg.name, "497799835");
        assert_eq!(pkg.display_name.as_deref(), Some("Xcode"));
        assert_eq!(pkg.mas_id(), Some("497799835"));
        assert!(packages.contains(&PackageId::new(PackageType::Mas, "497799835")));
    }

    #[test]
    fn test_parse_mas_without_id_keeps_label() {
        let packages = parse_string(r#"mas "Xcode""#);
        let pkg = packages.iter().next().unwrap();
        assert_eq!(pkg.name, "Xcode");
        assert_eq!(pkg.display_name, None);
    }

    #[test]
    fn test_parse_extension_categories() {
        let content = r#"
vscode "ms-python.python"
cursor "rust-lang.rust-analyzer"
go "golang.org/x/tools/gopls"
"#;
        let packages = parse_string(content);
        assert_eq!(packages.len(), 3);
        assert_eq!(packages.of_type(PackageType::Vscode).len(), 1);
        assert_eq!(packages.of_type(PackageType::Cursor).len(), 1);
        assert_eq!(
            packages.of_type(PackageType::Go)[0].name,
            "golang.org/x/tools/gopls"
        );
    }

    #[test]
    fn test_description_attaches_to_next_record() {
        let packages = parse_string("# Fast file search\nbrew \"fd\"\nbrew \"rg\"");
        assert_eq!(packages.len(), 2);
        let fd = packages.get(&PackageId::new(PackageType::Brew, "fd")).unwrap();
        let rg = packages.get(&PackageId::new(PackageType::Brew, "rg")).unwrap();
        assert_eq!(fd.description.as_deref(), Some("Fast file search"));
        assert_eq!(rg.description, None);
    }

    #[test]
    fn test_description_survives_blank_lines() {
        let content = "# Terminal multiplexer\n\n\ntmux_is_not_a_directive\n";
        assert!(parse_string(content).is_empty());

        let content = "# Terminal multiplexer\n\n\nbrew \"tmux\"";
        let packages = parse_string(content);
        let pkg = packages.iter().next().unwrap();
        assert_eq!(pkg.description.as_deref(), Some("Terminal multiplexer"));
    }

    #[test]
    fn test_later_comment_replaces_pending() {
        let content = "# first\n# second\nbrew \"git\"";
        let packages = parse_string(content);
        assert_eq!(
            packages.iter().next().unwrap().description.as_deref(),
            Some("second")
        );
    }

    #[test]
    fn test_failed_line_orphans_description() {
        let content = "# orphaned\nnot a declaration\nbrew \"git\"";
        let packages = parse_string(content);
        assert_eq!(packages.len(), 1);
        assert_eq!(packages.iter().next().unwrap().description, None);
    }

    #[test]
    fn test_section_header_is_not_a_description() {
        let content = "# go (decant extension)\ngo \"golang.org/x/tools/gopls\"";
        let packages = parse_string(content);
        assert_eq!(packages.iter().next().unwrap().description, None);
    }

    #[test]
    fn test_empty_comment_clears_pending() {
        let content = "# keep me\n#\nbrew \"git\"";
        let packages = parse_string(content);
        assert_eq!(packages.iter().next().unwrap().description, None);
    }

    #[test]
    fn test_unclosed_quote_skips_line() {
        let content = "brew \"git\nbrew \"curl\"";
        let packages = parse_string(content);
        assert_eq!(packages.names(), vec!["curl"]);
    }

    #[test]
    fn test_unquoted_name_skips_line() {
        assert!(parse_string("brew git").is_empty());
    }

    #[test]
    fn test_unknown_directive_skips_line() {
        assert!(parse_string(r#"pipx "httpie""#).is_empty());
    }

    #[test]
    fn test_inline_remark_ignored() {
        let packages = parse_string(r#"brew "git" # the usual"#);
        let pkg = packages.iter().next().unwrap();
        assert_eq!(pkg.name, "git");
        assert!(pkg.options.is_empty());
        assert_eq!(pkg.description, None);
    }

    #[test]
    fn test_duplicate_identity_last_wins() {
        let content = "brew \"git\", link: true\nbrew \"git\"";
        let packages = parse_string(content);
        assert_eq!(packages.len(), 1);
        assert!(packages.iter().next().unwrap().options.is_empty());
    }

    #[test]
    fn test_parse_full_manifest() {
        let content = r#"
tap "homebrew/cask"

# Distributed version control
brew "git"
brew "curl"

cask "firefox"
mas "Keynote", id: 409183694

# cursor (decant extension)
cursor "ms-python.python"
"#;
        let packages = parse_string(content);
        assert_eq!(packages.len(), 6);
        assert_eq!(packages.of_type(PackageType::Brew).len(), 2);
        assert!(packages.contains(&PackageId::new(PackageType::Mas, "409183694")));
        let cursor = packages.of_type(PackageType::Cursor)[0];
        assert_eq!(cursor.description, None);
    }

    #[test]
    fn test_parse_file_roundtrip_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Brewfile");
        std::fs::write(&path, "brew \"git\"\n").unwrap();

        let packages = parse_file(&path).unwrap();
        assert_eq!(packages.len(), 1);

        let missing = dir.path().join("nope");
        let err = parse_file(&missing).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }
}
