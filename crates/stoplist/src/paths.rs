//! Config path resolution.
//!
//! Resolution priority for the config directory:
//! 1. `DECANT_CONFIG_DIR` environment variable (with `~`/`$VAR` expansion),
//!    making it easy to symlink the config from a dotfiles repository
//! 2. `XDG_CONFIG_HOME/decant` (if set)
//! 3. `~/.config/decant`

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Environment variable overriding the config directory.
pub const ENV_CONFIG_DIR: &str = "DECANT_CONFIG_DIR";

/// Resolve the config directory.
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = expand(&dir);
        log::debug!("Using config dir from {}: {}", ENV_CONFIG_DIR, path.display());
        return Ok(path);
    }

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg_config).join("decant");
        log::debug!("Using XDG_CONFIG_HOME: {}", path.display());
        return Ok(path);
    }

    let home = dirs::home_dir().ok_or(Error::NoHomeDir)?;
    let path = home.join(".config").join("decant");
    log::debug!("Using default config dir: {}", path.display());
    Ok(path)
}

/// Resolve the default ignore document path.
pub fn ignore_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("ignore.yaml"))
}

/// Expand `~` and environment variables in a path string.
fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    /// Run a test with a temporary env var.
    ///
    /// # Safety
    /// Uses unsafe env::set_var/remove_var; only for single-threaded test
    /// contexts.
    fn with_env_var<F, R>(key: &str, value: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let original = env::var(key).ok();
        // SAFETY: Tests run in isolation and don't read env vars concurrently
        unsafe { env::set_var(key, value) };
        let result = f();
        match original {
            // SAFETY: Tests run in isolation
            Some(v) => unsafe { env::set_var(key, v) },
            None => unsafe { env::remove_var(key) },
        }
        result
    }

    /// Run a test with an env var removed.
    ///
    /// # Safety
    /// Uses unsafe env::remove_var/set_var; only for single-threaded test
    /// contexts.
    fn without_env_var<F, R>(key: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let original = env::var(key).ok();
        // SAFETY: Tests run in isolation and don't read env vars concurrently
        unsafe { env::remove_var(key) };
        let result = f();
        if let Some(v) = original {
            // SAFETY: Tests run in isolation
            unsafe { env::set_var(key, v) };
        }
        result
    }

    #[test]
    fn test_config_dir_env_override() {
        with_env_var(ENV_CONFIG_DIR, "/custom/config/path", || {
            assert_eq!(config_dir().unwrap(), PathBuf::from("/custom/config/path"));
        });
    }

    #[test]
    fn test_config_dir_env_override_with_tilde() {
        let home = dirs::home_dir().unwrap();
        let expected = home.join("dotfiles").join("decant-tilde-test");
        with_env_var(ENV_CONFIG_DIR, "~/dotfiles/decant-tilde-test", || {
            assert_eq!(config_dir().unwrap(), expected);
        });
    }

    #[test]
    fn test_xdg_config_home() {
        without_env_var(ENV_CONFIG_DIR, || {
            with_env_var("XDG_CONFIG_HOME", "/tmp/xdg-config-test", || {
                assert_eq!(
                    config_dir().unwrap(),
                    PathBuf::from("/tmp/xdg-config-test/decant")
                );
            });
        });
    }

    #[test]
    fn test_default_config_dir() {
        without_env_var(ENV_CONFIG_DIR, || {
            without_env_var("XDG_CONFIG_HOME", || {
                let home = dirs::home_dir().unwrap();
                assert_eq!(config_dir().unwrap(), home.join(".config").join("decant"));
            });
        });
    }

    #[test]
    fn test_ignore_file_path() {
        with_env_var(ENV_CONFIG_DIR, "/custom/config/path", || {
            assert_eq!(
                ignore_file_path().unwrap(),
                PathBuf::from("/custom/config/path/ignore.yaml")
            );
        });
    }
}
