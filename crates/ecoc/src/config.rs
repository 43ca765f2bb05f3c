//! Optional `eco.toml` project configuration, following `faxt::config::
//! Config`'s load/parse shape but trimmed to what this toolchain actually
//! needs: an entry file, the default import resolution root, and whether
//! `bundle` minifies its output.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EcocError, Result};

pub const CONFIG_FILE_NAME: &str = "eco.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Entry module path, relative to `resolve_root`, used when a
    /// subcommand isn't given one explicitly on the command line.
    #[serde(default)]
    pub entry: Option<String>,

    /// Directory import specifiers are resolved against.
    #[serde(default = "default_resolve_root")]
    pub resolve_root: String,

    /// Whether `bundle` strips the emitted script's insignificant
    /// whitespace instead of re-emitting it one statement per line.
    #[serde(default)]
    pub minify: bool,
}

fn default_resolve_root() -> String {
    ".".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self { entry: None, resolve_root: default_resolve_root(), minify: false }
    }
}

impl Config {
    /// Loads `eco.toml` from the current directory, or the defaults if
    /// none is present.
    pub fn load() -> Result<Self> {
        let path = Path::new(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load_from_path(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(EcocError::Config(format!("configuration file not found: {}", path.display())));
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_current_dir_root() {
        let config = Config::default();
        assert_eq!(config.resolve_root, ".");
        assert!(!config.minify);
        assert!(config.entry.is_none());
    }

    #[test]
    fn loads_from_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("eco.toml");
        std::fs::write(&path, "entry = \"src/main.eco\"\nminify = true\n").unwrap();
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.entry.as_deref(), Some("src/main.eco"));
        assert!(config.minify);
    }

    #[test]
    fn missing_explicit_path_errors() {
        assert!(Config::load_from_path(Path::new("/nonexistent/eco.toml")).is_err());
    }
}
