//! An in-memory `FilenameResolver`/`ImportResolver` pair, so the bundler
//! is exercisable without a real filesystem. Resolution policy is
//! deliberately minimal: join `current_dir` and `specifier`, nothing
//! resembling extension probing or `node_modules` lookup is invented.

use std::collections::HashMap;

use crate::error::BundleError;
use crate::resolver::{FilenameResolver, ImportResolver};

/// A fixed table of `canonical_name -> source`, keyed by the path you'd
/// get from joining a module's directory and its import specifier.
pub struct MemoryResolver {
    files: HashMap<String, String>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self { files: HashMap::new() }
    }

    pub fn with_file(mut self, canonical_name: impl Into<String>, source: impl Into<String>) -> Self {
        self.files.insert(canonical_name.into(), source.into());
        self
    }
}

impl Default for MemoryResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Joins `current_dir` and `specifier` the way a Unix path join would,
/// without touching a real filesystem: `.`/`..` segments are left alone
/// rather than canonicalised, since no real directory tree backs them.
fn join(current_dir: &str, specifier: &str) -> String {
    if specifier.starts_with('/') {
        return specifier.trim_start_matches('/').to_string();
    }
    if current_dir.is_empty() || current_dir == "." {
        specifier.trim_start_matches("./").to_string()
    } else {
        format!("{}/{}", current_dir.trim_end_matches('/'), specifier.trim_start_matches("./"))
    }
}

fn parent_dir(canonical_name: &str) -> String {
    match canonical_name.rsplit_once('/') {
        Some((dir, _)) => dir.to_string(),
        None => String::new(),
    }
}

impl FilenameResolver for MemoryResolver {
    fn resolve_filename(
        &self,
        current_dir: &str,
        specifier: &str,
    ) -> Result<(String, String), BundleError> {
        let canonical_name = join(current_dir, specifier);
        if !self.files.contains_key(&canonical_name) {
            return Err(BundleError::ResolveFilename {
                current_dir: current_dir.to_string(),
                specifier: specifier.to_string(),
                reason: format!("no module registered at '{canonical_name}'"),
            });
        }
        let new_current_dir = parent_dir(&canonical_name);
        Ok((canonical_name, new_current_dir))
    }
}

impl ImportResolver for MemoryResolver {
    fn resolve_import(&self, canonical_name: &str) -> Result<String, BundleError> {
        self.files.get(canonical_name).cloned().ok_or_else(|| BundleError::ResolveImport {
            canonical_name: canonical_name.to_string(),
            reason: "no source registered for this canonical name".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_current_dir_and_specifier() {
        let r = MemoryResolver::new().with_file("lib/b.eco", "export default 41;");
        let (canonical, dir) = r.resolve_filename("lib", "./b.eco").unwrap();
        assert_eq!(canonical, "lib/b.eco");
        assert_eq!(dir, "lib");
    }

    #[test]
    fn missing_file_errors() {
        let r = MemoryResolver::new();
        assert!(r.resolve_filename(".", "./missing.eco").is_err());
    }
}
