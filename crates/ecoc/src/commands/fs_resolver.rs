//! The real filesystem `FilenameResolver`/`ImportResolver` pair (spec
//! §6): a thin adapter over `std::fs`, relative to whatever directory the
//! entry file or an importing module lives in. Resolution policy is the
//! same minimal "join directory and specifier" as `eco_bundle::memory`'s
//! in-memory pair — no extension probing, no `node_modules`-style lookup.

use std::path::Path;

use eco_bundle::{BundleError, FilenameResolver, ImportResolver};

pub struct FsResolver;

impl FilenameResolver for FsResolver {
    fn resolve_filename(&self, current_dir: &str, specifier: &str) -> Result<(String, String), BundleError> {
        let joined = Path::new(current_dir).join(specifier);
        let canonical = joined.canonicalize().map_err(|e| BundleError::ResolveFilename {
            current_dir: current_dir.to_string(),
            specifier: specifier.to_string(),
            reason: e.to_string(),
        })?;
        let canonical_name = canonical.to_string_lossy().into_owned();
        let new_current_dir =
            canonical.parent().map(|p| p.to_string_lossy().into_owned()).unwrap_or_default();
        Ok((canonical_name, new_current_dir))
    }
}

impl ImportResolver for FsResolver {
    fn resolve_import(&self, canonical_name: &str) -> Result<String, BundleError> {
        std::fs::read_to_string(canonical_name).map_err(|e| BundleError::ResolveImport {
            canonical_name: canonical_name.to_string(),
            reason: e.to_string(),
        })
    }
}
