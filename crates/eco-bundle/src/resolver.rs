//! The bundler's two host collaborators (spec §6): turning an import
//! specifier into a canonical module identity, and turning that identity
//! into source bytes. Kept as plain synchronous traits — §5 already pins
//! the whole toolchain to single-threaded cooperative execution with no
//! real suspension points outside these two calls, so there is nothing an
//! async boundary would buy here that a `Result`-returning call doesn't.

use crate::error::BundleError;

/// `resolve_filename(current_dir, name) -> {canonical_name, new_current_dir}`.
pub trait FilenameResolver {
    fn resolve_filename(
        &self,
        current_dir: &str,
        specifier: &str,
    ) -> Result<(String, String), BundleError>;
}

/// `resolve_import(canonical_name) -> source_bytes`.
pub trait ImportResolver {
    fn resolve_import(&self, canonical_name: &str) -> Result<String, BundleError>;
}
