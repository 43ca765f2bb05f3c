//! The module-graph walker (spec §4.5): not an optimizer, just cycle-safe
//! canonical caching plus export aggregation. Everything else is the
//! `ToSource` string assembly in `source.rs`.

use indexmap::IndexMap;

use eco_par::ast::{ExportStmt, ImportStmt, Stmt};
use eco_util::Symbol;

use crate::error::BundleError;
use crate::resolver::{FilenameResolver, ImportResolver};
use crate::source::ToSource;

/// Per-module state while its body is being walked: which scope frame
/// (read: which `module.exports` assignment) the current statement's
/// export bookkeeping lands in. Nothing about this is exposed past the
/// module that owns it — it's popped and consumed the instant the
/// module's body finishes emitting.
pub struct BundlerContext {
    pub current_dir: String,
    /// `(exported name, value expression source)`. A plain `export const
    /// x = 1;` pushes `("x", "x")` (the self-reference making it render
    /// as object-literal shorthand); a re-export pushes `("x", "__eco_reexportN.x")`.
    pub named_exports: Vec<(Symbol, String)>,
    pub default_export: Option<String>,
    /// Whether this module needs the `require` parameter in its factory
    /// signature at all, i.e. whether it imports or re-exports anything.
    pub has_imports: bool,
}

impl BundlerContext {
    fn new(current_dir: String) -> Self {
        Self { current_dir, named_exports: Vec::new(), default_export: None, has_imports: false }
    }
}

pub struct Bundler {
    filename_resolver: Box<dyn FilenameResolver>,
    import_resolver: Box<dyn ImportResolver>,
    /// Canonical name -> emitted module factory source. `None` is the
    /// cycle-breaking placeholder inserted before a module's own body is
    /// walked; insertion order is preserved (`IndexMap`) since the
    /// skeleton emits module bodies in that order.
    modules: IndexMap<String, Option<String>>,
    context_stack: Vec<BundlerContext>,
    reexport_counter: u32,
}

impl Bundler {
    pub fn new(
        filename_resolver: impl FilenameResolver + 'static,
        import_resolver: impl ImportResolver + 'static,
    ) -> Self {
        Self {
            filename_resolver: Box::new(filename_resolver),
            import_resolver: Box::new(import_resolver),
            modules: IndexMap::new(),
            context_stack: Vec::new(),
            reexport_counter: 0,
        }
    }

    fn context_mut(&mut self) -> &mut BundlerContext {
        self.context_stack.last_mut().expect("to_source called outside a module walk")
    }

    fn next_reexport_var(&mut self) -> String {
        self.reexport_counter += 1;
        format!("__eco_reexport_{}", self.reexport_counter)
    }

    /// Bundles `entry_file` (resolved against `entry_dir`) and every
    /// module it transitively imports, returning the full emitted script.
    pub fn bundle(&mut self, entry_dir: &str, entry_file: &str) -> Result<String, BundleError> {
        let entry = self.bundle_module(entry_dir, entry_file)?;
        Ok(self.emit_skeleton(&entry))
    }

    /// Resolves, parses, and emits one module, recursing into its
    /// imports/re-exports first. Returns the module's canonical name so
    /// callers (an importing module, or the entry point) can reference it.
    pub fn bundle_module(&mut self, current_dir: &str, specifier: &str) -> Result<String, BundleError> {
        let (canonical_name, new_current_dir) =
            self.filename_resolver.resolve_filename(current_dir, specifier)?;
        tracing::debug!(canonical_name = %canonical_name, "bundler visiting module");
        // Already emitted, or a placeholder from an in-progress ancestor
        // on the call stack (a cycle) — either way, nothing left to do.
        if self.modules.contains_key(&canonical_name) {
            tracing::trace!(canonical_name = %canonical_name, "module already cached");
            return Ok(canonical_name);
        }
        self.modules.insert(canonical_name.clone(), None);

        let source = self.import_resolver.resolve_import(&canonical_name)?;
        let program = eco_par::parse(&source)?;

        self.context_stack.push(BundlerContext::new(new_current_dir));
        let mut body = String::new();
        for stmt in &program {
            let emitted = self.emit_top_level_stmt(stmt)?;
            if !emitted.is_empty() {
                body.push_str(&emitted);
                body.push('\n');
            }
        }
        let ctx = self.context_stack.pop().expect("pushed immediately above");

        if let Some(default_src) = &ctx.default_export {
            body.push_str(&format!("module.exports = {default_src};\n"));
        } else if !ctx.named_exports.is_empty() {
            let fields = ctx
                .named_exports
                .iter()
                .map(|(name, value)| {
                    if value == name.as_str() {
                        name.to_string()
                    } else {
                        format!("{name}: {value}")
                    }
                })
                .collect::<Vec<_>>()
                .join(", ");
            body.push_str(&format!("module.exports = {{ {fields} }};\n"));
        }

        let params = if ctx.has_imports { "module, require" } else { "module" };
        let factory = format!("({params}) => {{\n{body}}}");
        self.modules.insert(canonical_name.clone(), Some(factory));
        Ok(canonical_name)
    }

    /// A top-level statement is either plain string assembly (delegated
    /// to `ToSource`) or an `Import`/`Export`, which this module handles
    /// directly since they drive recursion and export bookkeeping that
    /// `ToSource` has no access to.
    fn emit_top_level_stmt(&mut self, stmt: &Stmt) -> Result<String, BundleError> {
        match stmt {
            Stmt::Import(import) => self.emit_import(import),
            Stmt::Export(export) => self.emit_export(export),
            other => other.to_source(self),
        }
    }

    fn emit_import(&mut self, import: &ImportStmt) -> Result<String, BundleError> {
        let current_dir = self.context_mut().current_dir.clone();
        let canonical_name = self.bundle_module(&current_dir, import.from_file.as_str())?;
        self.context_mut().has_imports = true;

        if let Some(default_name) = import.default_name {
            return Ok(format!("const {default_name} = __eco_require__('{canonical_name}');"));
        }
        if let Some(namespace_name) = import.namespace_name {
            return Ok(format!("const {namespace_name} = __eco_require__('{canonical_name}');"));
        }
        if let Some(objects) = &import.objects {
            let temp = self.next_reexport_var();
            let mut out = format!("const {temp} = __eco_require__('{canonical_name}');\n");
            for binding in objects {
                let local = binding.alias.unwrap_or(binding.name);
                out.push_str(&format!("const {local} = {temp}.{};\n", binding.name));
            }
            return Ok(out);
        }
        // Bare `import 'file';` — side effect only, no binding introduced.
        Ok(format!("__eco_require__('{canonical_name}');"))
    }

    fn emit_export(&mut self, export: &ExportStmt) -> Result<String, BundleError> {
        match export {
            ExportStmt::Default(expr) => {
                let source = expr.to_source(self)?;
                self.context_mut().default_export = Some(source);
                Ok(String::new())
            }
            ExportStmt::VarDecl { is_const, variable } => {
                let decl = format!(
                    "{} {};",
                    if *is_const { "const" } else { "let" },
                    variable.to_source(self)?
                );
                for name in bound_names(&variable.left) {
                    self.context_mut().named_exports.push((name, name.to_string()));
                }
                Ok(decl)
            }
            ExportStmt::From { file, all, named } => {
                let current_dir = self.context_mut().current_dir.clone();
                let canonical_name = self.bundle_module(&current_dir, file.as_str())?;
                self.context_mut().has_imports = true;
                let temp = self.next_reexport_var();
                let mut out = format!("const {temp} = __eco_require__('{canonical_name}');\n");
                if *all {
                    // Can't enumerate the target's export names statically
                    // (they're a runtime record), so merge the whole
                    // object directly rather than deferring to the
                    // aggregated named-exports assignment.
                    out.push_str(&format!("Object.assign(module.exports, {temp});\n"));
                } else {
                    for binding in named {
                        let exported_as = binding.alias.unwrap_or(binding.name);
                        self.context_mut()
                            .named_exports
                            .push((exported_as, format!("{temp}.{}", binding.name)));
                    }
                }
                Ok(out)
            }
        }
    }
}

/// Every identifier a `Variable`'s left-hand side binds, in no particular
/// order — used to register each one as a named export for `export const
/// ... = ...;` (including destructured exports, which bind more than one
/// name at once).
fn bound_names(left: &eco_par::ast::VariableLeft) -> Vec<Symbol> {
    use eco_par::ast::VariableLeft;
    match left {
        VariableLeft::Identifier(name) => vec![*name],
        VariableLeft::DestructureArray(elements) => {
            elements.iter().flatten().map(|el| el.name).collect()
        }
        VariableLeft::DestructureObject(elements) => elements.iter().map(|el| el.name).collect(),
    }
}

impl Bundler {
    /// The skeleton template (spec §4.5/§6), with module bodies in
    /// insertion order and the entry canonical name substituted.
    fn emit_skeleton(&self, entry: &str) -> String {
        let modules = self
            .modules
            .iter()
            .map(|(name, factory)| {
                format!("  '{name}': {},", factory.as_deref().unwrap_or("(module) => {}"))
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "((modules) => {{\n  cached = {{}};\n  require = id => cached[id] ?? (cached[id] = {{ exports: {{}} }}, modules[id](cached[id], require), cached[id]).exports;\n  return require('{entry}');\n}})({{\n{modules}\n}})\n"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryResolver;

    #[test]
    fn bundles_acyclic_two_module_graph() {
        // Mirrors spec §8 scenario 7: a.eco imports b's default export,
        // re-exports it incremented by one.
        let files = || {
            MemoryResolver::new()
                .with_file("a.eco", "import x from './b.eco'; export default x + 1;")
                .with_file("b.eco", "export default 41;")
        };
        let mut bundler = Bundler::new(files(), files());
        let script = bundler.bundle(".", "./a.eco").unwrap();
        assert!(script.contains("__eco_require__('b.eco')"));
        assert!(script.contains("module.exports = x + 1;"));
        assert!(script.contains("require('a.eco')"));
    }

    #[test]
    fn named_export_aggregates_into_one_assignment() {
        let files = || MemoryResolver::new().with_file("a.eco", "export const x = 1; export const y = 2;");
        let mut bundler = Bundler::new(files(), files());
        let canonical = bundler.bundle_module(".", "./a.eco").unwrap();
        let body = bundler.modules.get(&canonical).unwrap().as_ref().unwrap();
        assert!(body.contains("module.exports = { x, y };"));
    }

    #[test]
    fn self_importing_cycle_terminates_and_emits_once() {
        let files = || MemoryResolver::new().with_file("a.eco", "import './a.eco';");
        let mut bundler = Bundler::new(files(), files());
        let script = bundler.bundle(".", "./a.eco").unwrap();
        assert_eq!(bundler.modules.len(), 1);
        assert!(script.contains("'a.eco'"));
    }

    #[test]
    fn bare_import_is_a_side_effect_only_require_call() {
        let files = || {
            MemoryResolver::new()
                .with_file("a.eco", "import './b.eco'; return 1;")
                .with_file("b.eco", "const noop = 1;")
        };
        let mut bundler = Bundler::new(files(), files());
        let canonical = bundler.bundle_module(".", "./a.eco").unwrap();
        let body = bundler.modules.get(&canonical).unwrap().as_ref().unwrap();
        assert!(body.contains("__eco_require__('b.eco');"));
    }
}
