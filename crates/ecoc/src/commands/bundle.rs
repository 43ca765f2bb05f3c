//! `ecoc bundle` — bundle an entry module and print or write the emitted
//! script. `minify` is a CLI-layer post-process over the emitted text
//! (string-literal-aware whitespace collapsing), not a second code path
//! through the bundler itself — the bundler always emits the same
//! one-statement-per-line form.

use std::path::PathBuf;

use eco_bundle::Bundler;

use crate::commands::fs_resolver::FsResolver;
use crate::commands::traits::Command;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct BundleArgs {
    pub entry: PathBuf,
    pub output: Option<PathBuf>,
    pub minify: bool,
}

pub struct BundleCommand {
    args: BundleArgs,
}

impl Command for BundleCommand {
    type Args = BundleArgs;

    fn new(args: BundleArgs) -> Self {
        Self { args }
    }

    fn run(&self) -> Result<()> {
        let entry_dir = self.args.entry.parent().unwrap_or_else(|| std::path::Path::new("."));
        let entry_file = self.args.entry.file_name().ok_or_else(|| {
            crate::error::EcocError::Config(format!("'{}' has no file name", self.args.entry.display()))
        })?;

        let mut bundler = Bundler::new(FsResolver, FsResolver);
        let script = bundler.bundle(&entry_dir.to_string_lossy(), &entry_file.to_string_lossy())?;
        let script = if self.args.minify { minify(&script) } else { script };

        match &self.args.output {
            Some(path) => std::fs::write(path, script)?,
            None => println!("{script}"),
        }
        Ok(())
    }
}

pub fn run_bundle(args: BundleArgs) -> Result<()> {
    BundleCommand::new(args).run()
}

/// Collapses runs of whitespace outside quoted strings into one space,
/// leaving string/template contents (including escaped quotes) untouched.
fn minify(script: &str) -> String {
    let mut out = String::with_capacity(script.len());
    let mut chars = script.chars().peekable();
    let mut quote: Option<char> = None;
    let mut last_was_space = false;
    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                out.push(c);
                if c == '\\' {
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                } else if c == q {
                    quote = None;
                }
                last_was_space = false;
            }
            None if c == '\'' || c == '"' || c == '`' => {
                quote = Some(c);
                out.push(c);
                last_was_space = false;
            }
            None if c.is_whitespace() => {
                if !last_was_space {
                    out.push(' ');
                    last_was_space = true;
                }
            }
            None => {
                out.push(c);
                last_was_space = false;
            }
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minify_collapses_whitespace_but_preserves_string_contents() {
        let script = "const x =\n  1;\nconst s = 'a  b\\nc';";
        let minified = minify(script);
        assert_eq!(minified, "const x = 1; const s = 'a  b\\nc';");
    }
}
