//! `ecoc check` — parse only, reporting diagnostics without evaluating.

use std::path::PathBuf;

use eco_par::Diagnostic;

use crate::commands::traits::Command;
use crate::error::{EcocError, Result};

#[derive(Debug, Clone)]
pub struct CheckArgs {
    pub file: PathBuf,
}

pub struct CheckCommand {
    args: CheckArgs,
}

impl Command for CheckCommand {
    type Args = CheckArgs;

    fn new(args: CheckArgs) -> Self {
        Self { args }
    }

    fn run(&self) -> Result<()> {
        let source = std::fs::read_to_string(&self.args.file)?;
        match eco_par::parse(&source) {
            Ok(program) => {
                println!("OK: {} ({} top-level statements)", self.args.file.display(), program.len());
                Ok(())
            }
            Err(err) => {
                eprintln!("{}", Diagnostic(&err));
                Err(EcocError::Parse(err))
            }
        }
    }
}

pub fn run_check(args: CheckArgs) -> Result<()> {
    CheckCommand::new(args).run()
}
