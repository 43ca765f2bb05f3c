//! `ecoc run` — parse and evaluate a script, printing its result.

use std::path::PathBuf;

use eco_eval::run_program;
use eco_par::Diagnostic;
use eco_rt::{Runtime, RuntimeError};

use crate::commands::traits::Command;
use crate::error::{EcocError, Result};

#[derive(Debug, Clone)]
pub struct RunArgs {
    pub file: PathBuf,
    pub verbose: bool,
}

pub struct RunCommand {
    args: RunArgs,
}

impl Command for RunCommand {
    type Args = RunArgs;

    fn new(args: RunArgs) -> Self {
        Self { args }
    }

    fn run(&self) -> Result<()> {
        let source = std::fs::read_to_string(&self.args.file)?;
        let program = eco_par::parse(&source).map_err(|e| {
            eprintln!("{}", Diagnostic(&e));
            EcocError::Parse(e)
        })?;

        let runtime = Runtime::new();
        match run_program(&program, &runtime) {
            Ok(value) => {
                if self.args.verbose {
                    eprintln!("evaluated {}", self.args.file.display());
                }
                println!("{}", value.to_display_string());
                Ok(())
            }
            Err(RuntimeError::Thrown(value)) => {
                eprintln!("uncaught exception: {}", value.to_display_string());
                Err(RuntimeError::Thrown(value).into())
            }
            Err(err) => Err(err.into()),
        }
    }
}

pub fn run_run(args: RunArgs) -> Result<()> {
    RunCommand::new(args).run()
}
