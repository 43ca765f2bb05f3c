//! Minimal command trait shared by the CLI's subcommand handlers,
//! trimmed down from `faxt`'s fuller `Command`/`CommandDescription` pair
//! to the part these subcommands actually use.

use crate::error::Result;

pub trait Command {
    type Args;

    fn new(args: Self::Args) -> Self;

    fn run(&self) -> Result<()>;
}
