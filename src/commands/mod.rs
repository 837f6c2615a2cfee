mod inspect;
mod render;
mod trace;
mod utils;

use crate::cli::{Cli, Commands, GlobalOptions};
use tagtrace::TagTraceResult;

/// The main function to run the command based on CLI input.
pub fn run(cli: Cli) -> TagTraceResult<()> {
    let Cli { global, command } = cli;
    dispatch(&global, command)
}

/// Dispatch the command to the appropriate handler.
fn dispatch(global: &GlobalOptions, command: Commands) -> TagTraceResult<()> {
    match command {
        Commands::Trace(cmd) => trace::run(global, cmd),
        Commands::Render(cmd) => render::run(global, cmd),
        Commands::Inspect(cmd) => inspect::run(global, cmd),
    }
}
