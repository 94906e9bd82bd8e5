use std::io;

use clap::CommandFactory;
use clap_complete::Shell;
use eyre::Result;

use super::Cli;

/// Write a completion script for `shell` to stdout.
pub fn print_completions(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "breath", &mut io::stdout());
    Ok(())
}
