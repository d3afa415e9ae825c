//! Shell completion scripts.

use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Write;

use crate::cli::Cli;
use crate::error::Result;

/// Print the completion script for `shell` to stdout.
pub fn execute(shell: Shell) -> Result<()> {
    render(shell, &mut std::io::stdout())
}

/// Write the completion script for `shell` to `out`.
pub fn render(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin_name, out);
    Ok(())
}
