//! Command-line interface.

pub mod check;
pub mod completions;
pub mod context;
pub mod output;
pub mod plan;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::core::context::Params;
use crate::core::reference::Lookup;

/// stackplan - resolve what the Device Manager API stack must declare.
#[derive(Parser)]
#[command(
    name = "stackplan",
    about = "Resolve deployment context, network and database credentials for the Device Manager API stack",
    version,
    after_help = "Example: stackplan -c env=prod -c prefix=ACME -c config_filepath=configs/prod.json plan"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Context parameter as key=value (env, prefix, config_filepath)
    #[arg(short = 'c', long = "context", global = true, value_name = "KEY=VALUE")]
    pub context: Vec<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Resolve and print the full provisioning plan
    Plan {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Show sensitive values instead of masking them
        #[arg(long)]
        reveal: bool,
        /// Fail when database credentials are incomplete
        #[arg(long, env = "STACKPLAN_STRICT")]
        strict: bool,
        /// How exposed parameters are resolved
        #[arg(long, value_enum, default_value_t = Lookup::Dynamic)]
        lookup: Lookup,
    },

    /// Show the resolved deployment context
    Context {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the configuration without printing the plan
    Check {
        /// Fail when database credentials are incomplete
        #[arg(long, env = "STACKPLAN_STRICT")]
        strict: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Execute a command.
pub fn execute(command: Command, pairs: &[String]) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Plan {
            json,
            reveal,
            strict,
            lookup,
        } => plan::execute(Params::parse(pairs)?, json, reveal, strict, lookup),
        Context { json } => context::execute(Params::parse(pairs)?, json),
        Check { strict } => check::execute(Params::parse(pairs)?, strict),
        Completions { shell } => completions::execute(shell),
    }
}
