//! stackplan - resolve what the Device Manager API stack must declare.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use stackplan::cli::output;
use stackplan::cli::{execute, Cli};
use stackplan::error::{ConfigError, ContextError, CredentialError, Error};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("STACKPLAN_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("stackplan=debug")
        } else {
            EnvFilter::new("stackplan=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli.command, &cli.context) {
        let suggestion = match &e {
            Error::Context(ContextError::Missing { .. }) => Some("run: stackplan -c env=dev plan"),
            Error::Context(ContextError::MalformedParam(_)) => Some("context parameters look like: -c prefix=ACME"),
            Error::Config(ConfigError::NotFound { .. }) => {
                Some("check the path passed with -c config_filepath=<path>")
            }
            Error::Credentials(CredentialError::MissingParameterName { .. }) => {
                Some("add \"parameter_name\" under database.credentials")
            }
            Error::Credentials(CredentialError::Incomplete(_)) => {
                Some("set the missing values or drop --strict")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
