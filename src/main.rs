//! Keysmith - provision a passphrase-protected signing key pair.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use keysmith::cli::{self, output, Cli};
use keysmith::core::constants::{exit, LOG_ENV};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too and are not failures.
            let code = if e.use_stderr() {
                exit::USAGE
            } else {
                exit::SUCCESS
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("keysmith=debug")
        } else {
            EnvFilter::new("keysmith=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = cli::execute(&cli) {
        output::error(&e.to_string());
        if let Some(hint) = cli::hint(&e, &cli) {
            output::hint(&hint);
        }
        std::process::exit(e.exit_code());
    }
}
