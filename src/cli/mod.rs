//! Command-line interface.

pub mod output;
pub mod report;

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::core::algorithm::Algorithm;
use crate::core::backend::OpenSsl;
use crate::core::constants;
use crate::core::env::ParseMode;
use crate::core::provision::{Provisioner, Request};
use crate::core::validation;
use crate::error::{BackendError, ConfigError, Error, Result, SecretError};

const AFTER_HELP: &str = "\
Exit codes:
  0  keys generated, or already present
  2  usage error
  3  configuration file missing, unreadable or malformed
  4  passphrase variable missing or empty
  5  filesystem error
  6  openssl failed
  7  private key does not match public key (--verify)";

/// Keysmith - provision a passphrase-protected signing key pair.
#[derive(Parser, Debug)]
#[command(
    name = "keysmith",
    about = "Provision a passphrase-protected signing key pair",
    version,
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// Overwrite an existing key pair
    #[arg(short, long)]
    pub force: bool,

    /// Key algorithm
    #[arg(short, long, value_enum, env = "KEYSMITH_ALGORITHM", default_value_t = Algorithm::default())]
    pub algorithm: Algorithm,

    /// Directory holding the key pair
    #[arg(short, long, env = "KEYSMITH_KEYS_DIR", default_value = constants::KEYS_DIR)]
    pub keys_dir: PathBuf,

    /// Configuration file holding the passphrase
    #[arg(short, long, env = "KEYSMITH_ENV_FILE", default_value = constants::ENV_FILE)]
    pub env_file: PathBuf,

    /// Configuration variable holding the passphrase
    #[arg(long, env = "KEYSMITH_SECRET_VAR", default_value = constants::PASSPHRASE_VAR)]
    pub secret_var: String,

    /// Path to the openssl executable (default: openssl on PATH)
    #[arg(long, env = "KEYSMITH_OPENSSL")]
    pub openssl: Option<PathBuf>,

    /// Fail on malformed configuration lines instead of skipping them
    #[arg(long)]
    pub strict: bool,

    /// Check that the private key decrypts and matches the public key
    #[arg(long)]
    pub verify: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the provisioning request from parsed arguments.
    pub fn request(&self) -> Result<Request> {
        validation::validate_var_name(&self.secret_var)?;

        Ok(Request {
            keys_dir: self.keys_dir.clone(),
            env_file: self.env_file.clone(),
            secret_var: self.secret_var.clone(),
            algorithm: self.algorithm,
            force: self.force,
            parse_mode: if self.strict {
                ParseMode::Strict
            } else {
                ParseMode::Lenient
            },
            verify: self.verify,
        })
    }
}

/// Run the provisioner and print its report.
pub fn execute(cli: &Cli) -> Result<()> {
    let request = cli.request()?;
    let provisioner = Provisioner::new(OpenSsl::new(cli.openssl.clone()));

    info!(keys_dir = %request.keys_dir.display(), force = request.force, "provisioning keys");
    let outcome = provisioner.run(&request)?;

    report::print(&outcome, cli.json)
}

/// Suggested next step for an error, if there is an obvious one.
pub fn hint(err: &Error, cli: &Cli) -> Option<String> {
    match err {
        Error::Config(ConfigError::NotFound(_)) => {
            Some("create the file or pass --env-file <PATH>".to_string())
        }
        Error::Config(ConfigError::Malformed { .. }) => {
            Some("fix the line or drop --strict to skip it".to_string())
        }
        Error::Secret(SecretError::Missing(var) | SecretError::Empty(var)) => Some(format!(
            "add {}=<passphrase> to {}",
            var,
            cli.env_file.display()
        )),
        Error::Backend(BackendError::Mismatch(_)) => {
            Some("run with --force to generate a fresh key pair".to_string())
        }
        _ => None,
    }
}
