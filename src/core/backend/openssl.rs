//! OpenSSL backend.
//!
//! Drives the `openssl` CLI:
//!
//! ```text
//! openssl genpkey <algorithm args> -aes-256-cbc -pass env:KEYSMITH_PASSPHRASE -out <private>
//! openssl pkey -in <private> -passin env:KEYSMITH_PASSPHRASE -pubout [-out <public>]
//! ```
//!
//! The passphrase is set only in the child's environment, so it never shows
//! up in argv or in our own environment.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tracing::{debug, trace};

use super::Backend;
use crate::core::algorithm::Algorithm;
use crate::core::constants::BACKEND_PASSPHRASE_ENV;
use crate::core::secret::Passphrase;
use crate::error::{BackendError, Result};

/// Symmetric cipher protecting the private key at rest.
const PRIVATE_KEY_CIPHER: &str = "-aes-256-cbc";

/// OpenSSL backend using the openssl CLI
#[derive(Debug, Clone, Default)]
pub struct OpenSsl {
    binary: Option<PathBuf>,
}

impl OpenSsl {
    /// Use `binary` if given, otherwise look up `openssl` on `PATH` at first use.
    pub fn new(binary: Option<PathBuf>) -> Self {
        Self { binary }
    }

    /// Resolve the executable to run.
    fn program(&self) -> Result<PathBuf> {
        match &self.binary {
            Some(path) => Ok(path.clone()),
            None => which::which("openssl")
                .map_err(|_| BackendError::NotFound("openssl".to_string()).into()),
        }
    }

    /// Run openssl with `args`, passing the passphrase through the child env.
    fn run(&self, step: &'static str, args: &[OsString], passphrase: &Passphrase) -> Result<Output> {
        let program = self.program()?;
        trace!(program = %program.display(), step, "running openssl");

        let output = Command::new(&program)
            .args(args)
            .env(BACKEND_PASSPHRASE_ENV, passphrase.expose())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| {
                let program = program.display().to_string();
                if source.kind() == ErrorKind::NotFound {
                    BackendError::NotFound(program)
                } else {
                    BackendError::Spawn { program, source }
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let diagnostic = match stderr.trim() {
                "" => format!("openssl exited with {}", output.status),
                text => passphrase.redact(text),
            };
            return Err(BackendError::Failed { step, diagnostic }.into());
        }

        debug!(step, "openssl succeeded");
        Ok(output)
    }
}

fn genpkey_args(algorithm: Algorithm, out: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["genpkey".into()];
    args.extend(algorithm.genpkey_args().iter().map(OsString::from));
    args.push(PRIVATE_KEY_CIPHER.into());
    args.push("-pass".into());
    args.push(format!("env:{}", BACKEND_PASSPHRASE_ENV).into());
    args.push("-out".into());
    args.push(out.into());
    args
}

fn pubout_args(private_key: &Path, out: Option<&Path>) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "pkey".into(),
        "-in".into(),
        private_key.into(),
        "-passin".into(),
        format!("env:{}", BACKEND_PASSPHRASE_ENV).into(),
        "-pubout".into(),
    ];
    if let Some(out) = out {
        args.push("-out".into());
        args.push(out.into());
    }
    args
}

impl Backend for OpenSsl {
    fn generate_private_key(
        &self,
        algorithm: Algorithm,
        passphrase: &Passphrase,
        out: &Path,
    ) -> Result<()> {
        debug!(%algorithm, out = %out.display(), "generating private key");
        self.run(
            "private key generation",
            &genpkey_args(algorithm, out),
            passphrase,
        )?;
        Ok(())
    }

    fn derive_public_key(
        &self,
        private_key: &Path,
        passphrase: &Passphrase,
        out: &Path,
    ) -> Result<()> {
        debug!(out = %out.display(), "deriving public key");
        self.run(
            "public key derivation",
            &pubout_args(private_key, Some(out)),
            passphrase,
        )?;
        Ok(())
    }

    fn public_key_pem(&self, private_key: &Path, passphrase: &Passphrase) -> Result<String> {
        let output = self.run(
            "private key decryption",
            &pubout_args(private_key, None),
            passphrase,
        )?;
        String::from_utf8(output.stdout).map_err(|e| {
            BackendError::Failed {
                step: "private key decryption",
                diagnostic: format!("non UTF-8 output: {}", e),
            }
            .into()
        })
    }

    fn name(&self) -> &'static str {
        "openssl"
    }
}
