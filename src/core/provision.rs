//! Key provisioning workflow.
//!
//! Loads the configuration, extracts the passphrase, inspects the keys
//! directory, applies the policy and, when needed, generates a new pair.
//!
//! Generation is all-or-nothing. The backend writes into hidden staging
//! files; only when both the private and the public key exist are they
//! renamed over the real names. Any failure removes the staging files, so a
//! failed run never leaves a new dangling key behind. An existing private key
//! is parked under a hidden backup name while the new pair is promoted and
//! put back if promotion fails, so a pre-existing pair survives too.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::algorithm::Algorithm;
use crate::core::backend::Backend;
use crate::core::env::{EnvFile, ParseMode};
use crate::core::keys::{self, KeyPaths, KeyState};
use crate::core::policy::{self, Action, Reason};
use crate::core::secret::Passphrase;
use crate::error::{BackendError, FsError, Result};

/// Inputs for one provisioning run.
#[derive(Debug, Clone)]
pub struct Request {
    pub keys_dir: PathBuf,
    pub env_file: PathBuf,
    pub secret_var: String,
    pub algorithm: Algorithm,
    pub force: bool,
    pub parse_mode: ParseMode,
    pub verify: bool,
}

/// Result of a successful run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Outcome {
    /// A new pair was written.
    Generated {
        algorithm: Algorithm,
        reason: Reason,
        previous: KeyState,
        private_key: PathBuf,
        public_key: PathBuf,
        fingerprint: String,
        verified: bool,
    },
    /// A complete pair already existed and nothing was written.
    AlreadyProvisioned {
        private_key: PathBuf,
        public_key: PathBuf,
        /// `None` when the existing public key cannot be read.
        fingerprint: Option<String>,
        verified: bool,
    },
}

/// Runs the provisioning workflow against a backend.
pub struct Provisioner<B> {
    backend: B,
}

impl<B: Backend> Provisioner<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Provision keys as described by `request`.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error. Configuration and passphrase problems
    /// are detected before anything touches the filesystem.
    pub fn run(&self, request: &Request) -> Result<Outcome> {
        let passphrase = {
            let env = EnvFile::load(&request.env_file, request.parse_mode)?;
            Passphrase::from_env(&env, &request.secret_var)?
        };
        debug!(variable = %request.secret_var, "passphrase loaded");

        keys::ensure_dir(&request.keys_dir)?;
        let paths = KeyPaths::new(&request.keys_dir);
        let existing = paths.state();

        match policy::decide(existing, request.force) {
            Action::Skip => {
                info!(dir = %paths.dir().display(), "keys already exist, nothing to do");
                if request.verify {
                    self.verify(&paths, &passphrase)?;
                }
                let fingerprint = match keys::fingerprint(paths.public_key()) {
                    Ok(fingerprint) => Some(fingerprint),
                    Err(e) => {
                        warn!(error = %e, "could not fingerprint existing public key");
                        None
                    }
                };
                Ok(Outcome::AlreadyProvisioned {
                    private_key: paths.private_key().to_path_buf(),
                    public_key: paths.public_key().to_path_buf(),
                    fingerprint,
                    verified: request.verify,
                })
            }
            Action::Generate(reason) => {
                if reason == Reason::Repair {
                    warn!(state = %existing, "incomplete key pair found, regenerating");
                }
                info!(algorithm = %request.algorithm, ?reason, backend = self.backend.name(), "generating key pair");

                self.generate(request.algorithm, &passphrase, &paths)?;
                if request.verify {
                    self.verify(&paths, &passphrase)?;
                }

                Ok(Outcome::Generated {
                    algorithm: request.algorithm,
                    reason,
                    previous: existing,
                    private_key: paths.private_key().to_path_buf(),
                    public_key: paths.public_key().to_path_buf(),
                    fingerprint: keys::fingerprint(paths.public_key())?,
                    verified: request.verify,
                })
            }
        }
    }

    /// Generate a pair into staging files, then move both into place.
    pub fn generate(
        &self,
        algorithm: Algorithm,
        passphrase: &Passphrase,
        paths: &KeyPaths,
    ) -> Result<()> {
        let staged_private = paths.staged_private_key();
        let staged_public = paths.staged_public_key();
        let backup = paths.backup_private_key();

        // Left over from a run that was killed mid-way.
        keys::remove_if_exists(&staged_private)?;
        keys::remove_if_exists(&staged_public)?;
        keys::remove_if_exists(&backup)?;

        let staging = Staging::new(vec![staged_private.clone(), staged_public.clone()]);

        keys::create_private_file(&staged_private)?;
        self.backend
            .generate_private_key(algorithm, passphrase, &staged_private)?;
        keys::restrict_permissions(&staged_private)?;
        self.backend
            .derive_public_key(&staged_private, passphrase, &staged_public)?;

        let parked = paths.private_key().exists();
        if parked {
            promote(paths.private_key(), &backup)?;
        }

        let promoted = promote(&staged_private, paths.private_key())
            .and_then(|()| promote(&staged_public, paths.public_key()));
        if let Err(e) = promoted {
            if parked {
                // Puts the old private key back over the unmatched new one.
                if let Err(restore) = promote(&backup, paths.private_key()) {
                    warn!(error = %restore, backup = %backup.display(), "failed to restore previous private key");
                }
            } else if let Err(cleanup) = keys::remove_if_exists(paths.private_key()) {
                warn!(error = %cleanup, "failed to remove unmatched private key");
            }
            return Err(e);
        }

        staging.commit();
        if parked {
            if let Err(e) = keys::remove_if_exists(&backup) {
                warn!(error = %e, "failed to remove previous private key");
            }
        }
        debug!(dir = %paths.dir().display(), "key pair moved into place");
        Ok(())
    }

    /// Check that the private key decrypts and matches the public key.
    pub fn verify(&self, paths: &KeyPaths, passphrase: &Passphrase) -> Result<()> {
        let derived = self.backend.public_key_pem(paths.private_key(), passphrase)?;
        let on_disk = fs::read_to_string(paths.public_key()).map_err(|source| FsError::Read {
            path: paths.public_key().to_path_buf(),
            source,
        })?;

        if derived.trim() != on_disk.trim() {
            return Err(BackendError::Mismatch(paths.public_key().to_path_buf()).into());
        }

        debug!("private key matches public key");
        Ok(())
    }
}

fn promote(staged: &Path, target: &Path) -> Result<()> {
    fs::rename(staged, target).map_err(|source| {
        FsError::Rename {
            path: target.to_path_buf(),
            source,
        }
        .into()
    })
}

/// Removes staged files on drop unless committed.
struct Staging {
    files: Vec<PathBuf>,
    committed: bool,
}

impl Staging {
    fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files,
            committed: false,
        }
    }

    fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for Staging {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        for file in &self.files {
            if let Err(e) = keys::remove_if_exists(file) {
                warn!(error = %e, "failed to clean up staged key file");
            }
        }
    }
}
