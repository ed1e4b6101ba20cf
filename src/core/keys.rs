//! Keys directory layout and existing-key state.
//!
//! The directory holds exactly two artifacts: the encrypted private key and
//! the public key. Only their presence is inspected, never their contents.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::core::constants;
use crate::error::{FsError, Result};

/// Which of the two artifacts a partial directory still holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Artifact {
    PrivateKey,
    PublicKey,
}

/// Existing-key state of the keys directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "state", content = "present")]
pub enum KeyState {
    /// Neither file exists.
    Absent,
    /// Exactly one file exists; a prior run did not finish.
    Partial(Artifact),
    /// Both files exist.
    Complete,
}

impl std::fmt::Display for KeyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyState::Absent => f.write_str("absent"),
            KeyState::Partial(Artifact::PrivateKey) => f.write_str("partial (private key only)"),
            KeyState::Partial(Artifact::PublicKey) => f.write_str("partial (public key only)"),
            KeyState::Complete => f.write_str("complete"),
        }
    }
}

/// Paths of the key pair artifact set.
#[derive(Debug, Clone)]
pub struct KeyPaths {
    dir: PathBuf,
    private_key: PathBuf,
    public_key: PathBuf,
}

impl KeyPaths {
    /// Artifact paths under `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            private_key: dir.join(constants::PRIVATE_KEY_FILE),
            public_key: dir.join(constants::PUBLIC_KEY_FILE),
            dir,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn private_key(&self) -> &Path {
        &self.private_key
    }

    pub fn public_key(&self) -> &Path {
        &self.public_key
    }

    /// Staging path for the private key.
    pub fn staged_private_key(&self) -> PathBuf {
        hidden_path(&self.dir, constants::PRIVATE_KEY_FILE, constants::STAGING_SUFFIX)
    }

    /// Staging path for the public key.
    pub fn staged_public_key(&self) -> PathBuf {
        hidden_path(&self.dir, constants::PUBLIC_KEY_FILE, constants::STAGING_SUFFIX)
    }

    /// Where the current private key is parked while a new one is promoted.
    pub fn backup_private_key(&self) -> PathBuf {
        hidden_path(&self.dir, constants::PRIVATE_KEY_FILE, constants::BACKUP_SUFFIX)
    }

    /// Determine which artifacts already exist.
    pub fn state(&self) -> KeyState {
        let state = match (self.private_key.exists(), self.public_key.exists()) {
            (false, false) => KeyState::Absent,
            (true, false) => KeyState::Partial(Artifact::PrivateKey),
            (false, true) => KeyState::Partial(Artifact::PublicKey),
            (true, true) => KeyState::Complete,
        };
        debug!(dir = %self.dir.display(), %state, "checked existing keys");
        state
    }
}

/// `<dir>/.<file><suffix>`: hidden, and never mistaken for a real artifact.
fn hidden_path(dir: &Path, file: &str, suffix: &str) -> PathBuf {
    dir.join(format!(".{}{}", file, suffix))
}

/// Create the keys directory if it does not exist.
///
/// # Errors
///
/// Returns `FsError::CreateDir` on permission or I/O failure.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }

    fs::create_dir_all(dir).map_err(|source| FsError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    debug!(dir = %dir.display(), "created keys directory");
    Ok(())
}

/// Remove a file if it exists.
pub fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(FsError::Remove {
            path: path.to_path_buf(),
            source,
        }
        .into()),
    }
}

/// Create an empty file readable by its owner only (Unix), truncating any
/// existing one. The backend then writes the private key into it, so the key
/// is never on disk with wider permissions.
pub fn create_private_file(path: &Path) -> Result<()> {
    let write_err = |source| FsError::Write {
        path: path.to_path_buf(),
        source,
    };

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;

        fs::OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .mode(0o600)
            .open(path)
            .map_err(write_err)?;
    }

    #[cfg(not(unix))]
    {
        fs::File::create(path).map_err(write_err)?;
    }

    // The mode only applies on creation.
    restrict_permissions(path)
}

/// Restrict a private key file to its owner (Unix only).
pub fn restrict_permissions(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|source| {
            FsError::Write {
                path: path.to_path_buf(),
                source,
            }
        })?;
    }

    #[cfg(not(unix))]
    let _ = path;

    Ok(())
}

/// SHA-256 fingerprint of a public key file, as lowercase hex.
pub fn fingerprint(path: &Path) -> Result<String> {
    let contents = fs::read(path).map_err(|source| FsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let digest = Sha256::digest(&contents);
    Ok(digest.iter().map(|b| format!("{:02x}", b)).collect())
}
