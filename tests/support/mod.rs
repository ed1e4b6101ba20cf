//! Test support utilities for keysmith integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with an isolated project directory.
///
/// Child processes run with `.current_dir()` set to the project directory,
/// so the default `.env` and `keys/` paths resolve inside it and tests can
/// run in parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Create a test environment with a `.env` holding `content`.
    pub fn with_env(content: &str) -> Self {
        let t = Self::new();
        t.write_env(content);
        t
    }

    /// Create a test environment with the standard passphrase configured.
    pub fn configured() -> Self {
        Self::with_env(VALID_ENV)
    }

    /// Write (or replace) the project `.env`.
    pub fn write_env(&self, content: &str) {
        fs::write(self.dir.path().join(".env"), content).expect("failed to write .env");
    }

    /// The default keys directory.
    pub fn keys_dir(&self) -> PathBuf {
        self.dir.path().join("keys")
    }

    /// The encrypted private key path.
    pub fn private_key(&self) -> PathBuf {
        self.keys_dir().join("private_key.pem.enc")
    }

    /// The public key path.
    pub fn public_key(&self) -> PathBuf {
        self.keys_dir().join("public_key.pem")
    }

    /// Names of all entries in the keys directory, sorted.
    pub fn key_files(&self) -> Vec<String> {
        let mut names: Vec<String> = match fs::read_dir(self.keys_dir()) {
            Ok(entries) => entries
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }

    /// Write a pre-existing key pair with the given contents.
    pub fn write_pair(&self, private: &str, public: &str) {
        fs::create_dir_all(self.keys_dir()).unwrap();
        fs::write(self.private_key(), private).unwrap();
        fs::write(self.public_key(), public).unwrap();
    }

    /// Install an executable fake `openssl` script and return its path.
    #[cfg(unix)]
    pub fn fake_openssl(&self, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.dir.path().join("fake-openssl");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }
}
