//! Error types for keysmith.
//!
//! Every fatal condition maps to a distinct process exit code. Messages name
//! the failing precondition (a path, a variable name, a backend step) and
//! never carry secret material.

use std::path::PathBuf;
use thiserror::Error;

use crate::core::constants::exit;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("usage: {0}")]
    Usage(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Fs(#[from] FsError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("failed to write report: {0}")]
    Report(#[from] serde_json::Error),
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read configuration file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration line {line} in {}: expected KEY=VALUE", .path.display())]
    Malformed { path: PathBuf, line: usize },
}

/// Passphrase lookup errors.
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("passphrase variable {0} is not set in the configuration file")]
    Missing(String),

    #[error("passphrase variable {0} is empty")]
    Empty(String),
}

/// Keys directory errors.
#[derive(Error, Debug)]
pub enum FsError {
    #[error("failed to create keys directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to move {} into place: {source}", .path.display())]
    Rename {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Cryptographic backend errors.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("{0} not found; install OpenSSL or pass --openssl <PATH>")]
    NotFound(String),

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{step} failed: {diagnostic}")]
    Failed { step: &'static str, diagnostic: String },

    #[error("private key does not match public key {}", .0.display())]
    Mismatch(PathBuf),
}

impl Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) => exit::USAGE,
            Error::Config(_) => exit::CONFIG,
            Error::Secret(_) => exit::SECRET,
            Error::Fs(_) | Error::Report(_) => exit::FILESYSTEM,
            Error::Backend(BackendError::Mismatch(_)) => exit::VERIFY,
            Error::Backend(_) => exit::BACKEND,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
