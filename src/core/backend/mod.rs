//! Cryptographic backend.
//!
//! Key generation, private key encryption and public key derivation are
//! delegated to a trusted external toolkit. The provisioner only sees
//! pass/fail plus diagnostic text.
//!
//! ## Backends
//!
//! - **openssl**: the `openssl` command-line program (default).
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Backend` trait
//! 2. Add the implementation in a new file next to `openssl.rs`
//! 3. Re-export from this module

use std::path::Path;

use crate::core::algorithm::Algorithm;
use crate::core::secret::Passphrase;
use crate::error::Result;

mod openssl;

pub use openssl::OpenSsl;

/// External key toolkit.
pub trait Backend {
    /// Generate a private key for `algorithm`, encrypted under `passphrase`
    /// with a 256-bit symmetric cipher, and write it to `out`.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` with the toolkit's diagnostic attached.
    fn generate_private_key(
        &self,
        algorithm: Algorithm,
        passphrase: &Passphrase,
        out: &Path,
    ) -> Result<()>;

    /// Decrypt `private_key` in memory and write its public key to `out`.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` with the toolkit's diagnostic attached.
    fn derive_public_key(&self, private_key: &Path, passphrase: &Passphrase, out: &Path)
        -> Result<()>;

    /// Decrypt `private_key` and return its public key PEM.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the key cannot be decrypted.
    fn public_key_pem(&self, private_key: &Path, passphrase: &Passphrase) -> Result<String>;

    /// Backend name for display.
    fn name(&self) -> &'static str;
}
