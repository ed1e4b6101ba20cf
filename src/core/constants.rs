//! Constants used throughout keysmith.
//!
//! Centralizes file names, variable names and exit codes.

/// Default configuration file name (.env).
pub const ENV_FILE: &str = ".env";

/// Default keys directory, relative to the working directory.
pub const KEYS_DIR: &str = "keys";

/// Encrypted private key file name inside the keys directory.
pub const PRIVATE_KEY_FILE: &str = "private_key.pem.enc";

/// Public key file name inside the keys directory.
pub const PUBLIC_KEY_FILE: &str = "public_key.pem";

/// Configuration variable holding the private key passphrase.
pub const PASSPHRASE_VAR: &str = "SIGNATURE_KEY_PASSWORD";

/// Environment variable used to hand the passphrase to the openssl child.
///
/// Set on the child process only, never on our own environment.
pub const BACKEND_PASSPHRASE_ENV: &str = "KEYSMITH_PASSPHRASE";

/// Log filter environment variable.
pub const LOG_ENV: &str = "KEYSMITH_LOG";

/// Suffix for files staged before they are moved into place.
pub const STAGING_SUFFIX: &str = ".staging";

/// Suffix for the previous private key while a rotation is in flight.
pub const BACKUP_SUFFIX: &str = ".previous";

/// Process exit codes.
pub mod exit {
    /// Success or intentional no-op.
    pub const SUCCESS: i32 = 0;
    /// Invalid command-line usage.
    pub const USAGE: i32 = 2;
    /// Configuration file missing, unreadable or malformed.
    pub const CONFIG: i32 = 3;
    /// Passphrase variable missing or empty.
    pub const SECRET: i32 = 4;
    /// Keys directory could not be created or written.
    pub const FILESYSTEM: i32 = 5;
    /// The cryptographic backend failed.
    pub const BACKEND: i32 = 6;
    /// Private key does not match the public key.
    pub const VERIFY: i32 = 7;
}
