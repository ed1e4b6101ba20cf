//! Keysmith - provision a passphrase-protected signing key pair.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── output        # Terminal output helpers
//! │   └── report        # Human / JSON outcome report
//! └── core/             # Core library components
//!     ├── env           # .env configuration store
//!     ├── secret        # Passphrase handling
//!     ├── algorithm     # Key algorithm selection
//!     ├── keys          # Keys directory and existing-key state
//!     ├── policy        # Generate / repair / rotate / skip
//!     ├── backend/      # Cryptographic backends
//!     │   ├── mod       # Backend trait
//!     │   └── openssl   # openssl CLI implementation
//!     └── provision     # The provisioning workflow
//! ```
//!
//! # Behaviour
//!
//! - Never overwrites a complete key pair without `--force`
//! - Always repairs a half-written pair
//! - Writes both files or neither
//! - Never prints, logs or passes the passphrase on a command line

pub mod cli;
pub mod core;
pub mod error;
