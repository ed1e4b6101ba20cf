//! Core library components.
//!
//! This module contains the provisioning policy and its collaborators:
//! configuration loading, passphrase handling, key state and the
//! cryptographic backend.

pub mod algorithm;
pub mod backend;
pub mod constants;
pub mod env;
pub mod keys;
pub mod policy;
pub mod provision;
pub mod secret;
pub mod validation;
