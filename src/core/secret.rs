//! Passphrase handling.
//!
//! The passphrase lives in zeroize-on-drop memory, has no `Display`, and
//! redacts itself in `Debug`. It leaves the process only as an environment
//! variable on the backend child.

use zeroize::Zeroizing;

use crate::core::env::EnvFile;
use crate::error::{Result, SecretError};

const REDACTED: &str = "***";

/// Passphrase protecting the private key.
pub struct Passphrase(Zeroizing<String>);

impl Passphrase {
    /// Look up the passphrase variable in the configuration store.
    ///
    /// # Errors
    ///
    /// `SecretError::Missing` if the variable is absent, `SecretError::Empty`
    /// if it is blank. Neither carries the value.
    pub fn from_env(env: &EnvFile, variable: &str) -> Result<Self> {
        let value = env
            .get(variable)
            .ok_or_else(|| SecretError::Missing(variable.to_string()))?;

        if value.trim().is_empty() {
            return Err(SecretError::Empty(variable.to_string()).into());
        }

        Ok(Self(Zeroizing::new(value.to_string())))
    }

    /// Expose the secret for handing to the backend.
    pub(crate) fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Replace every occurrence of the passphrase in `text`.
    ///
    /// Applied to backend diagnostics before they reach an error message.
    pub fn redact(&self, text: &str) -> String {
        text.replace(self.expose(), REDACTED)
    }
}

impl std::fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Passphrase({})", REDACTED)
    }
}

#[cfg(test)]
impl From<&str> for Passphrase {
    fn from(value: &str) -> Self {
        Self(Zeroizing::new(value.to_string()))
    }
}
