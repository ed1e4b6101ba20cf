//! Input validation for command-line values.

use crate::error::{Error, Result};

/// Validate a configuration variable name.
///
/// Variable names must be valid environment variable names:
/// - Only A-Z, a-z, 0-9, and underscore
/// - Cannot start with a digit
/// - Cannot be empty
///
/// # Errors
///
/// Returns `Error::Usage` if the name is invalid.
pub fn validate_var_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::Usage("variable name cannot be empty".to_string()));
    }

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(Error::Usage(format!(
            "invalid variable name '{}': cannot start with a digit",
            name
        )));
    }

    for (i, ch) in name.chars().enumerate() {
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            return Err(Error::Usage(format!(
                "invalid variable name '{}': invalid character '{}' at position {}",
                name,
                ch,
                i + 1
            )));
        }
    }

    Ok(())
}
