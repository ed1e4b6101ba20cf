//! Configuration store.
//!
//! Parses a dotenv-style file into an ordered key/value mapping. This is the
//! only place the passphrase is read from.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{ConfigError, Result};

/// How to treat lines that are not `KEY=VALUE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Skip malformed lines.
    #[default]
    Lenient,
    /// Fail on the first malformed line.
    Strict,
}

/// A parsed .env file
#[derive(Clone)]
pub struct EnvFile {
    entries: Vec<(String, String)>,
    path: PathBuf,
}

impl EnvFile {
    /// Parse an .env file from disk
    ///
    /// Skips empty lines and comments (lines whose first non-whitespace
    /// character is `#`). Accepts an optional `export ` prefix and values
    /// with or without quotes. A key assigned twice keeps its first position
    /// and takes the later value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist, and
    /// `ConfigError::Malformed` for a line without `=` in strict mode.
    pub fn load(path: impl AsRef<Path>, mode: ParseMode) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map(Zeroizing::new).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let mut env = Self {
            entries: Vec::new(),
            path: path.to_path_buf(),
        };

        let text = contents.strip_prefix('\u{feff}').unwrap_or(contents.as_str());

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = line.strip_prefix("export ").unwrap_or(line);

            match parse_assignment(line) {
                Some((key, value)) => env.insert(key, value),
                None if mode == ParseMode::Strict => {
                    return Err(ConfigError::Malformed {
                        path: path.to_path_buf(),
                        line: index + 1,
                    }
                    .into());
                }
                // Content may be a secret; only the line number is logged.
                None => debug!(line = index + 1, "skipping malformed configuration line"),
            }
        }

        debug!(path = %path.display(), entries = env.len(), "loaded configuration");
        Ok(env)
    }

    fn insert(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => {
                entry.1.zeroize();
                entry.1 = value;
            }
            None => self.entries.push((key, value)),
        }
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Key names in file order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

// Values are secrets; only key names are shown.
impl std::fmt::Debug for EnvFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvFile")
            .field("path", &self.path)
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Drop for EnvFile {
    fn drop(&mut self) {
        for (_, value) in &mut self.entries {
            value.zeroize();
        }
    }
}

fn parse_assignment(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || key.chars().any(char::is_whitespace) {
        return None;
    }
    Some((key.to_string(), parse_env_value(value.trim())))
}

fn parse_env_value(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return unescape_double_quoted(&raw[1..raw.len() - 1]);
    }

    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return raw[1..raw.len() - 1].to_string();
    }

    raw.to_string()
}

fn unescape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
