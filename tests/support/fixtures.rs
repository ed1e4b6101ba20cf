//! Test fixtures and constants.

/// Passphrase used across tests.
pub const PASSPHRASE: &str = "correcthorse";

/// A `.env` with a valid passphrase.
pub const VALID_ENV: &str = "SIGNATURE_KEY_PASSWORD=correcthorse\n";

/// A realistic application `.env` with comments and unrelated settings.
pub const APP_ENV: &str = r#"
# Application
APP_NAME=lovelink
JWT_ALGORITHM=ES256

# Signing key
SIGNATURE_KEY_PASSWORD="correcthorse"
REDIS_URL=redis://localhost:6379
"#;

/// Exit codes documented in `keysmith --help`.
pub mod exit {
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const SECRET: i32 = 4;
    pub const FILESYSTEM: i32 = 5;
    pub const BACKEND: i32 = 6;
    pub const VERIFY: i32 = 7;
}

/// A fake openssl that generates unique placeholder keys and derives a
/// matching "public key" from the private key contents.
pub const FAKE_OPENSSL_OK: &str = r#"#!/bin/sh
cmd="$1"
shift
in=""
out=""
while [ $# -gt 0 ]; do
  case "$1" in
    -in) in="$2"; shift ;;
    -out) out="$2"; shift ;;
  esac
  shift
done
case "$cmd" in
  genpkey) echo "ENCRYPTED PRIVATE KEY $$-$(date +%s)" > "$out" ;;
  pkey)
    if [ -n "$out" ]; then
      echo "PUBLIC OF $(cat "$in")" > "$out"
    else
      echo "PUBLIC OF $(cat "$in")"
    fi
    ;;
esac
"#;

/// A fake openssl that fails every call and echoes the passphrase it was
/// given, to prove diagnostics are redacted.
pub const FAKE_OPENSSL_LEAKY_FAILURE: &str = r#"#!/bin/sh
echo "error: could not use passphrase $KEYSMITH_PASSPHRASE" >&2
exit 1
"#;

/// A fake openssl whose key generation writes a file and then fails.
pub const FAKE_OPENSSL_PRIVATE_FAILS_AFTER_WRITE: &str = r#"#!/bin/sh
for last; do :; done
echo "half written" > "$last"
echo "genpkey: write error" >&2
exit 1
"#;

/// A fake openssl whose key generation succeeds but derivation fails.
pub const FAKE_OPENSSL_PUBLIC_FAILS: &str = r#"#!/bin/sh
if [ "$1" = "genpkey" ]; then
  for last; do :; done
  echo "ENCRYPTED PRIVATE KEY" > "$last"
  exit 0
fi
echo "unable to load key" >&2
exit 1
"#;
