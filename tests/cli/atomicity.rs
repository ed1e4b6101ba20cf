//! All-or-nothing generation and passphrase secrecy on backend failure.

#![cfg(unix)]

use crate::support::*;
use std::fs;

#[test]
fn test_private_key_failure_leaves_no_files() {
    let t = Test::configured();
    let openssl = t.fake_openssl(FAKE_OPENSSL_PRIVATE_FAILS_AFTER_WRITE);

    let output = t.provision_with(&openssl, &[]);
    assert_exit_code(&output, exit::BACKEND);
    assert_stderr_contains(&output, "private key generation failed");
    assert_stderr_contains(&output, "write error");

    assert!(t.key_files().is_empty(), "{:?}", t.key_files());
}

#[test]
fn test_public_key_failure_leaves_no_files() {
    let t = Test::configured();
    let openssl = t.fake_openssl(FAKE_OPENSSL_PUBLIC_FAILS);

    let output = t.provision_with(&openssl, &[]);
    assert_exit_code(&output, exit::BACKEND);
    assert_stderr_contains(&output, "public key derivation failed");

    assert!(t.key_files().is_empty(), "{:?}", t.key_files());
}

#[test]
fn test_failed_rotation_keeps_existing_pair() {
    let t = Test::configured();
    let openssl = t.fake_openssl(FAKE_OPENSSL_PUBLIC_FAILS);
    t.write_pair("OLD PRIVATE\n", "OLD PUBLIC\n");

    let output = t.provision_with(&openssl, &["--force"]);
    assert_exit_code(&output, exit::BACKEND);

    assert_eq!(fs::read_to_string(t.private_key()).unwrap(), "OLD PRIVATE\n");
    assert_eq!(fs::read_to_string(t.public_key()).unwrap(), "OLD PUBLIC\n");
    assert_eq!(t.key_files(), vec!["private_key.pem.enc", "public_key.pem"]);
}

#[test]
fn test_failed_promotion_keeps_previous_private_key() {
    let t = Test::configured();
    let openssl = t.fake_openssl(FAKE_OPENSSL_OK);
    fs::create_dir_all(t.public_key().join("occupied")).unwrap();
    fs::write(t.private_key(), "OLD PRIVATE\n").unwrap();

    let output = t.provision_with(&openssl, &["--force"]);
    assert_exit_code(&output, exit::FILESYSTEM);
    assert_stderr_contains(&output, "public_key.pem into place");

    assert_eq!(fs::read_to_string(t.private_key()).unwrap(), "OLD PRIVATE\n");
    assert_eq!(t.key_files(), vec!["private_key.pem.enc", "public_key.pem"]);
}

#[test]
fn test_backend_diagnostic_is_redacted() {
    let t = Test::configured();
    let openssl = t.fake_openssl(FAKE_OPENSSL_LEAKY_FAILURE);

    let output = t.provision_with(&openssl, &["--verbose"]);
    assert_exit_code(&output, exit::BACKEND);
    assert_stderr_contains(&output, "could not use passphrase ***");
    assert_output_excludes(&output, PASSPHRASE);
}

#[test]
fn test_stale_staging_files_are_removed() {
    let t = Test::configured();
    let openssl = t.fake_openssl(FAKE_OPENSSL_OK);
    fs::create_dir_all(t.keys_dir()).unwrap();
    fs::write(t.keys_dir().join(".private_key.pem.enc.staging"), "stale").unwrap();
    fs::write(t.keys_dir().join(".public_key.pem.staging"), "stale").unwrap();

    assert_success(&t.provision_with(&openssl, &[]));

    assert_eq!(t.key_files(), vec!["private_key.pem.enc", "public_key.pem"]);
}
