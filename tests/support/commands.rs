//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::path::Path;
use std::process::Output;

impl Test {
    /// Create a keysmith command isolated from the caller's environment.
    ///
    /// Returns a Command configured with:
    /// - Current directory set to the test project directory
    /// - All KEYSMITH_* settings cleared
    /// - Colors disabled
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("keysmith").expect("failed to find keysmith binary");
        for var in [
            "KEYSMITH_ALGORITHM",
            "KEYSMITH_KEYS_DIR",
            "KEYSMITH_ENV_FILE",
            "KEYSMITH_SECRET_VAR",
            "KEYSMITH_OPENSSL",
            "KEYSMITH_LOG",
        ] {
            cmd.env_remove(var);
        }
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run keysmith with `args`.
    pub fn provision(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .output()
            .expect("failed to run keysmith")
    }

    /// Run keysmith against a specific openssl executable.
    pub fn provision_with(&self, openssl: &Path, args: &[&str]) -> Output {
        self.cmd()
            .arg("--openssl")
            .arg(openssl)
            .args(args)
            .output()
            .expect("failed to run keysmith")
    }
}
