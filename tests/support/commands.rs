//! Command helper methods for Test.

use super::{Test, DESCRIPTION, NAME, PAYLOAD_FILE, REGION};
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a secret-seed command with a clean environment.
    ///
    /// Returns a Command configured with:
    /// - the fake store pointed at this test's directory (`test-store` builds)
    /// - colors and log filters from the parent environment removed
    /// - current directory set to the test directory
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("secret-seed").expect("failed to find secret-seed binary");
        cmd.env("SECRET_SEED_TEST_STORE", self.store_path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("SECRET_SEED_LOG");
        cmd.env_remove("SECRET_SEED_TEST_FAIL");
        cmd.env_remove("SECRET_SEED_TEST_DELAY");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run with the standard scenario flags, Go style, plus `extra`.
    pub fn seed_with(&self, extra: &[&str]) -> Output {
        self.cmd()
            .args([
                "-name",
                NAME,
                "-region",
                REGION,
                "-description",
                DESCRIPTION,
                "-json-file",
                PAYLOAD_FILE,
            ])
            .args(extra)
            .output()
            .expect("failed to run secret-seed")
    }

    /// Run with the standard scenario flags.
    pub fn seed(&self) -> Output {
        self.seed_with(&[])
    }

    /// Run with exactly the given arguments.
    pub fn run(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .output()
            .expect("failed to run secret-seed")
    }
}
