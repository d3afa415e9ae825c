//! Command helper methods for Test.

use super::{fixtures::ISOLATED_VARS, Test};
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a stackplan command isolated from the caller's environment.
    ///
    /// Returns a Command configured with:
    /// - every variable stackplan reads removed, then the test's own set
    /// - NO_COLOR set so output is plain text
    /// - current directory set to the test directory
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("stackplan").expect("failed to find stackplan binary");
        for var in ISOLATED_VARS {
            cmd.env_remove(var);
        }
        cmd.env("NO_COLOR", "1");
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run `stackplan -c ... <args>` with the given context pairs.
    pub fn run(&self, context: &[&str], args: &[&str]) -> Output {
        let mut cmd = self.cmd();
        for pair in context {
            cmd.args(["-c", pair]);
        }
        cmd.args(args).output().expect("failed to run stackplan")
    }

    /// Shortcut for `stackplan -c env=dev -c config_filepath=dev.json plan --json`.
    pub fn plan_json(&self) -> Output {
        self.run(&["env=dev", "config_filepath=dev.json"], &["plan", "--json"])
    }

    /// Shortcut for `stackplan -c env=dev -c config_filepath=dev.json check`.
    pub fn check(&self) -> Output {
        self.run(&["env=dev", "config_filepath=dev.json"], &["check"])
    }
}
