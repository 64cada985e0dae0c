//! Fluent wrapper around assert_cmd::Command.

#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Fluent wrapper around `assert_cmd::Command` for the `evermark` binary.
pub struct EvermarkCommand {
    args: Vec<String>,
}

impl EvermarkCommand {
    pub fn new() -> Self {
        Self { args: Vec::new() }
    }

    /// Sets `--config`.
    pub fn config(self, path: &Path) -> Self {
        self.path_arg("--config", path)
    }

    /// Sets `--log-file`.
    pub fn log_file(self, path: &Path) -> Self {
        self.path_arg("--log-file", path)
    }

    /// Adds `flag` followed by `path`.
    pub fn path_arg(mut self, flag: &str, path: &Path) -> Self {
        self.args.push(flag.to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("evermark").expect("Failed to find evermark binary");
        cmd.args(&self.args);
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for EvermarkCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_runs_binary() {
        EvermarkCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_path_arg() {
        let cmd = EvermarkCommand::new().path_arg("--db", Path::new("/tmp/x.db"));
        assert_eq!(cmd.get_args(), ["--db", "/tmp/x.db"]);
    }
}
