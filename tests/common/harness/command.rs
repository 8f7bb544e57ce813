//! Fluent wrapper around assert_cmd::Command.

// Not every test binary uses every helper
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Fluent wrapper around `assert_cmd::Command` for the `noteshare` binary.
pub struct NoteshareCommand {
    args: Vec<String>,
    envs: Vec<(String, String)>,
    config_home: Option<PathBuf>,
    data_home: Option<PathBuf>,
}

impl NoteshareCommand {
    /// Creates a new command for the `noteshare` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            envs: Vec::new(),
            config_home: None,
            data_home: None,
        }
    }

    /// Points the config and data directories at isolated locations.
    pub fn home(mut self, config_home: &Path, data_home: &Path) -> Self {
        self.config_home = Some(config_home.to_path_buf());
        self.data_home = Some(data_home.to_path_buf());
        self
    }

    /// Sets the `--db` option.
    pub fn db(self, path: &Path) -> Self {
        self.args(["--db".to_string(), path.to_string_lossy().to_string()])
    }

    /// Sets the `--user` option.
    pub fn user(self, name: &str) -> Self {
        self.args(["--user", name])
    }

    /// Sets an environment variable for the spawned process.
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("noteshare").expect("Failed to find noteshare binary");
        cmd.env_remove("NOTESHARE_USER").env_remove("RUST_LOG");
        if let Some(dir) = &self.config_home {
            cmd.env("XDG_CONFIG_HOME", dir);
        }
        if let Some(dir) = &self.data_home {
            cmd.env("XDG_DATA_HOME", dir);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
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

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `ls` command.
    pub fn ls(self) -> Self {
        self.args(["ls"])
    }

    /// Configures for the `new` command with a title.
    pub fn new_note(self, title: &str) -> Self {
        self.args(["new", title])
    }

    /// Configures for the `search` command with a query.
    pub fn search(self, query: &str) -> Self {
        self.args(["search", query])
    }

    /// Configures for the `show` command with an ID.
    pub fn show(self, id: impl ToString) -> Self {
        self.args(["show".to_string(), id.to_string()])
    }

    /// Configures for the `share` command.
    pub fn share(self, id: impl ToString, grantee: &str) -> Self {
        self.args(["share".to_string(), id.to_string(), grantee.to_string()])
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for NoteshareCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_runs_binary() {
        NoteshareCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = NoteshareCommand::new().ls().format_json();
        let args = cmd.get_args();
        assert_eq!(args, ["ls", "--format", "json"]);
    }
}
