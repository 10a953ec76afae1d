//! Helpers for running the `alm` binary in tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// `alm` invocation isolated to a temp config path
pub struct AlmCommand {
    config_path: PathBuf,
    args: Vec<String>,
}

impl AlmCommand {
    pub fn new(config_path: impl AsRef<Path>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    pub fn execute(&self) -> Result<CommandResult> {
        let output = Command::new(env!("CARGO_BIN_EXE_alm"))
            .arg("--config")
            .arg(&self.config_path)
            .args(&self.args)
            .env("NO_COLOR", "1")
            .env_remove("ALM_LOG")
            .output()
            .context("Failed to execute alm")?;

        Ok(CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }

    pub fn assert_success(&self) -> Result<CommandResult> {
        let result = self.execute()?;
        if !result.success() {
            anyhow::bail!(
                "Command failed (exit code: {}):\nArgs: {:?}\nStdout: {}\nStderr: {}",
                result.exit_code,
                self.args,
                result.stdout,
                result.stderr
            );
        }
        Ok(result)
    }

    pub fn assert_failure(&self) -> Result<CommandResult> {
        let result = self.execute()?;
        if result.success() {
            anyhow::bail!(
                "Command should have failed but succeeded:\nArgs: {:?}\nStdout: {}",
                self.args,
                result.stdout
            );
        }
        Ok(result)
    }
}

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Build an [`AlmCommand`] from a config path and arguments
#[macro_export]
macro_rules! alm {
    ($config:expr, $($arg:expr),*) => {{
        let mut cmd = $crate::common::AlmCommand::new($config);
        cmd.args(&[$($arg),*]);
        cmd
    }};
}
