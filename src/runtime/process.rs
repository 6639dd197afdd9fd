//! External command execution.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use super::{CommandOutput, RealRuntime};

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn command_exists_impl(&self, name: &str) -> bool {
        Command::new("which")
            .arg(name)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn run_impl(
        &self,
        program: &str,
        args: &[String],
        cwd: Option<&Path>,
    ) -> Result<CommandOutput> {
        let mut command = Command::new(program);
        command.args(args);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }
        let output = command
            .output()
            .with_context(|| format!("Failed to execute '{}'", program))?;
        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }

    #[tracing::instrument(skip(self, input))]
    pub(crate) fn run_with_input_impl(
        &self,
        program: &str,
        args: &[String],
        input: &str,
    ) -> Result<CommandOutput> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            // stderr stays on the terminal so interactive programs can draw.
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("Failed to spawn '{}'", program))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(input.as_bytes())
                .with_context(|| format!("Failed to write to stdin of '{}'", program))?;
        }

        let output = child
            .wait_with_output()
            .with_context(|| format!("Failed to wait for '{}'", program))?;
        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn run_passthrough_impl(&self, program: &str, args: &[String]) -> Result<bool> {
        let status = Command::new(program)
            .args(args)
            .status()
            .with_context(|| format!("Failed to execute '{}'", program))?;
        Ok(status.success())
    }
}
