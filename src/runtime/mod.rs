//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over system operations,
//! enabling dependency injection and testability.
//!
//! # Structure
//!
//! - `process` - External command execution (capture, piped input, passthrough)
//! - `fs` - File system operations (read, write, directory listing)
//! - `env` - Well-known directory lookups
//! - `user` - User interaction (confirmation prompts)

mod env;
mod fs;
mod process;
mod user;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Captured result of a finished external command.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Captured standard output, decoded lossily.
    pub stdout: String,
}

impl CommandOutput {
    /// Trimmed stdout, or `None` when the command failed or printed nothing.
    pub fn text(&self) -> Option<&str> {
        if self.success {
            let trimmed = self.stdout.trim();
            if trimmed.is_empty() { None } else { Some(trimmed) }
        } else {
            None
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Processes
    /// Check whether an executable is reachable on PATH (a "which"-style probe).
    fn command_exists(&self, name: &str) -> bool;

    /// Run a command to completion, capturing stdout. A non-zero exit is not
    /// an error; it is reported through [`CommandOutput::success`].
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput>;

    /// Like [`Runtime::run`], but with the working directory set.
    fn run_in(&self, program: &str, args: &[String], cwd: &Path) -> Result<CommandOutput>;

    /// Run a command feeding `input` on its stdin and capturing stdout, while
    /// stderr stays attached to the terminal. This is how the interactive
    /// picker is driven.
    fn run_with_input(&self, program: &str, args: &[String], input: &str)
    -> Result<CommandOutput>;

    /// Run a command with all stdio inherited and return whether it succeeded.
    fn run_passthrough(&self, program: &str, args: &[String]) -> Result<bool>;

    // Directories
    fn home_dir(&self) -> Option<PathBuf>;

    // File System
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn copy(&self, from: &Path, to: &Path) -> Result<u64>;
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    // User interaction
    /// Prompt user for confirmation. Returns true if user confirms (y/yes), false otherwise.
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn command_exists(&self, name: &str) -> bool {
        self.command_exists_impl(name)
    }

    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        self.run_impl(program, args, None)
    }

    fn run_in(&self, program: &str, args: &[String], cwd: &Path) -> Result<CommandOutput> {
        self.run_impl(program, args, Some(cwd))
    }

    fn run_with_input(
        &self,
        program: &str,
        args: &[String],
        input: &str,
    ) -> Result<CommandOutput> {
        self.run_with_input_impl(program, args, input)
    }

    fn run_passthrough(&self, program: &str, args: &[String]) -> Result<bool> {
        self.run_passthrough_impl(program, args)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home_dir_impl()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.write_impl(path, contents)
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<u64> {
        self.copy_impl(from, to)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.is_dir_impl(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        self.read_dir_impl(path)
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        self.confirm_impl(prompt)
    }
}
