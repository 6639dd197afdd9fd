//! Interactive multi-select through fzf.
//!
//! fzf reads the candidate lines on stdin and prints the selected ones on
//! stdout; a non-zero exit means the user cancelled. It is a required
//! external dependency: without it the reconciler refuses to run.

use anyhow::{Result, bail};

use crate::runtime::Runtime;

const PICKER: &str = "fzf";

/// Present `lines` for multi-selection and return the chosen lines.
/// Cancellation (ESC, non-zero exit) returns an empty selection.
pub fn select(runtime: &impl Runtime, lines: &[String]) -> Result<Vec<String>> {
    if lines.is_empty() {
        return Ok(vec![]);
    }
    if !runtime.command_exists(PICKER) {
        bail!(
            "{} is required for interactive selection (install with: brew install {})",
            PICKER,
            PICKER
        );
    }

    let args: Vec<String> = [
        "--multi",
        "--height=80%",
        "--border",
        "--prompt=Select packages to add/update > ",
        "--header=Use TAB to select multiple, ENTER to confirm, ESC to cancel",
        "--ansi",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let output = runtime.run_with_input(PICKER, &args, &lines.join("\n"))?;
    if !output.success {
        return Ok(vec![]);
    }

    Ok(output
        .stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
