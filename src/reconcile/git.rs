//! Optional git commit and chezmoi apply after a merge.

use anyhow::{Result, bail};
use std::path::Path;

use super::merge::ChangeSet;
use crate::config::CONFIG_FILE_NAME;
use crate::report::Reporter;
use crate::runtime::Runtime;

/// Offer to stage and commit the config change, then to run `chezmoi apply`.
/// Every offer may be declined; declining leaves only the file write already
/// performed by the caller.
pub fn offer_commit_and_apply(
    runtime: &impl Runtime,
    reporter: &Reporter,
    source_dir: &Path,
    changes: &ChangeSet,
) -> Result<()> {
    reporter.section("Git Integration");
    reporter.info(&format!("Changes have been made to {}", CONFIG_FILE_NAME));

    let in_repo = matches!(
        runtime.run_in("git", &["status".to_string()], source_dir),
        Ok(status) if status.success
    );
    if !in_repo {
        reporter.warn(&format!(
            "Not in a git repository - changes saved to {}",
            CONFIG_FILE_NAME
        ));
        return Ok(());
    }

    if !runtime.confirm("Commit and apply changes?")? {
        reporter.info("Changes saved but not committed");
        reporter.info(&format!(
            "Run 'git add {} && git commit' to commit manually",
            CONFIG_FILE_NAME
        ));
        return Ok(());
    }

    reporter.info("Committing changes...");
    let add = runtime.run_in(
        "git",
        &["add".to_string(), CONFIG_FILE_NAME.to_string()],
        source_dir,
    )?;
    if !add.success {
        bail!("git add {} failed", CONFIG_FILE_NAME);
    }
    let commit = runtime.run_in(
        "git",
        &["commit".to_string(), "-m".to_string(), changes.commit_message()],
        source_dir,
    )?;
    if !commit.success {
        bail!("git commit failed");
    }
    reporter.success("Changes committed");

    if runtime.confirm("Apply changes with 'chezmoi apply'?")? {
        reporter.info("Running 'chezmoi apply'...");
        if runtime.run_passthrough("chezmoi", &["apply".to_string()])? {
            reporter.success("Dotfiles applied successfully");
        } else {
            reporter.warn("chezmoi apply returned a non-zero exit code");
        }
    } else {
        reporter.info("Skipping chezmoi apply - run manually when ready");
    }

    Ok(())
}
