//! Reconciliation workflow: diff the Installed Set against the Configured
//! Set, let the user pick what to merge back, persist, and optionally commit.

pub mod diff;
pub mod display;
mod git;
mod merge;
mod picker;

pub use diff::VersionUpdate;
pub use display::Selection;
pub use merge::ChangeSet;

use anyhow::{Context, Result, bail};
use std::path::PathBuf;

use crate::config::{CONFIG_FILE_NAME, Config};
use crate::detect::detect_all;
use crate::report::Reporter;
use crate::runtime::Runtime;

/// Run the full reconciliation workflow. With `debug` set, both sets are
/// printed for inspection and nothing is touched.
pub fn run(runtime: &impl Runtime, reporter: &Reporter, debug: bool) -> Result<()> {
    banner(reporter, debug);

    let source_dir = chezmoi_source_path(runtime)?;
    let config_path = source_dir.join(CONFIG_FILE_NAME);
    let mut config = Config::load(runtime, &config_path)?;

    reporter.section("Detecting installed packages");
    let configured = config.tags();
    let installed = detect_all(runtime, &config, reporter);
    reporter.success(&format!("Found {} installed packages", installed.len()));
    reporter.success(&format!("Found {} configured packages", configured.len()));

    if debug {
        reporter.section("Debug: Installed Packages");
        for tag in &installed {
            reporter.plain(&tag.to_string());
        }
        reporter.section("Debug: Configured Packages");
        for tag in &configured {
            reporter.plain(&tag.to_string());
        }
        reporter.info("Debug mode complete. No changes made.");
        return Ok(());
    }

    reporter.section("Finding differences");
    let normalized = diff::normalize_mise_versions(&installed, &configured);
    let updates = diff::find_version_updates(&installed, &configured);
    let missing = diff::without_updated_tools(diff::missing_tags(&normalized, &configured), &updates);

    let total = missing.len() + updates.len();
    if total == 0 {
        reporter.success("No differences found - your system matches the config!");
        return Ok(());
    }
    reporter.warn(&format!("Found {} packages/updates to review", total));

    let list = display::build(&missing, &updates);
    reporter.info("Opening interactive selection (fzf)...");
    let selected_lines = picker::select(runtime, &list.lines)?;
    let selections: Vec<&Selection> = selected_lines
        .iter()
        .filter_map(|line| list.resolve(line))
        .collect();
    if selections.is_empty() {
        reporter.warn("No selections made - exiting");
        return Ok(());
    }
    reporter.success(&format!("Selected {} items", selections.len()));

    reporter.section("Updating configuration");
    let changes = merge::apply_selections(&mut config, &selections, reporter);
    reporter.info(&format!("Writing changes to {}...", CONFIG_FILE_NAME));
    config.save(runtime, &config_path)?;
    reporter.success("Configuration updated successfully");

    git::offer_commit_and_apply(runtime, reporter, &source_dir, &changes)?;

    reporter.success("Reconciliation complete!");
    Ok(())
}

fn banner(reporter: &Reporter, debug: bool) {
    reporter.plain("╔════════════════════════════════════════════════════════╗");
    reporter.plain("║             Dotfiles Reconciliation Tool               ║");
    if debug {
        reporter.plain("║        DEBUG MODE - No changes will be made            ║");
    } else {
        reporter.plain("║      Sync your local packages with chezmoi config      ║");
    }
    reporter.plain("╚════════════════════════════════════════════════════════╝");
}

/// The directory owning the config file, resolved through the dotfile
/// manager. Failure here is fatal: there is nothing to reconcile against.
fn chezmoi_source_path(runtime: &impl Runtime) -> Result<PathBuf> {
    let output = runtime
        .run("chezmoi", &["source-path".to_string()])
        .context("Failed to run chezmoi")?;
    match output.text() {
        Some(path) => Ok(PathBuf::from(path)),
        None => bail!("Could not determine chezmoi source path"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{CommandOutput, MockRuntime};
    use mockall::predicate::eq;

    #[test]
    fn missing_chezmoi_source_path_is_fatal() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_run()
            .with(eq("chezmoi"), eq(vec!["source-path".to_string()]))
            .returning(|_, _| {
                Ok(CommandOutput {
                    success: false,
                    stdout: String::new(),
                })
            });

        let reporter = Reporter::new(false);
        let result = run(&runtime, &reporter, false);
        assert!(result.is_err());
    }

    #[test]
    fn matching_sets_finish_without_the_picker() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_run()
            .with(eq("chezmoi"), eq(vec!["source-path".to_string()]))
            .returning(|_, _| {
                Ok(CommandOutput {
                    success: true,
                    stdout: "/home/user/dotfiles\n".to_string(),
                })
            });
        runtime
            .expect_read_to_string()
            .returning(|_| Ok("platform_packages:\n  darwin:\n    system:\n      - ripgrep\n".to_string()));
        // Only brew is present; it reports exactly the configured formula.
        runtime
            .expect_command_exists()
            .returning(|name| name == "brew");
        runtime
            .expect_run()
            .with(eq("brew"), eq(vec!["leaves".to_string()]))
            .returning(|_, _| {
                Ok(CommandOutput {
                    success: true,
                    stdout: "ripgrep\n".to_string(),
                })
            });
        runtime
            .expect_run()
            .with(eq("brew"), eq(vec!["list".to_string(), "--cask".to_string()]))
            .returning(|_, _| Ok(CommandOutput::default()));

        let reporter = Reporter::new(false);
        run(&runtime, &reporter, false).unwrap();
    }

    #[test]
    fn debug_mode_stops_before_selection() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_run()
            .with(eq("chezmoi"), eq(vec!["source-path".to_string()]))
            .returning(|_, _| {
                Ok(CommandOutput {
                    success: true,
                    stdout: "/home/user/dotfiles\n".to_string(),
                })
            });
        runtime
            .expect_read_to_string()
            .returning(|_| Ok("languages:\n  golang: 1.21.0\n".to_string()));
        // No managers present; the diff would be non-empty, but debug mode
        // must not reach the picker, the config write, or git.
        runtime.expect_command_exists().returning(|_| false);

        let reporter = Reporter::new(false);
        run(&runtime, &reporter, true).unwrap();
    }
}
