//! Homebrew detection.

use std::collections::BTreeSet;

use super::capture;
use crate::runtime::Runtime;
use crate::tag::Tag;

/// Detect Homebrew formulae (`brew leaves`, top-level only) and casks.
pub fn detect_brew(runtime: &impl Runtime) -> BTreeSet<Tag> {
    let mut tags = BTreeSet::new();

    for name in lines(&capture(runtime, "brew", &["leaves"])) {
        tags.insert(Tag::formula(name));
    }
    for name in lines(&capture(runtime, "brew", &["list", "--cask"])) {
        tags.insert(Tag::cask(name));
    }

    tags
}

fn lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{CommandOutput, MockRuntime};
    use mockall::predicate::eq;

    fn ok(stdout: &str) -> CommandOutput {
        CommandOutput {
            success: true,
            stdout: stdout.to_string(),
        }
    }

    #[test]
    fn tags_formulae_and_casks() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_run()
            .with(eq("brew"), eq(vec!["leaves".to_string()]))
            .returning(|_, _| Ok(ok("ripgrep\nfd\n")));
        runtime
            .expect_run()
            .with(eq("brew"), eq(vec!["list".to_string(), "--cask".to_string()]))
            .returning(|_, _| Ok(ok("kitty\n")));

        let tags = detect_brew(&runtime);
        assert_eq!(tags.len(), 3);
        assert!(tags.contains(&Tag::formula("ripgrep")));
        assert!(tags.contains(&Tag::formula("fd")));
        assert!(tags.contains(&Tag::cask("kitty")));
    }

    #[test]
    fn empty_output_yields_no_tags() {
        let mut runtime = MockRuntime::new();
        runtime.expect_run().returning(|_, _| Ok(ok("\n\n")));

        assert!(detect_brew(&runtime).is_empty());
    }

    #[test]
    fn spawn_failure_is_treated_as_absence_of_data() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_run()
            .returning(|_, _| Err(anyhow::anyhow!("spawn failed")));

        assert!(detect_brew(&runtime).is_empty());
    }
}
