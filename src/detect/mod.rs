//! Package detection - builds the Installed Set from live package managers.
//!
//! Each detector translates one manager's listing output into tags. A
//! manager is probed only when its executable is found on PATH; absent
//! managers contribute nothing and are skipped silently.

mod brew;
mod cargo;
mod mise;
mod npm;

pub use brew::detect_brew;
pub use cargo::detect_cargo;
pub use mise::detect_mise;
pub use npm::detect_npm;

use log::debug;
use std::collections::BTreeSet;

use crate::config::Config;
use crate::report::Reporter;
use crate::runtime::Runtime;
use crate::tag::Tag;

/// Detect everything installed across all present package managers.
pub fn detect_all(runtime: &impl Runtime, config: &Config, reporter: &Reporter) -> BTreeSet<Tag> {
    let mut all = BTreeSet::new();

    if runtime.command_exists("brew") {
        reporter.info("Scanning Homebrew packages (top-level only)...");
        all.extend(detect_brew(runtime));
    }

    if runtime.command_exists("mise") {
        reporter.info("Scanning mise-managed tools...");
        all.extend(detect_mise(runtime, &config.language_names()));
    }

    if runtime.command_exists("cargo") {
        reporter.info("Scanning cargo-installed crates...");
        all.extend(detect_cargo(runtime));
    }

    if runtime.command_exists("npm") {
        reporter.info("Scanning npm global packages...");
        all.extend(detect_npm(runtime));
    }

    all
}

/// Run a listing command and hand back its stdout. Spawn failures are
/// absence of data, never an error; a non-zero exit keeps whatever the
/// command managed to print (npm in particular exits non-zero while still
/// emitting usable JSON).
pub(crate) fn capture(runtime: &impl Runtime, program: &str, args: &[&str]) -> String {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    match runtime.run(program, &args) {
        Ok(output) => output.stdout,
        Err(error) => {
            debug!("{} failed to run: {}", program, error);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;

    #[test]
    fn absent_managers_contribute_nothing() {
        let mut runtime = MockRuntime::new();
        runtime.expect_command_exists().returning(|_| false);

        let config = Config::default();
        let reporter = Reporter::new(false);
        let installed = detect_all(&runtime, &config, &reporter);
        assert!(installed.is_empty());
    }
}
