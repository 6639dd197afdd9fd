//! Staging accepted selections into the configuration.

use std::collections::BTreeMap;

use super::display::Selection;
use crate::config::Config;
use crate::report::Reporter;
use crate::tag::{Category, Manager, Tag};

/// Accepted mutations, partitioned by the config section they land in.
/// Also drives the auto-generated commit message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub formulae: Vec<String>,
    pub casks: Vec<String>,
    pub cargo_crates: Vec<String>,
    pub npm_packages: Vec<String>,
    pub mise_versions: BTreeMap<String, String>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.formulae.is_empty()
            && self.casks.is_empty()
            && self.cargo_crates.is_empty()
            && self.npm_packages.is_empty()
            && self.mise_versions.is_empty()
    }

    /// Commit message summarising the change categories.
    pub fn commit_message(&self) -> String {
        let mut message = String::from("Update package configuration via dotsync\n");

        if !self.mise_versions.is_empty() {
            message.push_str("\nMise version updates:\n");
            for (tool, version) in &self.mise_versions {
                message.push_str(&format!("  - {}: {}\n", tool, version));
            }
        }
        if !self.formulae.is_empty() || !self.casks.is_empty() {
            message.push_str("\nHomebrew packages:\n");
            for name in &self.formulae {
                message.push_str(&format!("  - {}\n", name));
            }
            for name in &self.casks {
                message.push_str(&format!("  - {} (cask)\n", name));
            }
        }
        if !self.cargo_crates.is_empty() {
            message.push_str("\nCargo crates:\n");
            for name in &self.cargo_crates {
                message.push_str(&format!("  - {}\n", name));
            }
        }
        if !self.npm_packages.is_empty() {
            message.push_str("\nNPM packages:\n");
            for name in &self.npm_packages {
                message.push_str(&format!("  - {}\n", name));
            }
        }

        message
    }
}

/// Apply accepted selections to the config, idempotently (append-if-absent;
/// version updates overwrite the pin). Returns what was actually changed.
pub fn apply_selections(
    config: &mut Config,
    selections: &[&Selection],
    reporter: &Reporter,
) -> ChangeSet {
    let mut changes = ChangeSet::default();

    for selection in selections {
        match selection {
            Selection::Update(update) => {
                config.set_language_version(&update.tool, &update.installed);
                changes
                    .mise_versions
                    .insert(update.tool.clone(), update.installed.clone());
            }
            Selection::Add(tag) => stage_tag(config, tag, &mut changes),
        }
    }

    report_changes(reporter, &changes);
    changes
}

fn stage_tag(config: &mut Config, tag: &Tag, changes: &mut ChangeSet) {
    match (tag.manager, tag.category) {
        (Manager::Brew, Some(Category::Formula)) => {
            if config.add_formula(&tag.name) {
                changes.formulae.push(tag.name.clone());
            }
        }
        (Manager::Brew, Some(Category::Cask)) => {
            if config.add_cask(&tag.name) {
                changes.casks.push(tag.name.clone());
            }
        }
        (Manager::Mise, _) => {
            // A mise tool with no configured pin yet: adding it is a new
            // version pin.
            if let Some(version) = &tag.version {
                if config.language_version(&tag.name).is_none() {
                    config.set_language_version(&tag.name, version);
                    changes
                        .mise_versions
                        .insert(tag.name.clone(), version.clone());
                }
            }
        }
        (Manager::Cargo, _) => {
            if config.add_cli_tool(&tag.name, Manager::Cargo) {
                changes.cargo_crates.push(tag.name.clone());
            }
        }
        (Manager::Npm, _) => {
            if config.add_cli_tool(&tag.name, Manager::Npm) {
                changes.npm_packages.push(tag.name.clone());
            }
        }
        (Manager::Brew, None) => {}
    }
}

fn report_changes(reporter: &Reporter, changes: &ChangeSet) {
    if !changes.mise_versions.is_empty() {
        reporter.info("Updating mise language versions...");
        for (tool, version) in &changes.mise_versions {
            reporter.item(&format!("{}: {}", tool, version));
        }
    }
    if !changes.formulae.is_empty() {
        reporter.info("Adding Homebrew formulae...");
        for name in &changes.formulae {
            reporter.item(name);
        }
    }
    if !changes.casks.is_empty() {
        reporter.info("Adding Homebrew casks...");
        for name in &changes.casks {
            reporter.item(name);
        }
    }
    if !changes.cargo_crates.is_empty() {
        reporter.info("Adding cargo crates to cli_tools...");
        for name in &changes.cargo_crates {
            reporter.item(name);
        }
    }
    if !changes.npm_packages.is_empty() {
        reporter.info("Adding npm packages to cli_tools...");
        for name in &changes.npm_packages {
            reporter.item(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::diff::VersionUpdate;

    fn quiet() -> Reporter {
        Reporter::new(false)
    }

    #[test]
    fn accepted_tags_become_configured_for_every_manager() {
        let mut config = Config::parse("languages:\n  golang: 1.21.0\n").unwrap();
        let selections = [
            Selection::Add(Tag::formula("ripgrep")),
            Selection::Add(Tag::cask("kitty")),
            Selection::Add(Tag::mise("rust", "1.79.0")),
            Selection::Add(Tag::cargo("tokei")),
            Selection::Add(Tag::npm("prettier")),
            Selection::Update(VersionUpdate {
                tool: "golang".to_string(),
                configured: "1.21.0".to_string(),
                installed: "1.22.0".to_string(),
            }),
        ];
        let refs: Vec<&Selection> = selections.iter().collect();

        let changes = apply_selections(&mut config, &refs, &quiet());

        let tags = config.tags();
        for expected in [
            "brew:formula:ripgrep",
            "brew:cask:kitty",
            "mise:rust:1.79.0",
            "cargo:tokei",
            "npm:prettier",
            "mise:golang:1.22.0",
        ] {
            let tag: Tag = expected.parse().unwrap();
            assert!(tags.contains(&tag), "missing {}", expected);
        }

        assert_eq!(changes.formulae, vec!["ripgrep"]);
        assert_eq!(changes.casks, vec!["kitty"]);
        assert_eq!(changes.cargo_crates, vec!["tokei"]);
        assert_eq!(changes.npm_packages, vec!["prettier"]);
        assert_eq!(changes.mise_versions.get("golang").map(String::as_str), Some("1.22.0"));
        assert_eq!(changes.mise_versions.get("rust").map(String::as_str), Some("1.79.0"));
    }

    #[test]
    fn merge_is_idempotent_for_existing_entries() {
        let mut config =
            Config::parse("platform_packages:\n  darwin:\n    system:\n      - ripgrep\n")
                .unwrap();
        let selections = [Selection::Add(Tag::formula("ripgrep"))];
        let refs: Vec<&Selection> = selections.iter().collect();

        let changes = apply_selections(&mut config, &refs, &quiet());
        assert!(changes.is_empty());
    }

    #[test]
    fn commit_message_lists_each_category() {
        let mut changes = ChangeSet::default();
        changes.formulae.push("ripgrep".to_string());
        changes.casks.push("kitty".to_string());
        changes.cargo_crates.push("tokei".to_string());
        changes.npm_packages.push("prettier".to_string());
        changes
            .mise_versions
            .insert("golang".to_string(), "1.22.0".to_string());

        let message = changes.commit_message();
        assert!(message.starts_with("Update package configuration via dotsync"));
        assert!(message.contains("Mise version updates:\n  - golang: 1.22.0"));
        assert!(message.contains("Homebrew packages:\n  - ripgrep\n  - kitty (cask)"));
        assert!(message.contains("Cargo crates:\n  - tokei"));
        assert!(message.contains("NPM packages:\n  - prettier"));
    }

    #[test]
    fn empty_changeset_reports_empty() {
        assert!(ChangeSet::default().is_empty());
    }
}
