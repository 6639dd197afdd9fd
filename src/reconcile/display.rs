//! Formatting of the diff for the interactive picker.
//!
//! The picker works on plain lines, so every selectable line must map back
//! to what it stands for. Lines are rendered from the canonical tag form to
//! keep them unique across sections (a short name like `prettier` can exist
//! under more than one manager).

use std::collections::{BTreeMap, BTreeSet};

use super::diff::VersionUpdate;
use crate::tag::{Category, Manager, Tag};

/// What a selected line resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Add(Tag),
    Update(VersionUpdate),
}

/// The rendered picker list plus the line-to-selection lookup.
#[derive(Debug, Default)]
pub struct SelectionList {
    pub lines: Vec<String>,
    map: BTreeMap<String, Selection>,
}

impl SelectionList {
    pub fn resolve(&self, line: &str) -> Option<&Selection> {
        self.map.get(line.trim())
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

const GROUPS: [(Manager, Option<Category>, &str); 5] = [
    (Manager::Brew, Some(Category::Formula), "Homebrew Formulae"),
    (Manager::Brew, Some(Category::Cask), "Homebrew Casks"),
    (Manager::Mise, None, "Mise Tools - New Packages"),
    (Manager::Cargo, None, "Cargo Crates"),
    (Manager::Npm, None, "NPM Packages"),
];

/// Build the display list: version updates lead, then missing tags grouped
/// by manager and category. Section-header lines are not selectable.
pub fn build(missing: &BTreeSet<Tag>, updates: &[VersionUpdate]) -> SelectionList {
    let mut list = SelectionList::default();

    if !updates.is_empty() {
        list.lines.push(header("Mise Tools - Version Updates"));
        for update in updates {
            let line = format!(
                "mise:{}:{}→{} (version update)",
                update.tool, update.configured, update.installed
            );
            list.map
                .insert(line.clone(), Selection::Update(update.clone()));
            list.lines.push(line);
        }
    }

    for (manager, category, title) in GROUPS {
        let group: Vec<&Tag> = missing
            .iter()
            .filter(|tag| tag.manager == manager && tag.category == category)
            .collect();
        if group.is_empty() {
            continue;
        }
        list.lines.push(header(title));
        for tag in group {
            let line = format!("• {}", tag);
            list.map.insert(line.clone(), Selection::Add(tag.clone()));
            list.lines.push(line);
        }
    }

    list
}

fn header(title: &str) -> String {
    format!("═══ {} ═══", title)
}
