//! Set arithmetic between the Installed and Configured sets.

use std::collections::{BTreeMap, BTreeSet};

use crate::tag::{Manager, Tag};

/// A mise tool whose installed version differs from the configured pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionUpdate {
    pub tool: String,
    /// Version currently pinned in the config (the old one).
    pub configured: String,
    /// Version actually installed (the new one).
    pub installed: String,
}

/// Replace installed mise versions with the configured pin for the same tool
/// so a bare version difference does not register as a missing entry.
pub fn normalize_mise_versions(
    installed: &BTreeSet<Tag>,
    configured: &BTreeSet<Tag>,
) -> BTreeSet<Tag> {
    let pins = version_pins(configured);
    installed
        .iter()
        .map(|tag| {
            if tag.manager == Manager::Mise {
                if let Some(pinned) = pins.get(tag.name.as_str()) {
                    return tag.with_version(*pinned);
                }
            }
            tag.clone()
        })
        .collect()
}

/// Tags present in the normalized Installed Set but absent from the config.
pub fn missing_tags(normalized: &BTreeSet<Tag>, configured: &BTreeSet<Tag>) -> BTreeSet<Tag> {
    normalized.difference(configured).cloned().collect()
}

/// Version mismatches for mise tools present in both sets, sorted by tool.
pub fn find_version_updates(
    installed: &BTreeSet<Tag>,
    configured: &BTreeSet<Tag>,
) -> Vec<VersionUpdate> {
    let installed_versions = version_pins(installed);
    version_pins(configured)
        .into_iter()
        .filter_map(|(tool, pinned)| {
            let current = installed_versions.get(tool)?;
            if *current == pinned {
                None
            } else {
                Some(VersionUpdate {
                    tool: tool.to_string(),
                    configured: pinned.to_string(),
                    installed: (*current).to_string(),
                })
            }
        })
        .collect()
}

/// Drop mise tags whose tool already has a recorded update; those are shown
/// as updates, not as new packages.
pub fn without_updated_tools(missing: BTreeSet<Tag>, updates: &[VersionUpdate]) -> BTreeSet<Tag> {
    let updated: BTreeSet<&str> = updates.iter().map(|u| u.tool.as_str()).collect();
    missing
        .into_iter()
        .filter(|tag| !(tag.manager == Manager::Mise && updated.contains(tag.name.as_str())))
        .collect()
}

fn version_pins(tags: &BTreeSet<Tag>) -> BTreeMap<&str, &str> {
    tags.iter()
        .filter(|tag| tag.manager == Manager::Mise)
        .filter_map(|tag| Some((tag.name.as_str(), tag.version.as_deref()?)))
        .collect()
}
