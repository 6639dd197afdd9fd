//! Npm global package detection.

use log::debug;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

use super::capture;
use crate::runtime::Runtime;
use crate::tag::Tag;

/// The slice of `npm list --json` output we care about. Dependency values
/// carry version metadata we ignore; only the keys matter.
#[derive(Debug, Default, Deserialize)]
struct NpmListing {
    #[serde(default)]
    dependencies: Option<BTreeMap<String, serde_json::Value>>,
}

/// Detect top-level npm global packages via `npm list -g --depth=0 --json`.
/// Malformed JSON is treated as zero packages, never as an error.
pub fn detect_npm(runtime: &impl Runtime) -> BTreeSet<Tag> {
    let output = capture(runtime, "npm", &["list", "-g", "--depth=0", "--json"]);
    parse_listing(&output)
}

fn parse_listing(output: &str) -> BTreeSet<Tag> {
    if output.trim().is_empty() {
        return BTreeSet::new();
    }
    let listing: NpmListing = match serde_json::from_str(output) {
        Ok(listing) => listing,
        Err(error) => {
            debug!("Ignoring unparseable npm output: {}", error);
            return BTreeSet::new();
        }
    };
    listing
        .dependencies
        .unwrap_or_default()
        .into_keys()
        .map(Tag::npm)
        .collect()
}
