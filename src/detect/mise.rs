//! Mise (runtime version manager) detection.

use std::collections::BTreeSet;

use super::capture;
use crate::runtime::Runtime;
use crate::tag::Tag;

/// Fixed mapping of mise short names to the names used in the config.
const NAME_MAP: [(&str, &str); 2] = [("go", "golang"), ("node", "nodejs")];

/// Detect installed mise tools as version-carrying tags.
///
/// Tool names are canonicalized through [`NAME_MAP`], then matched against
/// the configured language names: when either name contains the other, the
/// configured name wins. This is a best-effort heuristic, not a guarantee.
pub fn detect_mise(runtime: &impl Runtime, configured_languages: &[String]) -> BTreeSet<Tag> {
    let mut tags = BTreeSet::new();

    for line in capture(runtime, "mise", &["ls", "--installed"]).lines() {
        let mut fields = line.split_whitespace();
        let (Some(short), Some(version)) = (fields.next(), fields.next()) else {
            continue;
        };
        let tool = resolve_name(short, configured_languages);
        tags.insert(Tag::mise(tool, version));
    }

    tags
}

fn resolve_name(short: &str, configured_languages: &[String]) -> String {
    for name in configured_languages {
        if name.contains(short) || short.contains(name.as_str()) {
            return name.clone();
        }
    }
    NAME_MAP
        .iter()
        .find(|(from, _)| *from == short)
        .map(|(_, to)| (*to).to_string())
        .unwrap_or_else(|| short.to_string())
}
