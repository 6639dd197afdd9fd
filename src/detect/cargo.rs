//! Cargo-installed crate detection.
//!
//! Cargo records installed binaries in `~/.cargo/.crates.toml`; there is no
//! listing command to shell out to. Each entry in the `[v1]` table looks
//! like:
//!
//! ```toml
//! "ripgrep 14.1.0 (registry+https://github.com/rust-lang/crates.io-index)" = ["rg"]
//! ```
//!
//! The crate name is the first token inside the quoted key.

use log::debug;
use std::collections::BTreeSet;

use crate::runtime::Runtime;
use crate::tag::Tag;

pub fn detect_cargo(runtime: &impl Runtime) -> BTreeSet<Tag> {
    let Some(home) = runtime.home_dir() else {
        return BTreeSet::new();
    };
    let manifest = home.join(".cargo").join(".crates.toml");
    if !runtime.exists(&manifest) {
        return BTreeSet::new();
    }

    match runtime.read_to_string(&manifest) {
        Ok(content) => parse_manifest(&content),
        Err(error) => {
            debug!("Failed to read {}: {}", manifest.display(), error);
            BTreeSet::new()
        }
    }
}

fn parse_manifest(content: &str) -> BTreeSet<Tag> {
    content.lines().filter_map(crate_name).map(Tag::cargo).collect()
}

fn crate_name(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('"')?;
    let (key, tail) = rest.split_once('"')?;
    if !tail.trim_start().starts_with('=') {
        return None;
    }
    key.split_whitespace().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;
    use std::path::PathBuf;

    const MANIFEST: &str = r#"[v1]
"cargo-watch 8.5.2 (registry+https://github.com/rust-lang/crates.io-index)" = ["cargo-watch"]
"ripgrep 14.1.0 (registry+https://github.com/rust-lang/crates.io-index)" = ["rg"]
"#;

    #[test]
    fn parses_crate_names_from_entry_keys() {
        let tags = parse_manifest(MANIFEST);
        assert_eq!(tags.len(), 2);
        assert!(tags.contains(&Tag::cargo("cargo-watch")));
        assert!(tags.contains(&Tag::cargo("ripgrep")));
    }

    #[test]
    fn table_headers_and_noise_are_ignored() {
        assert_eq!(crate_name("[v1]"), None);
        assert_eq!(crate_name(""), None);
        assert_eq!(crate_name("\"unterminated"), None);
        assert_eq!(
            crate_name(r#""tokei 12.1.2 (registry+https://crates.io)" = ["tokei"]"#),
            Some("tokei")
        );
    }

    #[test]
    fn missing_manifest_yields_empty_set() {
        let mut runtime = MockRuntime::new();
        let home = PathBuf::from("/home/user");
        let manifest = home.join(".cargo").join(".crates.toml");
        runtime.expect_home_dir().returning(move || Some(home.clone()));
        runtime
            .expect_exists()
            .with(eq(manifest))
            .returning(|_| false);

        assert!(detect_cargo(&runtime).is_empty());
    }

    #[test]
    fn reads_manifest_through_the_runtime() {
        let mut runtime = MockRuntime::new();
        let home = PathBuf::from("/home/user");
        runtime.expect_home_dir().returning(move || Some(home.clone()));
        runtime.expect_exists().returning(|_| true);
        runtime
            .expect_read_to_string()
            .returning(|_| Ok(MANIFEST.to_string()));

        let tags = detect_cargo(&runtime);
        assert!(tags.contains(&Tag::cargo("ripgrep")));
    }
}
