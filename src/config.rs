//! The declarative package configuration (`.chezmoidata.yaml`).
//!
//! The document is kept as a raw [`serde_yaml::Mapping`] rather than a typed
//! struct: the reconciler mutates a handful of sections in place and must
//! write back everything else untouched, in the original key order (the
//! mapping preserves insertion order).
//!
//! Four regions contribute to the Configured Set:
//!
//! - `platform_packages.darwin.{system,development,shell}` — brew formulae
//! - `platform_packages.darwin.{applications,fonts}` — brew casks
//! - `languages` — version-pinned mise tools
//! - `cli_tools.<tool>.{brew,cargo,npm}` — per-manager install methods

use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeSet;
use std::path::Path;

use crate::runtime::Runtime;
use crate::tag::{Manager, Tag};

pub const CONFIG_FILE_NAME: &str = ".chezmoidata.yaml";

/// Sections of `platform_packages.darwin` holding formula names.
const FORMULA_SECTIONS: [&str; 3] = ["system", "development", "shell"];
/// Sections of `platform_packages.darwin` holding cask names.
const CASK_SECTIONS: [&str; 2] = ["applications", "fonts"];

const DESCRIPTION_PLACEHOLDER: &str = "Added via dotsync";

#[derive(Debug, Clone, Default)]
pub struct Config {
    doc: Mapping,
}

impl Config {
    pub fn parse(source: &str) -> Result<Config> {
        let doc: Mapping =
            serde_yaml::from_str(source).context("Failed to parse configuration YAML")?;
        Ok(Config { doc })
    }

    pub fn load(runtime: &impl Runtime, path: &Path) -> Result<Config> {
        let source = runtime
            .read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Config::parse(&source)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.doc).context("Failed to serialize configuration")
    }

    pub fn save(&self, runtime: &impl Runtime, path: &Path) -> Result<()> {
        let rendered = self.to_yaml()?;
        runtime
            .write(path, rendered.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// The Configured Set: every tag declared anywhere in the document.
    pub fn tags(&self) -> BTreeSet<Tag> {
        let mut tags = BTreeSet::new();

        if let Some(darwin) = self.darwin() {
            for section in FORMULA_SECTIONS {
                for name in string_items(darwin, section) {
                    tags.insert(Tag::formula(name));
                }
            }
            for section in CASK_SECTIONS {
                for name in string_items(darwin, section) {
                    tags.insert(Tag::cask(name));
                }
            }
        }

        if let Some(languages) = self.mapping_at("languages") {
            for (tool, version) in languages {
                if let (Some(tool), Some(version)) = (tool.as_str(), scalar_string(version)) {
                    tags.insert(Tag::mise(tool, version));
                }
            }
        }

        if let Some(tools) = self.mapping_at("cli_tools") {
            for (_, methods) in tools {
                let Some(methods) = methods.as_mapping() else {
                    continue;
                };
                if let Some(name) = methods.get("brew").and_then(Value::as_str) {
                    tags.insert(Tag::formula(name));
                }
                if let Some(name) = methods.get("cargo").and_then(Value::as_str) {
                    tags.insert(Tag::cargo(name));
                }
                if let Some(name) = methods.get("npm").and_then(Value::as_str) {
                    tags.insert(Tag::npm(name));
                }
            }
        }

        tags
    }

    /// Language names from the `languages` section, used by the mise
    /// detector for alias resolution.
    pub fn language_names(&self) -> Vec<String> {
        self.mapping_at("languages")
            .map(|languages| {
                languages
                    .keys()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Currently pinned version for a language, if any.
    pub fn language_version(&self, tool: &str) -> Option<String> {
        self.mapping_at("languages")
            .and_then(|languages| languages.get(tool))
            .and_then(scalar_string)
    }

    /// Append a formula to `platform_packages.darwin.system` unless some
    /// darwin section already lists it. Returns whether it was added.
    pub fn add_formula(&mut self, name: &str) -> bool {
        if self.darwin_lists(&FORMULA_SECTIONS, name) {
            return false;
        }
        let list = ensure_list(ensure_darwin(&mut self.doc), "system");
        list.push(Value::String(name.to_string()));
        true
    }

    /// Append a cask to `platform_packages.darwin.applications` unless some
    /// darwin section already lists it. Returns whether it was added.
    pub fn add_cask(&mut self, name: &str) -> bool {
        if self.darwin_lists(&CASK_SECTIONS, name) {
            return false;
        }
        let list = ensure_list(ensure_darwin(&mut self.doc), "applications");
        list.push(Value::String(name.to_string()));
        true
    }

    /// Pin a language version, creating the `languages` section if needed.
    pub fn set_language_version(&mut self, tool: &str, version: &str) {
        let languages = ensure_mapping(&mut self.doc, "languages");
        languages.insert(
            Value::String(tool.to_string()),
            Value::String(version.to_string()),
        );
    }

    /// Register a CLI tool installed through cargo or npm, unless an entry
    /// with the tool's name already exists. Returns whether it was added.
    pub fn add_cli_tool(&mut self, name: &str, method: Manager) -> bool {
        let tools = ensure_mapping(&mut self.doc, "cli_tools");
        if tools.contains_key(name) {
            return false;
        }
        let mut entry = Mapping::new();
        entry.insert(
            Value::String(method.as_str().to_string()),
            Value::String(name.to_string()),
        );
        entry.insert(
            Value::String("description".to_string()),
            Value::String(DESCRIPTION_PLACEHOLDER.to_string()),
        );
        tools.insert(Value::String(name.to_string()), Value::Mapping(entry));
        true
    }

    fn mapping_at(&self, key: &str) -> Option<&Mapping> {
        self.doc.get(key).and_then(Value::as_mapping)
    }

    fn darwin(&self) -> Option<&Mapping> {
        self.mapping_at("platform_packages")
            .and_then(|platforms| platforms.get("darwin"))
            .and_then(Value::as_mapping)
    }

    fn darwin_lists(&self, sections: &[&str], name: &str) -> bool {
        self.darwin()
            .map(|darwin| {
                sections
                    .iter()
                    .any(|section| string_items(darwin, section).any(|item| item == name))
            })
            .unwrap_or(false)
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        // Version pins like `3.12` may parse as numbers.
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_items<'a>(map: &'a Mapping, key: &str) -> impl Iterator<Item = &'a str> {
    map.get(key)
        .and_then(Value::as_sequence)
        .map(|seq| seq.as_slice())
        .unwrap_or_default()
        .iter()
        .filter_map(Value::as_str)
}

fn ensure_mapping<'a>(map: &'a mut Mapping, key: &str) -> &'a mut Mapping {
    let key = Value::String(key.to_string());
    if !matches!(map.get(&key), Some(Value::Mapping(_))) {
        map.insert(key.clone(), Value::Mapping(Mapping::new()));
    }
    match map.get_mut(&key) {
        Some(Value::Mapping(inner)) => inner,
        _ => unreachable!("mapping was just inserted"),
    }
}

fn ensure_list<'a>(map: &'a mut Mapping, key: &str) -> &'a mut Vec<Value> {
    let key = Value::String(key.to_string());
    if !matches!(map.get(&key), Some(Value::Sequence(_))) {
        map.insert(key.clone(), Value::Sequence(Vec::new()));
    }
    match map.get_mut(&key) {
        Some(Value::Sequence(inner)) => inner,
        _ => unreachable!("sequence was just inserted"),
    }
}

fn ensure_darwin(doc: &mut Mapping) -> &mut Mapping {
    ensure_mapping(ensure_mapping(doc, "platform_packages"), "darwin")
}
