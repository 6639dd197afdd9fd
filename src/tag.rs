//! Canonical package tags.
//!
//! A tag identifies one package/tool entry and the manager that owns it. The
//! canonical string form is `manager[:category]:name[:version]`, e.g.
//! `brew:formula:ripgrep`, `brew:cask:kitty`, `mise:golang:1.22.0`,
//! `cargo:ripgrep`, `npm:prettier`.

use anyhow::{Result, bail};
use std::fmt;
use std::str::FromStr;

/// Package manager that owns an entry. Declaration order drives sort order,
/// which in turn drives display grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Manager {
    Brew,
    Mise,
    Cargo,
    Npm,
}

impl Manager {
    pub fn as_str(&self) -> &'static str {
        match self {
            Manager::Brew => "brew",
            Manager::Mise => "mise",
            Manager::Cargo => "cargo",
            Manager::Npm => "npm",
        }
    }
}

impl fmt::Display for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-category for brew entries. Only brew distinguishes one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Formula,
    Cask,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Formula => "formula",
            Category::Cask => "cask",
        }
    }
}

/// One package/tool entry, as an explicit record rather than an encoded
/// string. Two tags differing only in version are distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag {
    pub manager: Manager,
    pub category: Option<Category>,
    pub name: String,
    pub version: Option<String>,
}

impl Tag {
    pub fn formula(name: impl Into<String>) -> Self {
        Tag {
            manager: Manager::Brew,
            category: Some(Category::Formula),
            name: name.into(),
            version: None,
        }
    }

    pub fn cask(name: impl Into<String>) -> Self {
        Tag {
            manager: Manager::Brew,
            category: Some(Category::Cask),
            name: name.into(),
            version: None,
        }
    }

    pub fn mise(tool: impl Into<String>, version: impl Into<String>) -> Self {
        Tag {
            manager: Manager::Mise,
            category: None,
            name: tool.into(),
            version: Some(version.into()),
        }
    }

    pub fn cargo(name: impl Into<String>) -> Self {
        Tag {
            manager: Manager::Cargo,
            category: None,
            name: name.into(),
            version: None,
        }
    }

    pub fn npm(name: impl Into<String>) -> Self {
        Tag {
            manager: Manager::Npm,
            category: None,
            name: name.into(),
            version: None,
        }
    }

    /// Same entry with a different pinned version.
    pub fn with_version(&self, version: impl Into<String>) -> Self {
        Tag {
            version: Some(version.into()),
            ..self.clone()
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.manager)?;
        if let Some(category) = &self.category {
            write!(f, ":{}", category.as_str())?;
        }
        write!(f, ":{}", self.name)?;
        if let Some(version) = &self.version {
            write!(f, ":{}", version)?;
        }
        Ok(())
    }
}

impl FromStr for Tag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.iter().any(|p| p.is_empty()) {
            bail!("Invalid tag '{}': empty segment", s);
        }
        match parts.as_slice() {
            ["brew", "formula", name] => Ok(Tag::formula(*name)),
            ["brew", "cask", name] => Ok(Tag::cask(*name)),
            ["mise", tool, version] => Ok(Tag::mise(*tool, *version)),
            ["cargo", name] => Ok(Tag::cargo(*name)),
            ["npm", name] => Ok(Tag::npm(*name)),
            _ => bail!("Invalid tag '{}'", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_canonical_form() {
        assert_eq!(Tag::formula("ripgrep").to_string(), "brew:formula:ripgrep");
        assert_eq!(Tag::cask("kitty").to_string(), "brew:cask:kitty");
        assert_eq!(Tag::mise("golang", "1.22.0").to_string(), "mise:golang:1.22.0");
        assert_eq!(Tag::cargo("bat").to_string(), "cargo:bat");
        assert_eq!(Tag::npm("prettier").to_string(), "npm:prettier");
    }

    #[test]
    fn parse_roundtrips_every_manager() {
        for raw in [
            "brew:formula:ripgrep",
            "brew:cask:kitty",
            "mise:golang:1.22.0",
            "cargo:bat",
            "npm:prettier",
        ] {
            let tag: Tag = raw.parse().unwrap();
            assert_eq!(tag.to_string(), raw);
        }
    }

    #[test]
    fn parse_rejects_malformed_tags() {
        for raw in ["", "brew", "brew:ripgrep", "brew:formula:", "apt:curl", "mise:go"] {
            assert!(raw.parse::<Tag>().is_err(), "expected '{}' to be rejected", raw);
        }
    }

    #[test]
    fn tags_differing_only_in_version_are_distinct() {
        let old = Tag::mise("golang", "1.21.0");
        let new = old.with_version("1.22.0");
        assert_ne!(old, new);
        assert_eq!(new.name, "golang");
        assert_eq!(new.version.as_deref(), Some("1.22.0"));
    }

    #[test]
    fn ordering_groups_by_manager_first() {
        let mut tags = vec![
            Tag::npm("prettier"),
            Tag::cargo("bat"),
            Tag::mise("golang", "1.22.0"),
            Tag::cask("kitty"),
            Tag::formula("ripgrep"),
        ];
        tags.sort();
        let managers: Vec<Manager> = tags.iter().map(|t| t.manager).collect();
        assert_eq!(
            managers,
            vec![Manager::Brew, Manager::Brew, Manager::Mise, Manager::Cargo, Manager::Npm]
        );
    }
}
