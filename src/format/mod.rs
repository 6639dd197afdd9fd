//! YAML normalization - parse, re-serialize with the canonical style, and
//! report or apply the difference.
//!
//! The canonical style is serde_yaml's block emitter with key order
//! preserved. Comparison is whitespace-insensitive: trailing space is
//! stripped per line and a single trailing newline enforced on both sides,
//! so files differing only in that respect count as unchanged.

use anyhow::Result;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::report::Reporter;
use crate::runtime::Runtime;

const YAML_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// Per-file result of a formatting pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Comment-only or blank file; rewriting would destroy the comments.
    SkippedCommentOnly,
    Unchanged,
    WouldChange,
    Applied,
    Failed(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::SkippedCommentOnly => f.write_str("comments/blank - skipped"),
            Outcome::Unchanged => f.write_str("no change"),
            Outcome::WouldChange => f.write_str("would change"),
            Outcome::Applied => f.write_str("applied"),
            Outcome::Failed(reason) => f.write_str(reason),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    /// Report only; exit non-zero if anything would change.
    pub check: bool,
    /// Write changes in place, backing each file up to `<file>.bak`.
    pub apply: bool,
    pub paths: Vec<PathBuf>,
}

/// Format every YAML file reachable from `options.paths` (or the current
/// directory when empty). Returns the process exit code: 0 clean or
/// applied, 1 check found pending changes, 2 one or more files errored.
pub fn run(runtime: &impl Runtime, reporter: &Reporter, options: &FormatOptions) -> Result<i32> {
    let files = collect_files(runtime, &options.paths)?;
    if files.is_empty() {
        reporter.plain("No YAML files found");
        return Ok(0);
    }

    let mut changed_any = false;
    let mut errors: Vec<(PathBuf, String)> = Vec::new();

    for file in &files {
        let outcome = format_file(runtime, file, options.apply);
        reporter.plain(&format!("{}: {}", file.display(), outcome));
        match &outcome {
            Outcome::WouldChange | Outcome::Applied => changed_any = true,
            Outcome::Failed(reason) => errors.push((file.clone(), reason.clone())),
            Outcome::Unchanged | Outcome::SkippedCommentOnly => {}
        }
    }

    if !errors.is_empty() {
        reporter.plain("\nErrors:");
        for (file, reason) in &errors {
            reporter.plain(&format!("  {}: {}", file.display(), reason));
        }
        return Ok(2);
    }

    if options.check && changed_any {
        reporter.plain("\nFormatting check failed; files would be changed");
        return Ok(1);
    }

    if options.apply && changed_any {
        reporter.plain("\nFormatting applied");
    } else if !changed_any {
        reporter.plain("\nAll files already formatted");
    }
    Ok(0)
}

/// Normalize one file. Read and parse failures are captured in the outcome
/// rather than aborting the batch.
pub fn format_file(runtime: &impl Runtime, path: &Path, apply: bool) -> Outcome {
    let original = match runtime.read_to_string(path) {
        Ok(text) => text,
        Err(error) => return Outcome::Failed(format!("read error: {}", error)),
    };

    if is_comment_or_blank(&original) {
        return Outcome::SkippedCommentOnly;
    }

    let value: serde_yaml::Value = match serde_yaml::from_str(&original) {
        Ok(value) => value,
        Err(error) => return Outcome::Failed(format!("parse error: {}", error)),
    };
    let rendered = match serde_yaml::to_string(&value) {
        Ok(rendered) => rendered,
        Err(error) => return Outcome::Failed(format!("serialize error: {}", error)),
    };

    if normalize_text(&original) == normalize_text(&rendered) {
        return Outcome::Unchanged;
    }

    if !apply {
        return Outcome::WouldChange;
    }

    let backup = backup_path(path);
    if let Err(error) = runtime.copy(path, &backup) {
        return Outcome::Failed(format!("backup error: {}", error));
    }
    if let Err(error) = runtime.write(path, rendered.as_bytes()) {
        return Outcome::Failed(format!("write error: {}", error));
    }
    Outcome::Applied
}

/// Resolve the YAML files to operate on: explicit files as-is, directories
/// walked recursively, the current directory when nothing is given. `.git`
/// is excluded, the result deduped and sorted.
pub fn collect_files(runtime: &impl Runtime, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();

    if paths.is_empty() {
        walk(runtime, Path::new("."), &mut files)?;
    } else {
        for path in paths {
            if runtime.is_dir(path) {
                walk(runtime, path, &mut files)?;
            } else {
                files.insert(path.clone());
            }
        }
    }

    Ok(files.into_iter().collect())
}

fn walk(runtime: &impl Runtime, dir: &Path, files: &mut BTreeSet<PathBuf>) -> Result<()> {
    for entry in runtime.read_dir(dir)? {
        if entry.components().any(|c| c.as_os_str() == ".git") {
            continue;
        }
        if runtime.is_dir(&entry) {
            walk(runtime, &entry, files)?;
        } else if has_yaml_extension(&entry) {
            files.insert(entry);
        }
    }
    Ok(())
}

fn has_yaml_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| YAML_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Strip trailing whitespace per line and enforce one trailing newline.
fn normalize_text(text: &str) -> String {
    let mut normalized = text
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    normalized.push('\n');
    normalized
}

fn is_comment_or_blank(text: &str) -> bool {
    text.lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#'))
}

fn backup_path(path: &Path) -> PathBuf {
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    path.with_file_name(format!("{}.bak", name))
}
