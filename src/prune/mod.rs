//! Prune: delete every file under the project root whose relative path is not allow-listed.
//!
//! Planning is read-only; `execute_prune` performs the deletions (or previews them in dry-run).
//! Directories are never removed, only files and file symlinks.

pub mod prompt;

use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::instrument;
use walkdir::WalkDir;

use crate::errors::ScaffoldError;
use crate::manifest::AllowList;

#[derive(Debug, Clone, Default, Serialize)]
pub struct PrunePlan {
    pub root: PathBuf,
    pub keep: Vec<String>,
    pub delete: Vec<PruneTarget>,
    /// Entries the walk could not read; neither kept nor deleted.
    pub unreadable: Vec<String>,
}

/// A file scheduled for deletion. Serializes as its display key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PruneTarget {
    /// Root-relative key for output; lossy when the name is not valid UTF-8.
    pub rel: String,
    /// The walked path, removed as-is.
    #[serde(skip)]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct PruneFailure {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PruneReport {
    pub dry_run: bool,
    pub deleted: Vec<String>,
    pub failed: Vec<PruneFailure>,
}

fn join_components<F>(root: &Path, path: &Path, mut part: F) -> Option<String>
where
    F: FnMut(&OsStr) -> Option<String>,
{
    let rel = path.strip_prefix(root).ok()?;
    let mut parts: Vec<String> = Vec::new();
    for c in rel.components() {
        match c {
            Component::Normal(s) => parts.push(part(s)?),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Root-relative path of `path` with `/` separators, or None when `path` is not under `root`.
/// Non-UTF-8 components are rendered lossily; use it for display only.
pub fn relative_key(root: &Path, path: &Path) -> Option<String> {
    join_components(root, path, |s| Some(s.to_string_lossy().into_owned()))
}

/// Like `relative_key`, but None when any component is not valid UTF-8.
/// Such a name can never equal an allow-list entry.
pub fn matching_key(root: &Path, path: &Path) -> Option<String> {
    join_components(root, path, |s| s.to_str().map(str::to_owned))
}

/// Walk `root` and sort its files into keep/delete according to `allow`.
#[instrument(level = "debug", skip_all, fields(root = %root.display(), allow = allow.len()))]
pub fn plan_prune(root: &Path, allow: &AllowList) -> Result<PrunePlan, ScaffoldError> {
    match fs::metadata(root) {
        Ok(m) if m.is_dir() => {}
        Ok(_) => {
            return Err(ScaffoldError::RootNotDirectory {
                path: root.to_path_buf(),
            })
        }
        Err(_) => {
            return Err(ScaffoldError::RootMissing {
                path: root.to_path_buf(),
            })
        }
    }
    let mut plan = PrunePlan {
        root: root.to_path_buf(),
        ..PrunePlan::default()
    };
    for entry in WalkDir::new(root).follow_links(false).min_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let at = e
                    .path()
                    .and_then(|p| relative_key(root, p))
                    .unwrap_or_else(|| root.display().to_string());
                tracing::warn!(path = %at, error = %e, "skipping unreadable entry");
                plan.unreadable.push(at);
                continue;
            }
        };
        let ft = entry.file_type();
        if ft.is_dir() {
            continue;
        }
        // A symlink to a directory is treated like a directory (not descended, not deleted).
        if ft.is_symlink() && fs::metadata(entry.path()).map(|m| m.is_dir()).unwrap_or(false) {
            continue;
        }
        let Some(rel) = relative_key(root, entry.path()) else {
            continue;
        };
        let listed = matching_key(root, entry.path()).is_some_and(|k| allow.contains(&k));
        if listed {
            plan.keep.push(rel);
        } else {
            plan.delete.push(PruneTarget {
                rel,
                path: entry.into_path(),
            });
        }
    }
    plan.keep.sort();
    plan.delete.sort_by(|a, b| a.rel.cmp(&b.rel));
    Ok(plan)
}

/// Delete the planned files. Per-file failures are collected and do not stop the run.
#[instrument(
    level = "debug",
    skip_all,
    fields(root = %plan.root.display(), count = plan.delete.len(), dry_run = dry_run)
)]
pub fn execute_prune(plan: &PrunePlan, dry_run: bool) -> PruneReport {
    let mut report = PruneReport {
        dry_run,
        ..PruneReport::default()
    };
    for target in &plan.delete {
        let rel = &target.rel;
        if dry_run {
            report.deleted.push(rel.clone());
            continue;
        }
        match fs::remove_file(&target.path) {
            Ok(()) => {
                tracing::debug!(path = %rel, "deleted");
                report.deleted.push(rel.clone());
            }
            Err(e) => {
                tracing::warn!(path = %rel, error = %e, "delete failed");
                report.failed.push(PruneFailure {
                    path: rel.clone(),
                    error: e.to_string(),
                });
            }
        }
    }
    report
}
