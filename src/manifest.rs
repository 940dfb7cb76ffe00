//! Allow-list manifest (`files_to_keep.json`): a JSON array of root-relative paths.
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::instrument;

use crate::errors::ScaffoldError;

pub const MANIFEST_FILE: &str = "files_to_keep.json";

/// Used when the manifest is missing or unreadable.
pub const DEFAULT_ALLOW_LIST: &[&str] = &[
    "README.md",
    "config/config.yaml",
    "notebooks/data_analysis.ipynb",
    "scripts/fetch_data.py",
    "scripts/process_data.py",
];

/// Root-relative paths exempt from pruning. Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct AllowList {
    entries: BTreeSet<String>,
}

impl AllowList {
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AllowList {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    pub fn defaults() -> Self {
        AllowList::from_entries(DEFAULT_ALLOW_LIST.iter().copied())
    }

    pub fn contains(&self, rel: &str) -> bool {
        self.entries.contains(rel)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ManifestSource {
    File { path: PathBuf },
    Default { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadedAllowList {
    pub source: ManifestSource,
    pub allow: AllowList,
}

/// Parse manifest text. Anything other than a JSON array of strings is an error.
pub fn parse_manifest(path: &Path, text: &str) -> Result<AllowList, ScaffoldError> {
    let entries: Vec<String> =
        serde_json::from_str(text).map_err(|source| ScaffoldError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(AllowList::from_entries(entries))
}

/// Load the allow-list from `path`, falling back to `fallback` when the file cannot be read.
/// Parse errors are returned, not replaced by the fallback.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn load_allow_list(
    path: &Path,
    fallback: &AllowList,
) -> Result<LoadedAllowList, ScaffoldError> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!(error = %e, "manifest unavailable; using default allow-list");
            return Ok(LoadedAllowList {
                source: ManifestSource::Default {
                    reason: e.to_string(),
                },
                allow: fallback.clone(),
            });
        }
    };
    let allow = parse_manifest(path, &text)?;
    tracing::debug!(entries = allow.len(), "manifest loaded");
    Ok(LoadedAllowList {
        source: ManifestSource::File {
            path: path.to_path_buf(),
        },
        allow,
    })
}

/// Resolve the manifest location: explicit path (relative to `cwd`) or `<cwd>/files_to_keep.json`.
pub fn manifest_path(cwd: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => cwd.join(p),
        None => cwd.join(MANIFEST_FILE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_manifest_falls_back_to_defaults() {
        let td = tempfile::tempdir().expect("tmpdir");
        let loaded =
            load_allow_list(&td.path().join(MANIFEST_FILE), &AllowList::defaults()).unwrap();
        assert!(matches!(loaded.source, ManifestSource::Default { .. }));
        assert_eq!(loaded.allow.len(), DEFAULT_ALLOW_LIST.len());
        assert!(loaded.allow.contains("scripts/fetch_data.py"));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_manifest_falls_back_to_defaults() {
        // The path exists but reading it fails (EISDIR).
        let td = tempfile::tempdir().expect("tmpdir");
        let p = td.path().join(MANIFEST_FILE);
        std::fs::create_dir_all(&p).unwrap();
        let loaded = load_allow_list(&p, &AllowList::defaults()).unwrap();
        assert!(matches!(loaded.source, ManifestSource::Default { .. }), "{:?}", loaded.source);
        assert_eq!(loaded.allow, AllowList::defaults());
    }

    #[test]
    fn test_manifest_file_replaces_defaults() {
        let td = tempfile::tempdir().expect("tmpdir");
        let p = td.path().join(MANIFEST_FILE);
        std::fs::write(&p, r#"["README.md", "notes/todo.txt"]"#).unwrap();
        let loaded = load_allow_list(&p, &AllowList::defaults()).unwrap();
        assert_eq!(loaded.source, ManifestSource::File { path: p.clone() });
        assert!(loaded.allow.contains("README.md"));
        assert!(loaded.allow.contains("notes/todo.txt"));
        assert!(!loaded.allow.contains("scripts/fetch_data.py"));
    }

    #[test]
    fn test_malformed_manifest_is_an_error() {
        let td = tempfile::tempdir().expect("tmpdir");
        let p = td.path().join(MANIFEST_FILE);
        std::fs::write(&p, "[\"README.md\",").unwrap();
        let err = load_allow_list(&p, &AllowList::defaults()).unwrap_err();
        assert!(matches!(err, ScaffoldError::Manifest { .. }), "{:?}", err);
    }

    #[test]
    fn test_manifest_must_be_array_of_strings() {
        let p = Path::new("files_to_keep.json");
        assert!(parse_manifest(p, r#"{"README.md": true}"#).is_err());
        assert!(parse_manifest(p, "[1, 2]").is_err());
        assert!(parse_manifest(p, "[]").unwrap().is_empty());
    }

    #[test]
    fn test_matching_is_case_and_separator_sensitive() {
        let allow = AllowList::from_entries(["scripts/fetch_data.py"]);
        assert!(allow.contains("scripts/fetch_data.py"));
        assert!(!allow.contains("Scripts/fetch_data.py"));
        assert!(!allow.contains("scripts\\fetch_data.py"));
        assert!(!allow.contains("./scripts/fetch_data.py"));
    }

    #[test]
    fn test_manifest_path_resolution() {
        let cwd = Path::new("/work");
        assert_eq!(manifest_path(cwd, None), PathBuf::from("/work/files_to_keep.json"));
        assert_eq!(
            manifest_path(cwd, Some(Path::new("cfg/keep.json"))),
            PathBuf::from("/work/cfg/keep.json")
        );
        #[cfg(unix)]
        assert_eq!(
            manifest_path(cwd, Some(Path::new("/etc/keep.json"))),
            PathBuf::from("/etc/keep.json")
        );
    }
}
