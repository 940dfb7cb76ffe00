//! Project parameters and the fixed skeleton: folders, template files, environment dir.
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::errors::ScaffoldError;

/// Environment directory created under the project root.
pub const ENV_DIR: &str = "venv";

/// Folders created under the project root, in creation order.
pub const FOLDERS: &[&str] = &[
    "data/raw",
    "data/processed",
    "notebooks",
    "scripts",
    "config",
];

/// Stub files written with `# <file name> - Logic here`, grouped by folder.
const STUB_FILES: &[(&str, &[&str])] = &[
    ("notebooks", &["data_analysis.ipynb"]),
    ("scripts", &["fetch_data.py", "process_data.py"]),
];

/// Input parameters for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSpec {
    pub name: String,
    pub overwrite: bool,
    pub install_deps: bool,
}

impl ProjectSpec {
    /// Validate the name and build the spec. Surrounding whitespace is trimmed.
    pub fn new(
        name: &str,
        overwrite: bool,
        install_deps: bool,
    ) -> Result<ProjectSpec, ScaffoldError> {
        let name = name.trim();
        validate_name(name)?;
        Ok(ProjectSpec {
            name: name.to_string(),
            overwrite,
            install_deps,
        })
    }

    /// Project root: `<base>/<name>`.
    pub fn root_in(&self, base: &Path) -> PathBuf {
        base.join(&self.name)
    }
}

fn validate_name(name: &str) -> Result<(), ScaffoldError> {
    let invalid = |reason| ScaffoldError::InvalidName {
        name: name.to_string(),
        reason,
    };
    if name.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if name.contains('\n') || name.contains('\r') || name.contains('\0') {
        return Err(invalid("must not contain newline or NUL characters"));
    }
    let p = Path::new(name);
    if p.is_absolute() || p.has_root() {
        return Err(invalid("must be a relative path"));
    }
    if p.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(invalid("must not contain '..'"));
    }
    Ok(())
}

/// A relative file path and the text written there on first run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTemplate {
    pub path: String,
    pub content: String,
}

impl FileTemplate {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        FileTemplate {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// The fixed template set, in write order.
pub fn default_templates() -> Vec<FileTemplate> {
    let mut out = vec![
        FileTemplate::new(
            "README.md",
            "# Project Title\n\nProject description goes here.",
        ),
        FileTemplate::new(
            "config/config.yaml",
            "gemini:\n  api_url: 'https://api.gemini.com/v2/campaigns'\n  access_token: 'YOUR_ACCESS_TOKEN'",
        ),
    ];
    for (group, names) in STUB_FILES {
        for file_name in *names {
            out.push(FileTemplate::new(
                format!("{group}/{file_name}"),
                format!("# {file_name} - Logic here"),
            ));
        }
    }
    out
}
