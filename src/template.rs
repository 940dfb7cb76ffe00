//! Template writer: create missing files, leave existing ones alone unless overwrite is set.
use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::instrument;

use crate::errors::ScaffoldError;
use crate::project::FileTemplate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WriteOutcome {
    /// Target did not exist and was written.
    Created,
    /// Target exists and overwrite is off; no comparison is made.
    SkippedExisting,
    /// Overwrite is on and the digests match.
    Unchanged,
    /// Overwrite is on and the content differed.
    Updated,
    /// Existing target could not be inspected; left untouched.
    CheckFailed { reason: String },
}

impl WriteOutcome {
    /// Verb used in progress lines.
    pub fn verb(&self) -> &'static str {
        match self {
            WriteOutcome::Created => "creating",
            WriteOutcome::SkippedExisting => "skipping",
            WriteOutcome::Unchanged => "unchanged",
            WriteOutcome::Updated => "updated",
            WriteOutcome::CheckFailed { .. } => "error",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateReport {
    pub path: String,
    #[serde(flatten)]
    pub outcome: WriteOutcome,
}

/// Lowercase hex SHA-256 of `bytes`.
pub fn content_digest(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Write one file according to the overwrite policy.
#[instrument(level = "debug", skip_all, fields(path = %path.display(), overwrite = overwrite))]
pub fn write_template(
    path: &Path,
    content: &str,
    overwrite: bool,
) -> Result<WriteOutcome, ScaffoldError> {
    match fs::metadata(path) {
        Ok(_) if !overwrite => Ok(WriteOutcome::SkippedExisting),
        Ok(_) => {
            let existing = match fs::read(path) {
                Ok(b) => b,
                Err(e) => {
                    tracing::warn!(error = %e, "could not read existing file");
                    return Ok(WriteOutcome::CheckFailed {
                        reason: e.to_string(),
                    });
                }
            };
            if content_digest(&existing) == content_digest(content.as_bytes()) {
                return Ok(WriteOutcome::Unchanged);
            }
            write_file(path, content)?;
            Ok(WriteOutcome::Updated)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| ScaffoldError::io("failed to create directory", parent, e))?;
            }
            write_file(path, content)?;
            Ok(WriteOutcome::Created)
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not stat existing file");
            Ok(WriteOutcome::CheckFailed {
                reason: e.to_string(),
            })
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), ScaffoldError> {
    fs::write(path, content).map_err(|e| ScaffoldError::io("failed to write", path, e))
}

/// Write every template under `root`, stopping at the first fatal error.
pub fn write_templates(
    root: &Path,
    templates: &[FileTemplate],
    overwrite: bool,
) -> Result<Vec<TemplateReport>, ScaffoldError> {
    let mut reports = Vec::with_capacity(templates.len());
    for t in templates {
        let outcome = write_template(&root.join(&t.path), &t.content, overwrite)?;
        reports.push(TemplateReport {
            path: t.path.clone(),
            outcome,
        });
    }
    Ok(reports)
}
