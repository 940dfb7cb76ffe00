//! Error mapping guide:
//! - Map io::ErrorKind::NotFound and missing programs to exit code 127; all others to 1.
//! - Display strings omit the source; the binary prints the full chain with `{:#}`.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("invalid project name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("{action} {}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed manifest {}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{program} not found in PATH")]
    ProgramNotFound { program: String },

    #[error("failed to create environment at {}: {message}", path.display())]
    Environment { path: PathBuf, message: String },

    #[error("{program} {command} failed in {}: {message}", cwd.display())]
    Installer {
        program: String,
        command: String,
        cwd: PathBuf,
        message: String,
    },

    #[error("project root {} does not exist", path.display())]
    RootMissing { path: PathBuf },

    #[error("project root {} is not a directory", path.display())]
    RootNotDirectory { path: PathBuf },
}

impl ScaffoldError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        ScaffoldError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Map an io::Error to a process exit code:
/// - 127 for NotFound (command not found)
/// - 1 for all other errors
pub fn exit_code_for_io_error(e: &io::Error) -> u8 {
    if e.kind() == io::ErrorKind::NotFound {
        127
    } else {
        1
    }
}

/// Convert ScaffoldError to exit code (parity with io::Error mapping for spawn failures).
pub fn exit_code_for_error(e: &ScaffoldError) -> u8 {
    match e {
        ScaffoldError::ProgramNotFound { .. } => 127,
        // A missing target file is a plain failure, not "command not found".
        _ => 1,
    }
}

/// Walk an anyhow chain looking for a ScaffoldError to pick the exit code.
pub fn exit_code_for_anyhow(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if let Some(se) = cause.downcast_ref::<ScaffoldError>() {
            return exit_code_for_error(se);
        }
        if let Some(ioe) = cause.downcast_ref::<io::Error>() {
            return exit_code_for_io_error(ioe);
        }
    }
    1
}
