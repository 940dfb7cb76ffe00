//! Dependency installers, invoked explicitly by the caller after scaffolding.
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Serialize;
use tracing::instrument;

use crate::errors::ScaffoldError;

pub const INSTALL_REMINDER: &str =
    "Remember to activate your virtual environment and install any necessary dependencies.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InstallOutcome {
    Reminded { message: String },
    Ran { program: String, command: String },
}

pub trait DependencyInstaller {
    fn install(&self, project_root: &Path) -> Result<InstallOutcome, ScaffoldError>;
}

/// Installs nothing; hands back the reminder line for the summary.
#[derive(Debug, Clone, Default)]
pub struct Reminder;

impl DependencyInstaller for Reminder {
    fn install(&self, _project_root: &Path) -> Result<InstallOutcome, ScaffoldError> {
        Ok(InstallOutcome::Reminded {
            message: INSTALL_REMINDER.to_string(),
        })
    }
}

/// Runs `npm <command>` in the project root; blocking, non-zero exit is an error.
#[derive(Debug, Clone)]
pub struct NpmCommand {
    program: PathBuf,
    command: String,
}

impl NpmCommand {
    pub fn new(program: impl Into<PathBuf>, command: impl Into<String>) -> Self {
        NpmCommand {
            program: program.into(),
            command: command.into(),
        }
    }

    /// Locate `npm` on PATH.
    pub fn discover(command: impl Into<String>) -> Result<Self, ScaffoldError> {
        let program = which::which("npm").map_err(|_| ScaffoldError::ProgramNotFound {
            program: "npm".to_string(),
        })?;
        Ok(NpmCommand::new(program, command))
    }

    fn program_label(&self) -> String {
        self.program
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }
}

impl DependencyInstaller for NpmCommand {
    #[instrument(
        level = "debug",
        skip_all,
        fields(command = %self.command, cwd = %project_root.display())
    )]
    fn install(&self, project_root: &Path) -> Result<InstallOutcome, ScaffoldError> {
        let fail = |message: String| ScaffoldError::Installer {
            program: self.program_label(),
            command: self.command.clone(),
            cwd: project_root.to_path_buf(),
            message,
        };
        let status = Command::new(&self.program)
            .arg(&self.command)
            .current_dir(project_root)
            .stdin(Stdio::null())
            .status()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ScaffoldError::ProgramNotFound {
                        program: self.program.display().to_string(),
                    }
                } else {
                    fail(e.to_string())
                }
            })?;
        if !status.success() {
            return Err(fail(format!("exited with {status}")));
        }
        Ok(InstallOutcome::Ran {
            program: self.program_label(),
            command: self.command.clone(),
        })
    }
}
