//! Environment provisioning: a Python virtual environment under the project root.
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::instrument;

use crate::errors::ScaffoldError;

/// Creates the isolated runtime environment for a project.
pub trait EnvProvisioner {
    /// Short label used in summaries ("python -m venv", "skipped").
    fn describe(&self) -> String;

    /// Create the environment at `env_dir`. Errors are fatal for the run.
    fn provision(&self, env_dir: &Path) -> Result<EnvOutcome, ScaffoldError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvOutcome {
    Created { activate: String },
    Skipped,
}

/// `<python> -m venv <env_dir>` with pip bundled.
#[derive(Debug, Clone)]
pub struct PythonVenv {
    interpreter: PathBuf,
}

impl PythonVenv {
    pub fn new(interpreter: impl Into<PathBuf>) -> Self {
        PythonVenv {
            interpreter: interpreter.into(),
        }
    }

    /// Resolve the interpreter: explicit override, else `python3`, else `python` on PATH.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ScaffoldError> {
        if let Some(p) = explicit {
            return Ok(PythonVenv::new(p));
        }
        which::which("python3")
            .or_else(|_| which::which("python"))
            .map(PythonVenv::new)
            .map_err(|_| ScaffoldError::ProgramNotFound {
                program: "python3".to_string(),
            })
    }

    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }
}

impl EnvProvisioner for PythonVenv {
    fn describe(&self) -> String {
        format!("{} -m venv", self.interpreter.display())
    }

    #[instrument(level = "debug", skip_all, fields(env_dir = %env_dir.display()))]
    fn provision(&self, env_dir: &Path) -> Result<EnvOutcome, ScaffoldError> {
        if let Some(parent) = env_dir.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ScaffoldError::io("failed to create directory", parent, e))?;
        }
        let out = Command::new(&self.interpreter)
            .arg("-m")
            .arg("venv")
            .arg(env_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ScaffoldError::ProgramNotFound {
                        program: self.interpreter.display().to_string(),
                    }
                } else {
                    ScaffoldError::Environment {
                        path: env_dir.to_path_buf(),
                        message: e.to_string(),
                    }
                }
            })?;
        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("venv exited with {}", out.status)
            } else {
                stderr
            };
            return Err(ScaffoldError::Environment {
                path: env_dir.to_path_buf(),
                message,
            });
        }
        tracing::debug!("virtual environment created");
        Ok(EnvOutcome::Created {
            activate: activation_hint(env_dir),
        })
    }
}

/// Used with `--no-venv`: ensures the parent (project root) exists, creates nothing else.
#[derive(Debug, Clone, Default)]
pub struct NoEnv;

impl EnvProvisioner for NoEnv {
    fn describe(&self) -> String {
        "skipped".to_string()
    }

    fn provision(&self, env_dir: &Path) -> Result<EnvOutcome, ScaffoldError> {
        if let Some(parent) = env_dir.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ScaffoldError::io("failed to create directory", parent, e))?;
        }
        Ok(EnvOutcome::Skipped)
    }
}

/// The command an operator runs to activate the environment on this platform.
pub fn activation_hint(env_dir: &Path) -> String {
    if cfg!(windows) {
        env_dir.join("Scripts").join("activate").display().to_string()
    } else {
        format!("source {}", env_dir.join("bin").join("activate").display())
    }
}
