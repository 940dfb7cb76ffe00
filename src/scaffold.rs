//! Scaffold orchestration: environment → folders → templates → installer.
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::instrument;

use crate::errors::ScaffoldError;
use crate::installer::{DependencyInstaller, InstallOutcome};
use crate::layout::create_directories;
use crate::project::{default_templates, FileTemplate, ProjectSpec, ENV_DIR, FOLDERS};
use crate::template::{write_templates, TemplateReport};
use crate::venv::{EnvOutcome, EnvProvisioner};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EnvSummary {
    Created { path: PathBuf, activate: String },
    Skipped { path: PathBuf },
}

#[derive(Debug, Clone, Serialize)]
pub struct ScaffoldReport {
    pub spec: ProjectSpec,
    pub root: PathBuf,
    pub environment: EnvSummary,
    pub folders: Vec<PathBuf>,
    pub files: Vec<TemplateReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install: Option<InstallOutcome>,
}

/// Components a run is assembled from; the binary wires real ones, tests wire fakes.
pub struct Scaffolder<'a> {
    pub provisioner: &'a dyn EnvProvisioner,
    pub installer: Option<&'a dyn DependencyInstaller>,
    pub folders: &'a [&'a str],
    pub templates: Vec<FileTemplate>,
}

impl<'a> Scaffolder<'a> {
    /// Default folders and templates with the given environment provisioner.
    pub fn new(provisioner: &'a dyn EnvProvisioner) -> Self {
        Scaffolder {
            provisioner,
            installer: None,
            folders: FOLDERS,
            templates: default_templates(),
        }
    }

    pub fn with_installer(mut self, installer: &'a dyn DependencyInstaller) -> Self {
        self.installer = Some(installer);
        self
    }

    /// Build the project under `<base>/<spec.name>`.
    ///
    /// The installer runs only when `spec.install_deps` is set.
    #[instrument(
        level = "info",
        skip_all,
        fields(project = %spec.name, overwrite = spec.overwrite)
    )]
    pub fn run(&self, spec: &ProjectSpec, base: &Path) -> Result<ScaffoldReport, ScaffoldError> {
        let root = spec.root_in(base);
        let env_dir = root.join(ENV_DIR);
        tracing::debug!(
            provisioner = %self.provisioner.describe(),
            env_dir = %env_dir.display(),
            "provisioning environment"
        );

        let environment = match self.provisioner.provision(&env_dir)? {
            EnvOutcome::Created { activate } => EnvSummary::Created {
                path: env_dir,
                activate,
            },
            EnvOutcome::Skipped => EnvSummary::Skipped { path: env_dir },
        };

        let folders = create_directories(&root, self.folders)?;
        let files = write_templates(&root, &self.templates, spec.overwrite)?;

        let install = match (spec.install_deps, self.installer) {
            (true, Some(installer)) => Some(installer.install(&root)?),
            _ => None,
        };

        tracing::info!(root = %root.display(), files = files.len(), "scaffold complete");
        Ok(ScaffoldReport {
            spec: spec.clone(),
            root,
            environment,
            folders,
            files,
            install,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::installer::Reminder;
    use crate::template::WriteOutcome;
    use crate::venv::NoEnv;
    use std::cell::RefCell;

    /// Records where it was asked to provision and creates a marker file there.
    #[derive(Default)]
    struct FakeEnv {
        calls: RefCell<Vec<PathBuf>>,
    }

    impl EnvProvisioner for FakeEnv {
        fn describe(&self) -> String {
            "fake".to_string()
        }

        fn provision(&self, env_dir: &Path) -> Result<EnvOutcome, ScaffoldError> {
            self.calls.borrow_mut().push(env_dir.to_path_buf());
            std::fs::create_dir_all(env_dir.join("bin")).unwrap();
            std::fs::write(env_dir.join("pyvenv.cfg"), "home = /usr/bin\n").unwrap();
            Ok(EnvOutcome::Created {
                activate: crate::venv::activation_hint(env_dir),
            })
        }
    }

    struct FailingEnv;

    impl EnvProvisioner for FailingEnv {
        fn describe(&self) -> String {
            "failing".to_string()
        }

        fn provision(&self, env_dir: &Path) -> Result<EnvOutcome, ScaffoldError> {
            Err(ScaffoldError::Environment {
                path: env_dir.to_path_buf(),
                message: "no venv module".to_string(),
            })
        }
    }

    #[test]
    fn test_first_run_creates_everything() {
        let td = tempfile::tempdir().expect("tmpdir");
        let env = FakeEnv::default();
        let spec = ProjectSpec::new("myapp", false, false).unwrap();
        let report = Scaffolder::new(&env).run(&spec, td.path()).unwrap();

        let root = td.path().join("myapp");
        assert_eq!(report.root, root);
        assert_eq!(env.calls.borrow().as_slice(), &[root.join("venv")]);
        assert!(matches!(report.environment, EnvSummary::Created { .. }));
        for f in FOLDERS {
            assert!(root.join(f).is_dir(), "missing folder {}", f);
        }
        for t in default_templates() {
            assert_eq!(std::fs::read_to_string(root.join(&t.path)).unwrap(), t.content);
        }
        assert!(report.files.iter().all(|r| r.outcome == WriteOutcome::Created));
        assert!(report.install.is_none());
    }

    #[test]
    fn test_rerun_without_overwrite_keeps_edits() {
        let td = tempfile::tempdir().expect("tmpdir");
        let spec = ProjectSpec::new("keep", false, false).unwrap();
        let s = Scaffolder::new(&NoEnv);
        s.run(&spec, td.path()).unwrap();
        let readme = td.path().join("keep").join("README.md");
        std::fs::write(&readme, "# Mine").unwrap();

        let report = s.run(&spec, td.path()).unwrap();
        assert_eq!(std::fs::read_to_string(&readme).unwrap(), "# Mine");
        assert!(report
            .files
            .iter()
            .all(|r| r.outcome == WriteOutcome::SkippedExisting));
    }

    #[test]
    fn test_rerun_with_overwrite_reports_unchanged_and_updated() {
        let td = tempfile::tempdir().expect("tmpdir");
        let first = ProjectSpec::new("ow", false, false).unwrap();
        let s = Scaffolder::new(&NoEnv);
        s.run(&first, td.path()).unwrap();
        let readme = td.path().join("ow").join("README.md");
        std::fs::write(&readme, "# Drifted").unwrap();

        let again = ProjectSpec::new("ow", true, false).unwrap();
        let report = s.run(&again, td.path()).unwrap();
        for r in &report.files {
            let expected = if r.path == "README.md" {
                WriteOutcome::Updated
            } else {
                WriteOutcome::Unchanged
            };
            assert_eq!(r.outcome, expected, "{}", r.path);
        }
        assert_eq!(
            std::fs::read_to_string(&readme).unwrap(),
            "# Project Title\n\nProject description goes here."
        );
    }

    #[test]
    fn test_installer_runs_only_when_requested() {
        let td = tempfile::tempdir().expect("tmpdir");
        let s = Scaffolder::new(&NoEnv).with_installer(&Reminder);

        let off = ProjectSpec::new("a", false, false).unwrap();
        assert!(s.run(&off, td.path()).unwrap().install.is_none());

        let on = ProjectSpec::new("b", false, true).unwrap();
        assert!(matches!(
            s.run(&on, td.path()).unwrap().install,
            Some(InstallOutcome::Reminded { .. })
        ));
    }

    #[test]
    fn test_environment_failure_is_fatal_before_folders() {
        let td = tempfile::tempdir().expect("tmpdir");
        let spec = ProjectSpec::new("broken", false, false).unwrap();
        let err = Scaffolder::new(&FailingEnv).run(&spec, td.path()).unwrap_err();
        assert!(matches!(err, ScaffoldError::Environment { .. }));
        assert!(!td.path().join("broken").join("scripts").exists());
    }

    #[test]
    fn test_report_serializes_to_json() {
        let td = tempfile::tempdir().expect("tmpdir");
        let spec = ProjectSpec::new("j", false, true).unwrap();
        let report = Scaffolder::new(&NoEnv)
            .with_installer(&Reminder)
            .run(&spec, td.path())
            .unwrap();
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["spec"]["name"], "j");
        assert_eq!(v["environment"]["status"], "skipped");
        assert_eq!(v["files"][0]["path"], "README.md");
        assert_eq!(v["files"][0]["outcome"], "created");
        assert_eq!(v["install"]["kind"], "reminded");
    }
}
