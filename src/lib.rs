//! Project scaffolder: folder skeleton, template files, a Python virtual environment,
//! and allow-list based pruning of everything else under the project root.

pub mod color;
pub mod config;
pub mod errors;
pub mod installer;
pub mod layout;
pub mod logging;
pub mod manifest;
pub mod project;
pub mod prune;
pub mod scaffold;
pub mod summary;
pub mod template;
pub mod ui;
pub mod venv;

pub use color::{
    color_enabled_stderr, color_enabled_stdout, log_error_stderr, paint, set_color_mode,
    ColorMode,
};
pub use errors::{exit_code_for_anyhow, exit_code_for_error, ScaffoldError};
pub use installer::{DependencyInstaller, InstallOutcome, NpmCommand, Reminder};
pub use manifest::{load_allow_list, AllowList, LoadedAllowList, ManifestSource};
pub use project::{default_templates, FileTemplate, ProjectSpec};
pub use prune::{execute_prune, plan_prune, PrunePlan, PruneReport};
pub use scaffold::{ScaffoldReport, Scaffolder};
pub use template::{write_template, WriteOutcome};
pub use ui::warn::warn_print;
pub use venv::{EnvProvisioner, NoEnv, PythonVenv};
