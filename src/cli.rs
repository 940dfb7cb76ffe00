use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Args, Debug, Clone)]
pub(crate) struct ManifestArgs {
    /// Allow-list manifest (JSON array of root-relative paths); default ./files_to_keep.json
    #[arg(long)]
    pub(crate) manifest: Option<PathBuf>,

    /// Print what would be deleted without deleting
    #[arg(long = "dry-run")]
    pub(crate) dry_run: bool,

    /// Proceed without interactive confirmation
    #[arg(long, short = 'y')]
    pub(crate) yes: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Command {
    /// Create the project skeleton (prompts for name and options when NAME is omitted)
    #[command(
        after_long_help = "Examples:\n  proj-scaffold new myapp\n  proj-scaffold new myapp --overwrite --no-venv\n  proj-scaffold new myapp --prune --dry-run\n"
    )]
    New {
        /// Project directory name, created under --base-dir
        name: Option<String>,

        /// Rewrite existing template files whose content differs
        #[arg(long)]
        overwrite: bool,

        /// Run the dependency step after scaffolding (a reminder unless --npm is given)
        #[arg(long = "install-deps")]
        install_deps: bool,

        /// Do not create the virtual environment
        #[arg(long = "no-venv")]
        no_venv: bool,

        /// Python interpreter used for the virtual environment (overrides PROJ_SCAFFOLD_PYTHON)
        #[arg(long)]
        python: Option<PathBuf>,

        /// Run `npm <CMD>` in the project root as the dependency step (implies --install-deps)
        #[arg(long, value_name = "CMD")]
        npm: Option<String>,

        /// Directory the project is created in (default: current directory)
        #[arg(long = "base-dir")]
        base_dir: Option<PathBuf>,

        /// Prune files not in the allow-list after scaffolding
        #[arg(long)]
        prune: bool,

        #[command(flatten)]
        manifest: ManifestArgs,

        /// Emit machine-readable JSON instead of the summary
        #[arg(long)]
        json: bool,
    },

    /// Delete every file under ROOT whose relative path is not in the allow-list
    #[command(
        after_long_help = "Examples:\n  proj-scaffold prune myapp --dry-run\n  proj-scaffold prune myapp --manifest keep.json --yes\n"
    )]
    Prune {
        /// Project root to prune
        root: PathBuf,

        #[command(flatten)]
        manifest: ManifestArgs,

        /// Emit machine-readable JSON instead of the summary
        #[arg(long)]
        json: bool,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "proj-scaffold",
    version,
    about = "Scaffold a data project: folders, template files, a Python venv, and allow-list pruning."
)]
pub(crate) struct Cli {
    /// Colorize output: auto|always|never (overrides PROJ_SCAFFOLD_COLOR)
    #[arg(long = "color", value_enum, global = true)]
    pub(crate) color: Option<proj_scaffold::ColorMode>,

    /// Print debug diagnostics on stderr (PROJ_SCAFFOLD_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}
