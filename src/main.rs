use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use proj_scaffold::config::Settings;
use proj_scaffold::manifest::manifest_path;
use proj_scaffold::prune::prompt::{check_and_prompt, PruneOpts};
use proj_scaffold::ui::prompt::{ask_line, ask_yes_no, stdin_is_interactive};
use proj_scaffold::{
    color_enabled_stderr, color_enabled_stdout, execute_prune, load_allow_list, log_error_stderr,
    plan_prune, set_color_mode, warn_print, AllowList, DependencyInstaller, EnvProvisioner,
    LoadedAllowList, ManifestSource, NoEnv, NpmCommand, ProjectSpec, PrunePlan, PruneReport,
    PythonVenv, Reminder, ScaffoldReport, Scaffolder,
};

mod cli;

use cli::{Cli, Command, ManifestArgs};

#[derive(Serialize)]
struct PruneOutput {
    allow_list: LoadedAllowList,
    plan: PrunePlan,
    result: PruneReport,
}

#[derive(Serialize)]
struct NewOutput<'a> {
    scaffold: &'a ScaffoldReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    prune: Option<&'a PruneOutput>,
}

/// Outcome of the prune step: finished, or stopped at the confirmation gate with an exit code.
enum PruneStep {
    Done(PruneOutput),
    Stopped(u8),
}

struct NewArgs {
    name: Option<String>,
    overwrite: bool,
    install_deps: bool,
    no_venv: bool,
    python: Option<PathBuf>,
    npm: Option<String>,
    base_dir: Option<PathBuf>,
    prune: bool,
    manifest: ManifestArgs,
    json: bool,
}

/// Ask the three interactive questions; flags already given skip their question.
fn prompt_spec(overwrite: bool, install_deps: bool) -> Result<ProjectSpec> {
    if !stdin_is_interactive() {
        bail!("project name is required when stdin is not a terminal");
    }
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stderr();
    let name = ask_line(&mut input, &mut out, "Enter project name: ")?;
    let overwrite =
        overwrite || ask_yes_no(&mut input, &mut out, "Overwrite existing project? (y/n): ")?;
    let install_deps =
        install_deps || ask_yes_no(&mut input, &mut out, "Install dependencies? (y/n): ")?;
    Ok(ProjectSpec::new(&name, overwrite, install_deps)?)
}

/// Process exit code for a refusal from the confirmation gate; never 0.
fn gate_exit_code(code: i32) -> u8 {
    u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1)
}

fn resolve_against(cwd: &Path, p: Option<PathBuf>) -> PathBuf {
    match p {
        Some(p) if p.is_absolute() => p,
        Some(p) => cwd.join(p),
        None => cwd.to_path_buf(),
    }
}

/// Load the allow-list, plan, confirm and execute.
fn prune_step(
    root: &Path,
    args: &ManifestArgs,
    settings: &Settings,
    cwd: &Path,
) -> Result<PruneStep> {
    let explicit = args.manifest.as_deref().or(settings.manifest.as_deref());
    let path = manifest_path(cwd, explicit);
    let loaded = load_allow_list(&path, &AllowList::defaults())?;
    if let ManifestSource::Default { reason } = &loaded.source {
        warn_print(&format!(
            "{} not readable ({}); using default allow-list.",
            path.display(),
            reason
        ));
    }

    let plan = plan_prune(root, &loaded.allow)?;
    for rel in &plan.unreadable {
        warn_print(&format!("could not read {} while scanning; left in place", rel));
    }

    let opts = PruneOpts {
        dry_run: args.dry_run,
        yes: args.yes,
    };
    let stdin = io::stdin();
    if let Err(code) = check_and_prompt(
        &plan,
        opts,
        stdin_is_interactive(),
        &mut stdin.lock(),
        &mut io::stderr(),
    ) {
        return Ok(PruneStep::Stopped(gate_exit_code(code)));
    }

    let result = execute_prune(&plan, args.dry_run);
    let use_err = color_enabled_stderr();
    for f in &result.failed {
        log_error_stderr(
            use_err,
            &format!("Error deleting file {}: {}", f.path, f.error),
        );
    }
    Ok(PruneStep::Done(PruneOutput {
        allow_list: loaded,
        plan,
        result,
    }))
}

fn print_prune(out: &PruneOutput) {
    let use_out = color_enabled_stdout();
    println!("{}", proj_scaffold::summary::manifest_line(&out.allow_list));
    for line in proj_scaffold::summary::prune_lines(&out.plan, &out.result, use_out) {
        println!("{line}");
    }
}

fn run_new(args: NewArgs, settings: &Settings) -> Result<u8> {
    let cwd = env::current_dir().context("failed to determine current directory")?;
    let install_deps = args.install_deps || args.npm.is_some();
    let spec = match &args.name {
        Some(n) => ProjectSpec::new(n, args.overwrite, install_deps)?,
        None => prompt_spec(args.overwrite, install_deps)?,
    };
    let base = resolve_against(&cwd, args.base_dir);

    let venv;
    let provisioner: &dyn EnvProvisioner = if args.no_venv {
        &NoEnv
    } else {
        let explicit = args.python.as_deref().or(settings.python.as_deref());
        venv = PythonVenv::discover(explicit)?;
        &venv
    };
    let npm;
    let installer: &dyn DependencyInstaller = match &args.npm {
        Some(cmd) => {
            npm = NpmCommand::discover(cmd.clone())?;
            &npm
        }
        None => &Reminder,
    };

    let report = Scaffolder::new(provisioner)
        .with_installer(installer)
        .run(&spec, &base)?;

    let pruned = if args.prune {
        match prune_step(&report.root, &args.manifest, settings, &cwd)? {
            PruneStep::Done(p) => Some(p),
            PruneStep::Stopped(code) => {
                if !args.json {
                    print_scaffold(&report);
                }
                return Ok(code);
            }
        }
    } else {
        None
    };

    if args.json {
        let doc = NewOutput {
            scaffold: &report,
            prune: pruned.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print_scaffold(&report);
        if let Some(p) = &pruned {
            println!();
            print_prune(p);
        }
    }
    Ok(0)
}

fn print_scaffold(report: &ScaffoldReport) {
    let use_out = color_enabled_stdout();
    for line in proj_scaffold::summary::scaffold_lines(report, use_out) {
        println!("{line}");
    }
}

fn run_prune(root: PathBuf, args: ManifestArgs, json: bool, settings: &Settings) -> Result<u8> {
    let cwd = env::current_dir().context("failed to determine current directory")?;
    let root = resolve_against(&cwd, Some(root));
    let out = match prune_step(&root, &args, settings, &cwd)? {
        PruneStep::Done(out) => out,
        PruneStep::Stopped(code) => return Ok(code),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_prune(&out);
    }
    Ok(0)
}

fn main() -> ExitCode {
    // .env values only fill variables that are not already set
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let settings = Settings::from_env();
    if let Some(mode) = cli.color.or(settings.color) {
        set_color_mode(mode);
    }
    proj_scaffold::logging::init_logging(settings.log.as_deref(), cli.verbose);

    let result = match cli.command {
        Command::New {
            name,
            overwrite,
            install_deps,
            no_venv,
            python,
            npm,
            base_dir,
            prune,
            manifest,
            json,
        } => run_new(
            NewArgs {
                name,
                overwrite,
                install_deps,
                no_venv,
                python,
                npm,
                base_dir,
                prune,
                manifest,
                json,
            },
            &settings,
        ),
        Command::Prune {
            root,
            manifest,
            json,
        } => run_prune(root, manifest, json, &settings),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            let use_err = color_enabled_stderr();
            log_error_stderr(use_err, &format!("proj-scaffold: {e:#}"));
            ExitCode::from(proj_scaffold::exit_code_for_anyhow(&e))
        }
    }
}
