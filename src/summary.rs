//! Human-readable summaries for stdout. JSON output bypasses these and serializes the reports.
use crate::color::paint;
use crate::installer::InstallOutcome;
use crate::manifest::{LoadedAllowList, ManifestSource};
use crate::prune::{PrunePlan, PruneReport};
use crate::scaffold::{EnvSummary, ScaffoldReport};
use crate::template::WriteOutcome;

fn outcome_color(o: &WriteOutcome) -> &'static str {
    match o {
        WriteOutcome::Created | WriteOutcome::Updated => "\x1b[32;1m",
        WriteOutcome::SkippedExisting | WriteOutcome::Unchanged => "\x1b[90m",
        WriteOutcome::CheckFailed { .. } => "\x1b[31;1m",
    }
}

pub fn scaffold_lines(report: &ScaffoldReport, use_color: bool) -> Vec<String> {
    let mut out = Vec::new();
    match &report.environment {
        EnvSummary::Created { path, activate } => {
            out.push(format!("Virtual environment created at {}", path.display()));
            out.push(format!("Activate venv: {}", activate));
        }
        EnvSummary::Skipped { path } => {
            out.push(format!(
                "Virtual environment skipped ({} not created)",
                path.display()
            ));
        }
    }
    for f in &report.files {
        let verb = paint(
            use_color,
            outcome_color(&f.outcome),
            &format!("{:<9}", f.outcome.verb()),
        );
        let line = match &f.outcome {
            WriteOutcome::SkippedExisting => format!("{verb} {} (already exists)", f.path),
            WriteOutcome::Unchanged => format!("{verb} {} (content is the same)", f.path),
            WriteOutcome::CheckFailed { reason } => {
                format!("{verb} {} (could not check: {reason})", f.path)
            }
            WriteOutcome::Created | WriteOutcome::Updated => format!("{verb} {}", f.path),
        };
        out.push(line);
    }
    match &report.install {
        Some(InstallOutcome::Reminded { message }) => {
            out.push(String::new());
            out.push(message.clone());
        }
        Some(InstallOutcome::Ran { program, command }) => {
            out.push(format!("Ran {program} {command} in {}", report.root.display()));
        }
        None => {}
    }
    out.push(String::new());
    out.push(format!(
        "Project structure created for '{}' in {}.",
        report.spec.name,
        report.root.display()
    ));
    out
}

pub fn manifest_line(loaded: &LoadedAllowList) -> String {
    match &loaded.source {
        ManifestSource::File { path } => format!(
            "Allow-list: {} ({} entries)",
            path.display(),
            loaded.allow.len()
        ),
        ManifestSource::Default { .. } => format!(
            "Allow-list: built-in default ({} entries)",
            loaded.allow.len()
        ),
    }
}

pub fn prune_lines(plan: &PrunePlan, report: &PruneReport, use_color: bool) -> Vec<String> {
    let mut out = Vec::new();
    for rel in &report.deleted {
        if report.dry_run {
            out.push(format!(
                "{} {}",
                paint(use_color, "\x1b[33m", "DRY-RUN:"),
                paint(use_color, "\x1b[34;1m", &format!("rm {rel}"))
            ));
        } else {
            out.push(format!("Deleted unlisted file: {rel}"));
        }
    }
    let head = if report.dry_run {
        format!(
            "Would delete {} file(s) under {}; keeping {}.",
            report.deleted.len(),
            plan.root.display(),
            plan.keep.len()
        )
    } else {
        format!(
            "Deleted {} file(s) under {}; kept {}; {} failure(s).",
            report.deleted.len(),
            plan.root.display(),
            plan.keep.len(),
            report.failed.len()
        )
    };
    out.push(head);
    out
}
