//! Refuse/confirm gate for prune: dry-run and --yes pass, otherwise ask on an interactive terminal.
use std::io::{BufRead, Write};

use super::PrunePlan;
use crate::{color_enabled_stderr, paint};

#[derive(Debug, Clone, Copy, Default)]
pub struct PruneOpts {
    pub dry_run: bool,
    pub yes: bool,
}

/// Returns Ok(()) to proceed; Err(exit_code) to abort or refuse.
pub fn check_and_prompt<R: BufRead, W: Write>(
    plan: &PrunePlan,
    opts: PruneOpts,
    interactive: bool,
    input: &mut R,
    output: &mut W,
) -> Result<(), i32> {
    if plan.delete.is_empty() || opts.dry_run || opts.yes {
        return Ok(());
    }
    let use_err = color_enabled_stderr();
    if !interactive {
        eprintln!(
            "{}",
            paint(
                use_err,
                "\x1b[31;1m",
                "proj-scaffold: refusing to delete without confirmation on non-interactive stdin. Re-run with --yes or --dry-run."
            )
        );
        return Err(1);
    }
    for target in &plan.delete {
        let _ = writeln!(output, "  {}", paint(use_err, "\x1b[34;1m", &target.rel));
    }
    let prompt = format!(
        "proj-scaffold: about to delete {} file(s) under {}. Proceed? [y/N] ",
        plan.delete.len(),
        plan.root.display()
    );
    let prompt = paint(use_err, "\x1b[33m", &prompt);
    match crate::ui::prompt::confirm(input, output, &prompt) {
        Ok(true) => Ok(()),
        _ => {
            let _ = writeln!(output, "aborted.");
            Err(1)
        }
    }
}
