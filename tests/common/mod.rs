use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Run the binary in `dir` with a clean color/config environment and no stdin.
pub fn run_in(dir: &Path, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_proj-scaffold");
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("PROJ_SCAFFOLD_MANIFEST")
        .env_remove("PROJ_SCAFFOLD_COLOR")
        .env_remove("PROJ_SCAFFOLD_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("failed to run proj-scaffold")
}

pub fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

pub fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}

pub fn assert_success(out: &Output, what: &str) {
    assert!(
        out.status.success(),
        "{} exited non-zero: {:?}\nstdout:\n{}\nstderr:\n{}",
        what,
        out.status.code(),
        stdout(out),
        stderr(out)
    );
}

#[allow(dead_code)]
pub fn scaffold(dir: &Path, name: &str) {
    let out = run_in(dir, &["new", name, "--no-venv"]);
    assert_success(&out, "proj-scaffold new");
}
