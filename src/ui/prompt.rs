//! Line-based prompts. Readers and writers are injected so tests can script answers.
use std::io::{self, BufRead, Write};

/// True when both stdin and stderr are attached to a terminal.
pub fn stdin_is_interactive() -> bool {
    atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stderr)
}

/// Print `prompt` and read one line; returns the line without its trailing newline.
/// EOF yields an empty string.
pub fn ask_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> io::Result<String> {
    write!(output, "{prompt}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(&['\n', '\r'][..]).to_string())
}

/// Yes/no prompt where only `y` (any case, surrounding spaces ignored) means yes.
pub fn ask_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> io::Result<bool> {
    let ans = ask_line(input, output, prompt)?;
    Ok(ans.trim().eq_ignore_ascii_case("y"))
}

/// Confirmation for destructive steps: `y` or `yes` proceeds, anything else aborts.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> io::Result<bool> {
    let ans = ask_line(input, output, prompt)?.trim().to_ascii_lowercase();
    Ok(ans == "y" || ans == "yes")
}
