//! Completion command handler.

use crate::completion::{
    detect_shell, get_completion_path, parse_shell_from_path, print_completion_script,
    write_completion_script,
};
use crate::error::Result;
use crate::output::{print_info, print_success};

/// Generate or install a shell completion script.
///
/// Without `--install` the script is printed to stdout so it can be piped
/// wherever the user wants. With `--install` it is written to the shell's
/// standard completion directory.
pub fn completion_command(shell: Option<&str>, install: bool) -> Result<()> {
    let shell = match shell {
        Some(name) => parse_shell_from_path(name)?,
        None => detect_shell()?,
    };

    if install {
        let path = get_completion_path(shell)?;
        write_completion_script(shell, &path)?;
        print_success(&format!("Installed {} completions to {}", shell, path.display()));
        print_info("Restart your shell (or re-source your rc file) to pick them up.");
    } else {
        print_completion_script(shell);
    }

    Ok(())
}
