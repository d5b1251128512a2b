//! Shell completion infrastructure.
//!
//! Provides shell detection from `$SHELL`, completion script generation for
//! bash, zsh, and fish, and installation path resolution per shell.

use crate::error::{HullError, Result};
use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;
use std::path::PathBuf;

/// Supported shell types for completion scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
}

/// Shells the `completion` subcommand accepts.
pub const SUPPORTED_SHELLS: [ShellType; 3] = [ShellType::Bash, ShellType::Zsh, ShellType::Fish];

impl ShellType {
    /// Convert to the `clap_complete::Shell` type.
    pub fn to_clap_shell(self) -> Shell {
        match self {
            ShellType::Bash => Shell::Bash,
            ShellType::Zsh => Shell::Zsh,
            ShellType::Fish => Shell::Fish,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShellType::Bash => "bash",
            ShellType::Zsh => "zsh",
            ShellType::Fish => "fish",
        }
    }
}

impl std::fmt::Display for ShellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect the user's shell from the `$SHELL` environment variable.
pub fn detect_shell() -> Result<ShellType> {
    let shell_path = std::env::var("SHELL").map_err(|_| {
        HullError::ShellCompletion(
            "$SHELL environment variable is not set. \
             Please specify your shell manually or set the $SHELL variable."
                .to_string(),
        )
    })?;

    parse_shell_from_path(&shell_path)
}

/// Parse a shell type from a shell path such as `/bin/zsh`.
pub fn parse_shell_from_path(shell_path: &str) -> Result<ShellType> {
    let shell_name = std::path::Path::new(shell_path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(shell_path);

    match shell_name {
        "bash" => Ok(ShellType::Bash),
        "zsh" => Ok(ShellType::Zsh),
        "fish" => Ok(ShellType::Fish),
        _ => Err(HullError::ShellCompletion(format!(
            "Unsupported shell: '{}'. Supported shells are: {}.",
            shell_name,
            SUPPORTED_SHELLS.map(|s| s.name()).join(", ")
        ))),
    }
}

/// Get the installation path for completion scripts.
///
/// - **Bash**: `~/.local/share/bash-completion/completions/hullinsight`,
///   falling back to `~/.bash_completion.d/hullinsight`
/// - **Zsh**: `~/.zfunc/_hullinsight`
/// - **Fish**: `~/.config/fish/completions/hullinsight.fish`
pub fn get_completion_path(shell: ShellType) -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| {
        HullError::ShellCompletion("Could not determine home directory".to_string())
    })?;

    let path = match shell {
        ShellType::Bash => {
            let xdg_path = home.join(".local/share/bash-completion/completions");
            if xdg_path.exists() {
                xdg_path.join("hullinsight")
            } else {
                home.join(".bash_completion.d/hullinsight")
            }
        }
        ShellType::Zsh => home.join(".zfunc/_hullinsight"),
        ShellType::Fish => home.join(".config/fish/completions/hullinsight.fish"),
    };

    Ok(path)
}

/// Ensure the parent directory for a completion script exists.
pub fn ensure_completion_dir(path: &PathBuf) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                HullError::ShellCompletion(format!(
                    "Failed to create completion directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

/// Build the clap Command structure for completion generation.
///
/// Mirrors the CLI defined in `main.rs` so clap_complete can generate
/// accurate scripts.
fn build_cli() -> Command {
    Command::new("hullinsight")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Terminal console for the Hull Insight fleet maintenance platform")
        .subcommand(Command::new("console").about("Open the interactive console (default)"))
        .subcommand(Command::new("login").about("Log in and store a session token"))
        .subcommand(Command::new("logout").about("Log out and clear the stored session"))
        .subcommand(Command::new("status").about("Show the API endpoint and session state"))
        .subcommand(
            Command::new("config")
                .about("Show or modify configuration")
                .subcommand(Command::new("show").about("Display the current configuration"))
                .subcommand(
                    Command::new("set")
                        .about("Set a configuration value")
                        .arg(clap::Arg::new("key").help("Config key (e.g. base_url, page_size)"))
                        .arg(clap::Arg::new("value").help("New value")),
                ),
        )
        .subcommand(
            Command::new("completion")
                .about("Generate or install shell completion scripts")
                .arg(
                    clap::Arg::new("shell")
                        .long("shell")
                        .help("Target shell (bash, zsh, fish); defaults to $SHELL"),
                )
                .arg(
                    clap::Arg::new("install")
                        .long("install")
                        .help("Install the script to the shell's completion directory")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}

/// Generate a completion script for the specified shell.
pub fn generate_completion_script(shell: ShellType) -> String {
    let mut cmd = build_cli();
    let mut buf = Vec::new();
    generate(shell.to_clap_shell(), &mut cmd, "hullinsight", &mut buf);
    String::from_utf8(buf).unwrap_or_default()
}

/// Write a completion script to the specified path, creating parent
/// directories as needed.
pub fn write_completion_script(shell: ShellType, path: &PathBuf) -> Result<()> {
    ensure_completion_dir(path)?;

    let script = generate_completion_script(shell);
    let mut file = std::fs::File::create(path).map_err(|e| {
        HullError::ShellCompletion(format!(
            "Failed to create completion file '{}': {}",
            path.display(),
            e
        ))
    })?;
    file.write_all(script.as_bytes()).map_err(|e| {
        HullError::ShellCompletion(format!(
            "Failed to write completion file '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(())
}

/// Print a completion script to stdout.
pub fn print_completion_script(shell: ShellType) {
    print!("{}", generate_completion_script(shell));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shell_from_path() {
        assert_eq!(parse_shell_from_path("/bin/bash").unwrap(), ShellType::Bash);
        assert_eq!(parse_shell_from_path("/usr/bin/zsh").unwrap(), ShellType::Zsh);
        assert_eq!(
            parse_shell_from_path("/usr/local/bin/fish").unwrap(),
            ShellType::Fish
        );
    }

    #[test]
    fn test_parse_shell_rejects_unknown() {
        let err = parse_shell_from_path("/bin/tcsh").unwrap_err();
        let message = err.to_string();
        for shell in SUPPORTED_SHELLS {
            assert!(message.contains(shell.name()));
        }
        assert!(parse_shell_from_path("").is_err());
    }

    #[test]
    fn test_generated_script_mentions_subcommands() {
        let script = generate_completion_script(ShellType::Bash);
        assert!(script.contains("hullinsight"));
        assert!(script.contains("console"));
        assert!(script.contains("completion"));
    }

    #[test]
    fn test_completion_paths_per_shell() {
        if dirs::home_dir().is_none() {
            return;
        }
        let zsh = get_completion_path(ShellType::Zsh).unwrap();
        assert!(zsh.ends_with(".zfunc/_hullinsight"));
        let fish = get_completion_path(ShellType::Fish).unwrap();
        assert!(fish.to_string_lossy().ends_with("hullinsight.fish"));
    }
}
