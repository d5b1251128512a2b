//! hullinsight CLI entry point.
//!
//! Parses command-line arguments and dispatches to the appropriate command
//! handler. With no subcommand the interactive console opens.

use clap::{Parser, Subcommand};
use hullinsight::commands::{
    completion_command, config_display_command, config_set_command, console_command,
    login_command, logout_command, status_command,
};
use hullinsight::output::print_error;

#[derive(Parser)]
#[command(name = "hullinsight")]
#[command(
    version,
    about = "Terminal console for the Hull Insight fleet maintenance platform",
    after_help = "EXAMPLES:
    # Open the interactive console (also the default with no subcommand)
    hullinsight
    hullinsight console

    # Log in once, then reuse the stored session
    hullinsight login
    hullinsight status

    # Point the client at a different API
    hullinsight config set base_url https://hull.example.org/

    # Install shell completions
    hullinsight completion --install"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive console (default)
    Console,

    /// Log in and store a session token
    Login,

    /// Log out and clear the stored session
    Logout,

    /// Show the API endpoint and session state
    Status,

    /// Show or modify configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Generate or install shell completion scripts
    Completion {
        /// Target shell (bash, zsh, fish); defaults to $SHELL
        #[arg(long)]
        shell: Option<String>,

        /// Install the script to the shell's completion directory
        #[arg(long)]
        install: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Display the current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Config key (e.g. base_url, page_size, timeout_secs)
        key: String,

        /// New value
        value: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        None | Some(Commands::Console) => console_command(),
        Some(Commands::Login) => login_command(),
        Some(Commands::Logout) => logout_command(),
        Some(Commands::Status) => status_command(),
        Some(Commands::Config { action }) => match action {
            None | Some(ConfigAction::Show) => config_display_command(),
            Some(ConfigAction::Set { key, value }) => config_set_command(&key, &value),
        },
        Some(Commands::Completion { shell, install }) => {
            completion_command(shell.as_deref(), install)
        }
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
