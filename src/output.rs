//! Plain-terminal output helpers for the CLI commands.
//!
//! The interactive console draws with Ratatui; everything the one-shot
//! commands (`login`, `status`, `config`, ...) print goes through here.

// ANSI color codes
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const RED: &str = "\x1b[31m";
pub const GRAY: &str = "\x1b[90m";

/// Print a bold cyan section header.
pub fn print_header(text: &str) {
    println!("{BOLD}{CYAN}{text}{RESET}");
}

/// Print a success line with a leading check mark.
pub fn print_success(text: &str) {
    println!("{GREEN}✓{RESET} {text}");
}

/// Print an error line to stderr.
pub fn print_error(text: &str) {
    eprintln!("{RED}✗ {text}{RESET}");
}

/// Print a dimmed informational line.
pub fn print_info(text: &str) {
    println!("{GRAY}{text}{RESET}");
}
