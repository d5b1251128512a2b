//! Console command handler.

use crate::config::load_config;
use crate::error::Result;
use crate::tui;

/// Open the interactive console.
///
/// Loads the configuration (creating a default config file on first run)
/// and hands control to the terminal UI until the user quits.
pub fn console_command() -> Result<()> {
    let config = load_config()?;
    tui::run_console(config)
}
