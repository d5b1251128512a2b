//! CLI command handlers.
//!
//! Each subcommand has its own module with a handler function. The
//! interactive console lives in [`crate::tui`]; these handlers cover the
//! one-shot commands around it.
//!
//! # Commands
//!
//! - [`console`] - Open the interactive console
//! - [`login`] - Log in and store a session token
//! - [`logout`] - Log out and clear the stored session
//! - [`status`] - Show the API endpoint and session state
//! - [`config`] - Show or modify configuration
//! - [`completion`] - Generate or install shell completion scripts

mod completion;
mod config;
mod console;
mod login;
mod logout;
mod status;

pub use completion::completion_command;
pub use config::{config_display_command, config_set_command};
pub use console::console_command;
pub use login::login_command;
pub use logout::logout_command;
pub use status::status_command;
