//! Login command handler.

use crate::api::ApiClient;
use crate::config::load_config;
use crate::error::{HullError, Result};
use crate::output::{print_success, BOLD, RESET};
use crate::session::SessionStore;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, Write};

/// Log in to the Hull Insight API and store the session token.
///
/// Prompts for a login name and password, exchanges them for a token,
/// and persists the session for the console and future commands.
pub fn login_command() -> Result<()> {
    let config = load_config()?;
    let mut session = SessionStore::open()?;

    if let Some(user) = session.user() {
        println!("Already logged in as {BOLD}{}{RESET}.", user.display_name());
        println!("Run `hullinsight logout` first to switch accounts.");
        return Ok(());
    }

    let loginname = prompt("Login name: ")?;
    let password = prompt_password("Password: ")?;
    validate_credentials(loginname.trim(), &password)?;

    let client = ApiClient::new(&config, None);
    let auth = client.login(loginname.trim(), &password)?;
    let name = auth
        .user
        .as_ref()
        .map(|u| u.display_name())
        .unwrap_or_else(|| loginname.trim().to_string());
    session.login(auth)?;

    print_success(&format!("Logged in as {}", name));
    Ok(())
}

/// Reject blank credentials before any network traffic.
fn validate_credentials(loginname: &str, password: &str) -> Result<()> {
    if loginname.is_empty() {
        return Err(HullError::Validation("Login name is required".to_string()));
    }
    if password.is_empty() {
        return Err(HullError::Validation("Password is required".to_string()));
    }
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Read a line without echoing it. Raw mode is restored before returning,
/// including on error.
fn prompt_password(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    enable_raw_mode()?;
    let result = read_password_raw();
    disable_raw_mode()?;
    println!();
    result
}

fn read_password_raw() -> Result<String> {
    let mut password = String::new();
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Enter => return Ok(password),
                KeyCode::Backspace => {
                    password.pop();
                }
                KeyCode::Char(c) => password.push(c),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_credentials_are_rejected() {
        assert!(matches!(
            validate_credentials("", "hunter22"),
            Err(HullError::Validation(_))
        ));
        assert!(matches!(
            validate_credentials("jdoe", ""),
            Err(HullError::Validation(_))
        ));
        assert!(validate_credentials("jdoe", "hunter22").is_ok());
    }
}
