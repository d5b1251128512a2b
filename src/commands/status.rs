//! Status command handler.

use crate::config::{config_path, load_config};
use crate::error::Result;
use crate::output::{print_header, BOLD, DIM, GREEN, RESET, YELLOW};
use crate::session::SessionStore;

/// Show the configured API endpoint and the current session state.
pub fn status_command() -> Result<()> {
    let config = load_config()?;
    let session = SessionStore::open()?;

    print_header("Hull Insight");
    println!("  API:    {}", config.effective_base_url());
    if let Ok(path) = config_path() {
        println!("  Config: {DIM}{}{RESET}", path.display());
    }

    match session.user() {
        Some(user) => {
            println!(
                "  Login:  {GREEN}●{RESET} {BOLD}{}{RESET}",
                user.display_name()
            );
            if let Some(role) = &user.role {
                println!("  Role:   {}", role);
            }
        }
        None if session.is_authenticated() => {
            println!("  Login:  {GREEN}●{RESET} logged in");
        }
        None => {
            println!("  Login:  {YELLOW}○{RESET} not logged in");
        }
    }

    Ok(())
}
