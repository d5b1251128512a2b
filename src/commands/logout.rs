//! Logout command handler.

use crate::api::ApiClient;
use crate::config::load_config;
use crate::error::Result;
use crate::output::{print_info, print_success};
use crate::session::SessionStore;

/// Log out and clear the stored session.
///
/// Tells the server to drop the token when possible; the local session
/// is cleared either way.
pub fn logout_command() -> Result<()> {
    let mut session = SessionStore::open()?;

    if !session.is_authenticated() {
        print_info("Not logged in.");
        return Ok(());
    }

    let config = load_config()?;
    let client = ApiClient::new(&config, session.auth());
    let user_id = session.user().and_then(|u| u.id);
    // Best effort: a dead token on the server is harmless.
    let _ = client.logout(user_id);

    session.logout()?;
    print_success("Logged out.");
    Ok(())
}
