//! Config command handlers.

use crate::config::{config_path, load_config, save_config, validate_config};
use crate::error::Result;
use crate::output::{print_header, print_success, DIM, RESET};

/// Display the current configuration as TOML.
pub fn config_display_command() -> Result<()> {
    let config = load_config()?;
    let path = config_path()?;

    print_header("Configuration");
    println!("{DIM}{}{RESET}", path.display());
    println!();

    let rendered = toml::to_string_pretty(&config)
        .map_err(|e| crate::error::HullError::Config(e.to_string()))?;
    print!("{}", rendered);
    Ok(())
}

/// Set a single configuration value and write the file back.
pub fn config_set_command(key: &str, value: &str) -> Result<()> {
    let mut config = load_config()?;
    config.set_value(key, value)?;
    validate_config(&config)?;
    save_config(&config)?;
    print_success(&format!("Set {} = {}", key, value));
    Ok(())
}
