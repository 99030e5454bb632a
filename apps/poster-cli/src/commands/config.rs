//! # Config Command
//!
//! Prints the effective configuration (file + environment) as TOML, ready
//! to be saved as `poster.toml`.

use tracing::debug;

use crate::error::CliResult;
use crate::state::ConfigState;

/// Runs `poster-tiler config`.
pub fn run(config: &ConfigState) -> CliResult<()> {
    debug!("config command");
    print!("{}", render_config(config)?);
    Ok(())
}

/// The configuration as TOML, headed by the default file location.
pub fn render_config(config: &ConfigState) -> CliResult<String> {
    let location = ConfigState::default_config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(no config directory)".to_string());

    Ok(format!("# Default location: {}\n{}", location, config.to_toml()?))
}
