mod types;

pub use types::*;

use anyhow::{Context, Result};
use reelscan_parser::Parser;
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./reelscan.toml",
        "~/.config/reelscan/config.toml",
        "/etc/reelscan/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Compile the scanner section into a parser.
pub fn build_parser(config: &Config) -> Result<Parser> {
    Parser::new(config.scanner.clone()).context("Invalid scanner configuration")
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.library.extensions.iter().all(|ext| ext.trim().is_empty()) {
        anyhow::bail!("Library extension list is empty");
    }

    for path in &config.library.paths {
        if !path.exists() {
            tracing::warn!("Library path does not exist: {:?}", path);
        }
    }

    build_parser(config)?;

    Ok(())
}
