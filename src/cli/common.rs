//! Common CLI utilities shared across CLI commands.
//!
//! - `CliContext`: loaded config and where it lives
//! - Output helpers: `print_success`, `print_error`, `print_warning`, `print_info`

use crate::config::Config;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Shared context for CLI commands.
pub struct CliContext {
    /// The loaded configuration
    pub config: Config,
    /// Path to the config file
    pub config_path: PathBuf,
}

impl CliContext {
    /// Load the configuration, creating the default file when missing.
    pub fn load() -> Result<Self> {
        let config_path = crate::utils::get_config_path();
        let config =
            Config::load_or_create(&config_path).context("Failed to load configuration")?;
        Ok(Self {
            config,
            config_path,
        })
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Print a success message with a checkmark prefix.
pub fn print_success(msg: &str) {
    println!("\u{2713} {}", msg);
}

/// Print an error message with an X prefix to stderr.
pub fn print_error(msg: &str) {
    eprintln!("\u{2717} {}", msg);
}

/// Print a warning message with a warning sign prefix.
pub fn print_warning(msg: &str) {
    println!("\u{26A0}\u{FE0F} {}", msg);
}

/// Print an info message with an info sign prefix.
pub fn print_info(msg: &str) {
    println!("\u{2139}\u{FE0F} {}", msg);
}
