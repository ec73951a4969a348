use std::path::PathBuf;

/// Overrides the config directory (tests, portable installs)
pub const CONFIG_DIR_ENV: &str = "FAMBRIDGE_CONFIG_DIR";

/// Get the home directory, with fallback to "/"
pub fn get_home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

/// Get the config directory path
///
/// `$FAMBRIDGE_CONFIG_DIR` if set, otherwise `~/.config/fambridge` regardless of OS.
pub fn get_config_dir() -> PathBuf {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => get_home_dir().join(".config").join("fambridge"),
    }
}

/// Get the config file path
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Directory holding the log file
pub fn get_log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("fambridge")
}

/// Log file name inside [`get_log_dir`]
pub const LOG_FILE_NAME: &str = "fambridge.log";

pub fn get_log_path() -> PathBuf {
    get_log_dir().join(LOG_FILE_NAME)
}
