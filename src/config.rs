use crate::flow::Platform;
use crate::icons::IconSet;
use crate::keymap::Keymap;
use crate::styles::ThemeType;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// UI theme: "dark", "light" or "nocolor"
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Icon set: "auto", "nerd", "unicode" or "ascii"
    #[serde(default = "default_icon_set")]
    pub icon_set: String,
    /// Platform preselected on the permissions screen
    #[serde(default)]
    pub default_platform: Platform,
    /// Profile shown on the main screen
    #[serde(default)]
    pub profile: ProfileConfig,
    /// Artificial delays for the simulated operations
    #[serde(default)]
    pub delays: DelayConfig,
    /// Keyboard shortcuts
    #[serde(default)]
    pub keymap: Keymap,
}

/// Profile card on the main screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Display name
    pub name: String,
    /// Membership line under the name
    #[serde(default = "default_membership")]
    pub membership: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            membership: default_membership(),
        }
    }
}

/// Durations (milliseconds) of the simulated asynchronous operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayConfig {
    pub verify_code_ms: u64,
    pub grant_permissions_ms: u64,
    pub load_health_data_ms: u64,
    pub refresh_health_data_ms: u64,
    pub copy_feedback_ms: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            verify_code_ms: 1500,
            grant_permissions_ms: 2000,
            load_health_data_ms: 1500,
            refresh_health_data_ms: 1000,
            copy_feedback_ms: 2000,
        }
    }
}

impl DelayConfig {
    /// All delays zero.
    pub fn instant() -> Self {
        Self {
            verify_code_ms: 0,
            grant_permissions_ms: 0,
            load_health_data_ms: 0,
            refresh_health_data_ms: 0,
            copy_feedback_ms: 0,
        }
    }
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_icon_set() -> String {
    "auto".to_string()
}

fn default_membership() -> String {
    "Premium Member".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            icon_set: default_icon_set(),
            default_platform: Platform::default(),
            profile: ProfileConfig::default(),
            delays: DelayConfig::default(),
            keymap: Keymap::default(),
        }
    }
}

impl Config {
    /// Load configuration from file or create default
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let mut config: Config =
                toml::from_str(&content).with_context(|| "Failed to parse config file")?;

            // Empty strings from hand-edited files fall back to defaults
            if config.theme.trim().is_empty() {
                config.theme = default_theme();
            }
            if config.icon_set.trim().is_empty() {
                config.icon_set = default_icon_set();
            }

            Ok(config)
        } else {
            let config = Self::default();
            config.save(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to file with secure permissions
    pub fn save(&self, config_path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        // Set secure permissions (600: owner read/write only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(config_path)
                .with_context(|| format!("Failed to get file metadata: {:?}", config_path))?
                .permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(config_path, perms)
                .with_context(|| format!("Failed to set file permissions: {:?}", config_path))?;
        }

        Ok(())
    }

    /// Parsed theme type
    pub fn theme_type(&self) -> ThemeType {
        self.theme.parse().unwrap_or_default()
    }

    /// Parsed icon set, `None` meaning auto-detect
    pub fn get_icon_set(&self) -> Option<IconSet> {
        IconSet::from_name(&self.icon_set)
    }
}
