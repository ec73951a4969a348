//! Preset keymaps: Standard, Vim, Emacs
//!
//! Each preset provides a complete set of key bindings for all actions.

use super::{Action, KeyBinding};
use serde::{Deserialize, Serialize};

/// Available keymap presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeymapPreset {
    /// Standard keyboard navigation (arrows, Enter, Esc)
    #[default]
    Standard,
    /// Vim-style navigation (hjkl, etc.)
    Vim,
    /// Emacs-style navigation (Ctrl+N/P, etc.)
    Emacs,
}

impl KeymapPreset {
    /// Get all key bindings for this preset
    pub fn bindings(&self) -> Vec<KeyBinding> {
        match self {
            KeymapPreset::Standard => standard_bindings(),
            KeymapPreset::Vim => vim_bindings(),
            KeymapPreset::Emacs => emacs_bindings(),
        }
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            KeymapPreset::Standard => "Standard",
            KeymapPreset::Vim => "Vim",
            KeymapPreset::Emacs => "Emacs",
        }
    }
}

/// Standard keyboard bindings (arrows, Enter, Esc)
fn standard_bindings() -> Vec<KeyBinding> {
    vec![
        // Navigation
        KeyBinding::new("up", Action::MoveUp),
        KeyBinding::new("down", Action::MoveDown),
        KeyBinding::new("left", Action::MoveLeft),
        KeyBinding::new("right", Action::MoveRight),
        KeyBinding::new("home", Action::Home),
        KeyBinding::new("end", Action::End),
        // Selection
        KeyBinding::new("enter", Action::Confirm),
        KeyBinding::new("esc", Action::Back),
        KeyBinding::new("space", Action::ToggleSelect),
        // Global
        KeyBinding::new("q", Action::Quit),
        KeyBinding::new("ctrl+c", Action::Quit),
        KeyBinding::new("?", Action::Help),
        // Actions
        KeyBinding::new("c", Action::Copy),
        KeyBinding::new("r", Action::Refresh),
        KeyBinding::new("tab", Action::SwitchPlatform),
        // Text editing
        KeyBinding::new("backspace", Action::Backspace),
        KeyBinding::new("delete", Action::DeleteChar),
    ]
}

/// Vim-style keyboard bindings (hjkl navigation)
fn vim_bindings() -> Vec<KeyBinding> {
    vec![
        // Navigation - vim style + arrows
        KeyBinding::new("k", Action::MoveUp),
        KeyBinding::new("up", Action::MoveUp),
        KeyBinding::new("j", Action::MoveDown),
        KeyBinding::new("down", Action::MoveDown),
        KeyBinding::new("h", Action::MoveLeft),
        KeyBinding::new("left", Action::MoveLeft),
        KeyBinding::new("l", Action::MoveRight),
        KeyBinding::new("right", Action::MoveRight),
        KeyBinding::new("home", Action::Home),
        KeyBinding::new("end", Action::End),
        // Selection
        KeyBinding::new("enter", Action::Confirm),
        KeyBinding::new("esc", Action::Back),
        KeyBinding::new("space", Action::ToggleSelect),
        // Global - vim uses q to quit
        KeyBinding::new("q", Action::Quit),
        KeyBinding::new("ctrl+c", Action::Quit),
        KeyBinding::new("?", Action::Help),
        // Actions
        KeyBinding::new("y", Action::Copy), // yank
        KeyBinding::new("r", Action::Refresh),
        KeyBinding::new("tab", Action::SwitchPlatform),
        // Text editing
        KeyBinding::new("backspace", Action::Backspace),
        KeyBinding::new("x", Action::DeleteChar), // vim style delete char
        KeyBinding::new("delete", Action::DeleteChar),
    ]
}

/// Emacs-style keyboard bindings (Ctrl+N/P navigation)
fn emacs_bindings() -> Vec<KeyBinding> {
    vec![
        // Navigation - emacs style + arrows
        KeyBinding::new("ctrl+p", Action::MoveUp),
        KeyBinding::new("up", Action::MoveUp),
        KeyBinding::new("ctrl+n", Action::MoveDown),
        KeyBinding::new("down", Action::MoveDown),
        KeyBinding::new("ctrl+b", Action::MoveLeft),
        KeyBinding::new("left", Action::MoveLeft),
        KeyBinding::new("ctrl+f", Action::MoveRight),
        KeyBinding::new("right", Action::MoveRight),
        KeyBinding::new("ctrl+a", Action::Home),
        KeyBinding::new("home", Action::Home),
        KeyBinding::new("ctrl+e", Action::End),
        KeyBinding::new("end", Action::End),
        // Selection
        KeyBinding::new("enter", Action::Confirm),
        KeyBinding::new("ctrl+g", Action::Back), // C-g is cancel in emacs
        KeyBinding::new("esc", Action::Back),
        KeyBinding::new("space", Action::ToggleSelect),
        // Global
        KeyBinding::new("q", Action::Quit),
        KeyBinding::new("ctrl+c", Action::Quit),
        KeyBinding::new("ctrl+h", Action::Help),
        KeyBinding::new("?", Action::Help),
        // Actions
        KeyBinding::new("alt+w", Action::Copy), // kill-ring-save
        KeyBinding::new("ctrl+r", Action::Refresh),
        KeyBinding::new("tab", Action::SwitchPlatform),
        // Text editing
        KeyBinding::new("backspace", Action::Backspace),
        KeyBinding::new("ctrl+d", Action::DeleteChar), // Forward delete (Emacs standard)
        KeyBinding::new("delete", Action::DeleteChar),
    ]
}
