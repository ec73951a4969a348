//! Keymap configuration module
//!
//! Provides customizable keyboard shortcuts with preset keymaps (standard, vim, emacs).

mod actions;
mod binding;
mod presets;

pub use actions::Action;
pub use binding::{parse_key_string, KeyBinding};
pub use presets::KeymapPreset;

use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Keymap configuration with preset and optional overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Keymap {
    /// Base preset keymap
    #[serde(default)]
    pub preset: KeymapPreset,

    /// User-defined overrides (checked before preset)
    #[serde(default)]
    pub overrides: Vec<KeyBinding>,
}

impl Keymap {
    /// Get the action for a key event, checking overrides first then preset
    /// Note: If an action is overridden, preset bindings for that action are ignored
    pub fn get_action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        let bindings = self.all_bindings();
        let lookup = |modifiers| {
            bindings
                .iter()
                .find(|binding| binding.matches(code, modifiers))
                .map(|binding| binding.action)
        };
        // Terminals report '?' and other shifted symbols with SHIFT set, so a
        // char with no exact binding is retried without it
        lookup(modifiers).or_else(|| match code {
            KeyCode::Char(_) if modifiers.contains(KeyModifiers::SHIFT) => {
                lookup(modifiers - KeyModifiers::SHIFT)
            }
            _ => None,
        })
    }

    /// Get all bindings (overrides + preset) for display in help
    /// Valid overrides shadow preset bindings for the same action; an override
    /// whose key cannot be parsed is skipped and the preset keeps the action.
    pub fn all_bindings(&self) -> Vec<KeyBinding> {
        let overrides: Vec<KeyBinding> = self
            .overrides
            .iter()
            .filter(|o| o.parse().is_ok())
            .cloned()
            .collect();
        let mut bindings = overrides.clone();
        bindings.extend(
            self.preset
                .bindings()
                .into_iter()
                .filter(|preset| !overrides.iter().any(|o| o.action == preset.action)),
        );
        bindings
    }

    /// Override bindings whose key string cannot be parsed
    pub fn invalid_overrides(&self) -> Vec<&KeyBinding> {
        self.overrides.iter().filter(|b| b.parse().is_err()).collect()
    }

    /// Get the display string for a specific action (e.g., Action::Quit -> "Q")
    /// Checks overrides first, then preset. Returns generic fallback if not found.
    pub fn get_key_display_for_action(&self, action: Action) -> String {
        self.all_bindings()
            .iter()
            .find(|b| b.action == action)
            .map(KeyBinding::display)
            .unwrap_or_else(|| format!("{:?}", action))
    }

    /// Footer hint for the given actions, e.g. "Continue: Enter | Back: Esc"
    pub fn footer_for(&self, actions: &[(Action, &str)]) -> String {
        actions
            .iter()
            .map(|(action, label)| format!("{}: {}", label, self.get_key_display_for_action(*action)))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
