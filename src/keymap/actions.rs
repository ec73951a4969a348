//! Action enum for all user-triggered actions
//!
//! These represent semantic actions that can be triggered by keyboard shortcuts.

use serde::{Deserialize, Serialize};

/// All possible user actions in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // ============ Navigation ============
    /// Move selection up in a list
    MoveUp,
    /// Move selection down in a list
    MoveDown,
    /// Move left (platform selector)
    MoveLeft,
    /// Move right (platform selector)
    MoveRight,
    /// Jump to start of input
    Home,
    /// Jump to end of input
    End,

    // ============ Selection & Confirmation ============
    /// Confirm selection / submit (Enter)
    Confirm,
    /// Go back one screen (Esc)
    Back,
    /// Toggle the selected permission (Space)
    ToggleSelect,

    // ============ Global ============
    /// Quit the application
    Quit,
    /// Show help overlay
    Help,

    // ============ Screen-specific actions ============
    /// Copy the pairing code to the clipboard
    Copy,
    /// Reload health data
    Refresh,
    /// Switch between Health Connect and HealthKit
    SwitchPlatform,

    // ============ Text editing ============
    /// Delete character before cursor
    Backspace,
    /// Delete character at cursor
    DeleteChar,
}

impl Action {
    /// Get a human-readable description of this action
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "Move up",
            Action::MoveDown => "Move down",
            Action::MoveLeft => "Move left",
            Action::MoveRight => "Move right",
            Action::Home => "Home",
            Action::End => "End",
            Action::Confirm => "Confirm",
            Action::Back => "Go back",
            Action::ToggleSelect => "Toggle permission",
            Action::Quit => "Quit",
            Action::Help => "Show help",
            Action::Copy => "Copy pairing code",
            Action::Refresh => "Refresh health data",
            Action::SwitchPlatform => "Switch health platform",
            Action::Backspace => "Backspace",
            Action::DeleteChar => "Delete character",
        }
    }

    /// Get action category for grouping in help display
    pub fn category(&self) -> &'static str {
        match self {
            Action::MoveUp
            | Action::MoveDown
            | Action::MoveLeft
            | Action::MoveRight
            | Action::Home
            | Action::End => "Navigation",

            Action::Confirm | Action::Back | Action::ToggleSelect => "Selection",

            Action::Quit | Action::Help => "Global",

            Action::Copy | Action::Refresh | Action::SwitchPlatform => "Actions",

            Action::Backspace | Action::DeleteChar => "Text Editing",
        }
    }
}
