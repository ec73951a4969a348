//! fambridge - a terminal walkthrough of pairing a fitness app with a
//! health-data bridge app.
//!
//! The pairing flow itself lives in [`flow`] and has no terminal or timer
//! dependencies; [`app`] and [`screens`] put a ratatui front end on it.

// Core modules
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod flow;
pub mod health;
pub mod icons;
pub mod keymap;
pub mod screens;
pub mod styles;
pub mod tasks;
pub mod tui;
pub mod utils;
pub mod widgets;

// Re-exports for convenience
pub use app::App;
pub use config::Config;
pub use flow::{FlowError, FlowEvent, FlowState, NavigationController, PairingCode};
pub use tasks::{InstantScheduler, Scheduler, TaskKind, TokioScheduler};

// Keymap re-exports (used by Config and for external API)
pub use keymap::{Action, KeyBinding, Keymap, KeymapPreset};
