//! Pairing flow core.
//!
//! Everything in this module is free of terminal and timer concerns: screens
//! read a [`FlowState`] and hand [`FlowEvent`]s back to the
//! [`NavigationController`].

pub mod controller;
pub mod pairing;
pub mod permissions;
pub mod screen;

pub use controller::{transition, FlowError, FlowEvent, FlowState, NavigationController};
pub use pairing::{
    sanitize_code_input, CodeSource, FixedCodeSource, InvalidPairingCode, PairingCode,
    RandomCodeSource, PAIRING_CODE_LEN,
};
pub use permissions::{PermissionKind, PermissionSet, Platform};
pub use screen::Screen;
