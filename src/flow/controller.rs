//! Navigation controller for the pairing flow.
//!
//! The flow is a small state machine:
//!
//! ```text
//!   Main ──StartPairing──► Connection ──ContinueToBridge──► BridgeEntry
//!    ▲                                                         │
//!    │                                              SubmitCode (== code)
//!    │                                                         ▼
//!   FitData ◄──GrantPermissions (all 5 on)──────────── Permissions
//!    │
//!    └──Exit──► Main (code cleared)
//! ```
//!
//! `Back` walks one step down the chain. Every transition is computed by the
//! pure [`transition`] function; [`NavigationController`] just owns the state.

use super::pairing::{sanitize_code_input, CodeSource, PairingCode};
use super::permissions::{PermissionKind, PermissionSet};
use super::screen::Screen;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Controller state handed read-only to renderers.
///
/// `pairing_code` is present on every screen except [`Screen::Main`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlowState {
    pub screen: Screen,
    pub pairing_code: Option<PairingCode>,
}

impl FlowState {
    /// Initial state: `Main`, no code.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pairing_code(&self) -> Option<&PairingCode> {
        self.pairing_code.as_ref()
    }
}

/// User intents the renderers forward to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    /// `Main → Connection`, drawing a new code.
    StartPairing,
    /// `Connection → BridgeEntry`, carrying the code.
    ContinueToBridge,
    /// `BridgeEntry → Permissions` when the entered text matches the code.
    SubmitCode(String),
    /// `Permissions → FitData` when every flag is on.
    GrantPermissions(PermissionSet),
    /// One step back along the chain.
    Back,
    /// `FitData → Main`, clearing the code.
    Exit,
}

/// Recoverable refusals. The state stays where it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("Invalid code. Please check and try again.")]
    CodeMismatch,
    #[error("Enable all permissions to continue ({} missing)", .missing.len())]
    IncompletePermissions { missing: Vec<PermissionKind> },
}

/// Compute the state that follows `event`.
///
/// Events without an edge out of the current screen leave the state unchanged.
pub fn transition(
    state: &FlowState,
    event: &FlowEvent,
    codes: &mut dyn CodeSource,
) -> Result<FlowState, FlowError> {
    match (state.screen, event) {
        (Screen::Main, FlowEvent::StartPairing) => Ok(enter_connection(codes)),

        (Screen::Connection, FlowEvent::ContinueToBridge) => match &state.pairing_code {
            Some(code) => Ok(FlowState {
                screen: Screen::BridgeEntry,
                pairing_code: Some(code.clone()),
            }),
            None => Ok(enter_connection(codes)),
        },

        (Screen::BridgeEntry, FlowEvent::SubmitCode(entered)) => {
            let entered = sanitize_code_input(entered);
            match &state.pairing_code {
                Some(code) if code.matches(&entered) => Ok(FlowState {
                    screen: Screen::Permissions,
                    pairing_code: Some(code.clone()),
                }),
                _ => Err(FlowError::CodeMismatch),
            }
        }

        (Screen::Permissions, FlowEvent::GrantPermissions(permissions)) => {
            if permissions.all() {
                Ok(FlowState {
                    screen: Screen::FitData,
                    pairing_code: state.pairing_code.clone(),
                })
            } else {
                Err(FlowError::IncompletePermissions {
                    missing: permissions.missing(),
                })
            }
        }

        (Screen::FitData, FlowEvent::Exit) => Ok(FlowState::new()),

        (screen, FlowEvent::Back) => Ok(match screen.back_target() {
            Screen::Main => FlowState::new(),
            Screen::Connection => enter_connection(codes),
            target => FlowState {
                screen: target,
                pairing_code: state.pairing_code.clone(),
            },
        }),

        _ => Ok(state.clone()),
    }
}

fn enter_connection(codes: &mut dyn CodeSource) -> FlowState {
    FlowState {
        screen: Screen::Connection,
        pairing_code: Some(codes.next_code()),
    }
}

/// Owns the flow state and the code source.
pub struct NavigationController {
    state: FlowState,
    codes: Box<dyn CodeSource>,
    transitions: u64,
}

impl NavigationController {
    pub fn new(codes: Box<dyn CodeSource>) -> Self {
        Self {
            state: FlowState::new(),
            codes,
            transitions: 0,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        self.state.screen
    }

    pub fn pairing_code(&self) -> Option<&PairingCode> {
        self.state.pairing_code()
    }

    /// Number of applied events that moved to a different screen.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Apply an event. On error the state is left untouched.
    pub fn apply(&mut self, event: FlowEvent) -> Result<&FlowState, FlowError> {
        let from = self.state.screen;
        match transition(&self.state, &event, self.codes.as_mut()) {
            Ok(next) => {
                if next.screen == from {
                    debug!("Ignored {:?} on {} screen", event, from);
                } else {
                    self.transitions += 1;
                    info!("Flow transition: {} -> {}", from, next.screen);
                }
                self.state = next;
                Ok(&self.state)
            }
            Err(e) => {
                warn!("Flow refused {:?} on {} screen: {}", event, from, e);
                Err(e)
            }
        }
    }

    /// Start pairing from `Main`.
    pub fn start_pairing(&mut self) -> Result<&FlowState, FlowError> {
        self.apply(FlowEvent::StartPairing)
    }

    /// Move from `Connection` to `BridgeEntry`.
    pub fn continue_to_bridge(&mut self) -> Result<&FlowState, FlowError> {
        self.apply(FlowEvent::ContinueToBridge)
    }

    /// Verify an entered code on `BridgeEntry`.
    pub fn submit_code(&mut self, entered: &str) -> Result<&FlowState, FlowError> {
        self.apply(FlowEvent::SubmitCode(entered.to_string()))
    }

    /// Grant permissions on `Permissions`.
    pub fn grant_permissions(&mut self, permissions: PermissionSet) -> Result<&FlowState, FlowError> {
        self.apply(FlowEvent::GrantPermissions(permissions))
    }

    pub fn back(&mut self) -> Result<&FlowState, FlowError> {
        self.apply(FlowEvent::Back)
    }

    /// Leave `FitData` and reset to `Main`.
    pub fn exit(&mut self) -> Result<&FlowState, FlowError> {
        self.apply(FlowEvent::Exit)
    }
}

impl std::fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("state", &self.state)
            .field("transitions", &self.transitions)
            .finish_non_exhaustive()
    }
}
