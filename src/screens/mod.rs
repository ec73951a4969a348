//! Screen controllers for the application.
//!
//! Each screen controller owns its local state and handles both rendering and
//! events. Navigation between screens belongs to the flow controller; screens
//! only ask for it through [`ScreenAction::Flow`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                           App                            │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │ Screen Router                                      │  │
//! │  │  match controller.screen() {                       │  │
//! │  │    Main => main_menu.handle_event(...)             │  │
//! │  │    Connection => connection.handle_event(...)      │  │
//! │  │    ...                                             │  │
//! │  │  }                                                 │  │
//! │  └────────────────────────────────────────────────────┘  │
//! │                         │ ScreenAction                   │
//! │                         ▼                                │
//! │  NavigationController (flow)     Scheduler (tasks)       │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod bridge_entry;
pub mod connection;
pub mod fit_data;
pub mod main_menu;
pub mod permissions;
pub mod screen_trait;

pub use bridge_entry::BridgeEntryScreen;
pub use connection::ConnectionScreen;
pub use fit_data::FitDataScreen;
pub use main_menu::{MainMenuScreen, MenuEntry};
pub use permissions::PermissionsScreen;
pub use screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
