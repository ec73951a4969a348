// Shared chrome drawn around every screen

pub mod footer;
pub mod header;
pub mod help_overlay;

pub use footer::{Footer, FOOTER_HEIGHT};
pub use header::{Header, HEADER_HEIGHT};
pub use help_overlay::HelpOverlay;
