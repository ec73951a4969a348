//! Screen identifiers for the pairing flow.

use std::fmt;

/// One of the five mutually exclusive screens of the pairing flow.
///
/// Exactly one screen is active at any time. The flow starts at [`Screen::Main`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    /// Companion app home: profile card and the "Connect with Bridge App" entry.
    #[default]
    Main,
    /// Shows the freshly generated pairing code.
    Connection,
    /// Bridge app: enter the pairing code.
    BridgeEntry,
    /// Bridge app: grant the five health permissions.
    Permissions,
    /// Bridge app: synced health data.
    FitData,
}

impl Screen {
    /// All screens in forward flow order.
    pub const ALL: [Screen; 5] = [
        Screen::Main,
        Screen::Connection,
        Screen::BridgeEntry,
        Screen::Permissions,
        Screen::FitData,
    ];

    /// The screen one step back along the forward chain.
    ///
    /// `Main` has no predecessor and maps to itself.
    pub fn back_target(&self) -> Screen {
        match self {
            Screen::Main => Screen::Main,
            Screen::Connection => Screen::Main,
            Screen::BridgeEntry => Screen::Connection,
            Screen::Permissions => Screen::BridgeEntry,
            Screen::FitData => Screen::Permissions,
        }
    }

    /// The screen reached by the forward edge out of this one.
    pub fn forward_target(&self) -> Screen {
        match self {
            Screen::Main => Screen::Connection,
            Screen::Connection => Screen::BridgeEntry,
            Screen::BridgeEntry => Screen::Permissions,
            Screen::Permissions => Screen::FitData,
            Screen::FitData => Screen::Main,
        }
    }

    /// Header title shown for this screen.
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Main => "Fam App",
            Screen::Connection => "Connect Bridge App",
            Screen::BridgeEntry => "Bridge Health",
            Screen::Permissions => "Health Permissions",
            Screen::FitData => "Your Health Data",
        }
    }

    /// Whether the screen belongs to the bridge app rather than the companion app.
    pub fn is_bridge_app(&self) -> bool {
        matches!(
            self,
            Screen::BridgeEntry | Screen::Permissions | Screen::FitData
        )
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Main => "main",
            Screen::Connection => "connection",
            Screen::BridgeEntry => "bridge-entry",
            Screen::Permissions => "permissions",
            Screen::FitData => "fit-data",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_main() {
        assert_eq!(Screen::default(), Screen::Main);
    }

    #[test]
    fn test_back_chain_mirrors_forward_edges() {
        for screen in Screen::ALL.iter().skip(1) {
            assert_eq!(screen.back_target().forward_target(), *screen);
        }
    }

    #[test]
    fn test_main_back_stays_on_main() {
        assert_eq!(Screen::Main.back_target(), Screen::Main);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Screen::BridgeEntry.to_string(), "bridge-entry");
        assert_eq!(Screen::FitData.to_string(), "fit-data");
    }

    #[test]
    fn test_bridge_app_screens() {
        assert!(!Screen::Main.is_bridge_app());
        assert!(!Screen::Connection.is_bridge_app());
        assert!(Screen::Permissions.is_bridge_app());
    }
}
