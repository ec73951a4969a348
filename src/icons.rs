//! Icon provider system for the application.
//!
//! Supports multiple icon sets: NerdFonts, Unicode emojis, and ASCII fallback.
//! Auto-detects terminal capabilities and allows user override via the
//! `FAMBRIDGE_ICONS` environment variable.

use std::env;

const ICONS_ENV: &str = "FAMBRIDGE_ICONS";

/// Available icon sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSet {
    /// NerdFonts icons (requires NerdFont-patched font)
    NerdFonts,
    /// Unicode emoji icons (works in most modern terminals)
    Unicode,
    /// ASCII-only fallback (maximum compatibility)
    Ascii,
}

impl IconSet {
    /// Parse a configured icon set name. `None` means auto-detect.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "nerd" | "nerdfont" | "nerdfonts" => Some(IconSet::NerdFonts),
            "unicode" | "emoji" => Some(IconSet::Unicode),
            "ascii" | "plain" => Some(IconSet::Ascii),
            _ => None,
        }
    }

    /// Detect the best icon set for the current terminal
    pub fn detect() -> Self {
        if let Ok(icons) = env::var(ICONS_ENV) {
            return Self::from_name(&icons).unwrap_or(IconSet::Unicode);
        }

        if Self::likely_supports_nerd_fonts() {
            IconSet::NerdFonts
        } else {
            IconSet::Unicode
        }
    }

    /// Heuristic to detect if terminal likely supports NerdFonts
    fn likely_supports_nerd_fonts() -> bool {
        env::var("TERM_PROGRAM")
            .map(|term| {
                matches!(
                    term.as_str(),
                    "iTerm.app" | "WezTerm" | "Alacritty" | "kitty" | "Ghostty"
                )
            })
            .unwrap_or(false)
    }

    pub fn name(&self) -> &'static str {
        match self {
            IconSet::NerdFonts => "NerdFonts",
            IconSet::Unicode => "Unicode",
            IconSet::Ascii => "ASCII",
        }
    }
}

/// Icon provider that returns appropriate icons based on the selected icon set
#[derive(Debug, Clone, Copy)]
pub struct Icons {
    icon_set: IconSet,
}

impl Icons {
    /// Create a new icon provider with auto-detection
    pub fn new() -> Self {
        Self {
            icon_set: IconSet::detect(),
        }
    }

    pub fn with_icon_set(icon_set: IconSet) -> Self {
        Self { icon_set }
    }

    /// Create an icon provider from config
    /// Priority: FAMBRIDGE_ICONS env var > config value > auto-detect
    pub fn from_config(config: &crate::config::Config) -> Self {
        if env::var(ICONS_ENV).is_ok() {
            return Self::new();
        }
        match config.get_icon_set() {
            Some(set) => Self::with_icon_set(set),
            None => Self::new(),
        }
    }

    pub fn icon_set(&self) -> IconSet {
        self.icon_set
    }

    fn pick(&self, nerd: &'static str, unicode: &'static str, ascii: &'static str) -> &'static str {
        match self.icon_set {
            IconSet::NerdFonts => nerd,
            IconSet::Unicode => unicode,
            IconSet::Ascii => ascii,
        }
    }

    // === Fam app ===

    pub fn profile(&self) -> &'static str {
        self.pick("\u{f007}", "👤", "[USER]")
    }

    pub fn settings(&self) -> &'static str {
        self.pick("\u{f013}", "⚙️", "[SET]")
    }

    pub fn edit(&self) -> &'static str {
        self.pick("\u{f044}", "✏️", "[EDIT]")
    }

    pub fn link(&self) -> &'static str {
        self.pick("\u{f0c1}", "🔗", "[LINK]")
    }

    pub fn video(&self) -> &'static str {
        self.pick("\u{f03d}", "🎬", "[VID]")
    }

    pub fn copy(&self) -> &'static str {
        self.pick("\u{f0c5}", "📋", "[COPY]")
    }

    pub fn phone(&self) -> &'static str {
        self.pick("\u{f10b}", "📱", "[APP]")
    }

    // === Bridge Health ===

    pub fn shield(&self) -> &'static str {
        self.pick("\u{f132}", "🛡️", "[SEC]")
    }

    pub fn steps(&self) -> &'static str {
        self.pick("\u{f54b}", "👣", "[STEP]")
    }

    pub fn calories(&self) -> &'static str {
        self.pick("\u{f06d}", "🔥", "[KCAL]")
    }

    pub fn heart(&self) -> &'static str {
        self.pick("\u{f004}", "❤️", "[BPM]")
    }

    pub fn activity(&self) -> &'static str {
        self.pick("\u{f0e7}", "⚡", "[ACT]")
    }

    pub fn workout(&self) -> &'static str {
        self.pick("\u{f44b}", "🏋️", "[WKT]")
    }

    pub fn sleep(&self) -> &'static str {
        self.pick("\u{f186}", "🌙", "[SLP]")
    }

    pub fn clock(&self) -> &'static str {
        self.pick("\u{f017}", "🕒", "[TIME]")
    }

    pub fn loading(&self) -> &'static str {
        self.pick("\u{f021}", "⏳", "[..]")
    }

    // === Status ===

    pub fn success(&self) -> &'static str {
        self.pick("\u{f00c}", "✅", "[OK]")
    }

    pub fn warning(&self) -> &'static str {
        self.pick("\u{f071}", "⚠️", "[!]")
    }

    pub fn error(&self) -> &'static str {
        self.pick("\u{ebfb}", "❌", "[X]")
    }

    pub fn info(&self) -> &'static str {
        self.pick("\u{f05a}", "ℹ️", "[i]")
    }

    pub fn check(&self) -> &'static str {
        self.pick("\u{f00c}", "✓", "[x]")
    }

    pub fn uncheck(&self) -> &'static str {
        self.pick(" ", " ", "[ ]")
    }
}

impl Default for Icons {
    fn default() -> Self {
        Self::new()
    }
}
