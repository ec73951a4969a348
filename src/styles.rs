//! Theme and style system for Fambridge
//!
//! Two apps share the terminal: the Fam app (main and connection screens) and
//! the Bridge Health companion (code entry onwards). Each gets its own accent
//! so the hand-off between them is visible.

use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

/// List selection indicator shown next to the selected item
pub const LIST_HIGHLIGHT_SYMBOL: &str = "» ";

static THEME: RwLock<Theme> = RwLock::new(Theme::dark());

/// Initialize the global theme (call once at startup, or to update at runtime)
pub fn init_theme(theme_type: ThemeType) {
    let mut theme = THEME.write().unwrap_or_else(PoisonError::into_inner);
    *theme = Theme::new(theme_type);
}

/// Get the current theme
pub fn theme() -> Theme {
    THEME.read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Theme type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeType {
    #[default]
    Dark,
    Light,
    /// Disable all UI colors (equivalent to `NO_COLOR=1`)
    NoColor,
}

impl FromStr for ThemeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "light" => ThemeType::Light,
            "nocolor" | "no-color" | "no_color" => ThemeType::NoColor,
            _ => ThemeType::Dark,
        })
    }
}

/// Color palette for the application
#[derive(Debug, Clone)]
pub struct Theme {
    pub theme_type: ThemeType,

    /// Fam app accent
    pub fam_accent: Color,
    /// Bridge Health accent
    pub bridge_accent: Color,

    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // Metric colors on the health dashboard
    pub steps: Color,
    pub calories: Color,
    pub heart: Color,
    pub activity: Color,

    pub text: Color,
    pub text_muted: Color,
    /// Pairing code digits, key hints
    pub text_emphasis: Color,

    pub border: Color,
    pub highlight_bg: Color,
}

impl Theme {
    pub fn new(theme_type: ThemeType) -> Self {
        match theme_type {
            ThemeType::Dark => Self::dark(),
            ThemeType::Light => Self::light(),
            ThemeType::NoColor => Self::no_color(),
        }
    }

    /// Dark theme - for dark terminal backgrounds
    pub const fn dark() -> Self {
        Self {
            theme_type: ThemeType::Dark,
            fam_accent: Color::Magenta,
            bridge_accent: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            steps: Color::Blue,
            calories: Color::LightRed,
            heart: Color::Red,
            activity: Color::Green,
            text: Color::White,
            text_muted: Color::DarkGray,
            text_emphasis: Color::Yellow,
            border: Color::DarkGray,
            highlight_bg: Color::DarkGray,
        }
    }

    /// Light theme - for light terminal backgrounds
    pub const fn light() -> Self {
        Self {
            theme_type: ThemeType::Light,
            fam_accent: Color::Magenta,
            bridge_accent: Color::Blue,
            success: Color::Green,
            warning: Color::Rgb(180, 120, 0),
            error: Color::Red,
            steps: Color::Blue,
            calories: Color::Rgb(200, 80, 0),
            heart: Color::Red,
            activity: Color::Rgb(0, 130, 60),
            text: Color::Black,
            text_muted: Color::DarkGray,
            text_emphasis: Color::Blue,
            border: Color::DarkGray,
            highlight_bg: Color::Gray,
        }
    }

    /// No-color theme
    ///
    /// Style helpers below avoid setting fg/bg in this mode so the terminal
    /// defaults are used.
    pub const fn no_color() -> Self {
        Self {
            theme_type: ThemeType::NoColor,
            fam_accent: Color::Reset,
            bridge_accent: Color::Reset,
            success: Color::Reset,
            warning: Color::Reset,
            error: Color::Reset,
            steps: Color::Reset,
            calories: Color::Reset,
            heart: Color::Reset,
            activity: Color::Reset,
            text: Color::Reset,
            text_muted: Color::Reset,
            text_emphasis: Color::Reset,
            border: Color::Reset,
            highlight_bg: Color::Reset,
        }
    }

    fn colorless(&self) -> bool {
        self.theme_type == ThemeType::NoColor
    }

    fn fg_or(&self, color: Color, fallback: Style) -> Style {
        if self.colorless() {
            fallback
        } else {
            Style::default().fg(color)
        }
    }

    // === Style Helpers ===

    /// Accent color of the app that owns a screen
    pub fn accent(&self, bridge_app: bool) -> Color {
        if bridge_app {
            self.bridge_accent
        } else {
            self.fam_accent
        }
    }

    /// Screen title in the owning app's accent
    pub fn title_style(&self, bridge_app: bool) -> Style {
        self.fg_or(self.accent(bridge_app), Style::default())
            .add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        self.fg_or(self.text, Style::default())
    }

    pub fn muted_style(&self) -> Style {
        self.fg_or(self.text_muted, Style::default().add_modifier(Modifier::DIM))
    }

    pub fn emphasis_style(&self) -> Style {
        self.fg_or(self.text_emphasis, Style::default())
            .add_modifier(Modifier::BOLD)
    }

    pub fn success_style(&self) -> Style {
        self.fg_or(self.success, Style::default().add_modifier(Modifier::BOLD))
    }

    pub fn warning_style(&self) -> Style {
        self.fg_or(self.warning, Style::default().add_modifier(Modifier::BOLD))
    }

    pub fn error_style(&self) -> Style {
        self.fg_or(self.error, Style::default().add_modifier(Modifier::BOLD))
    }

    /// Style for a dashboard metric value
    pub fn metric_style(&self, color: Color) -> Style {
        self.fg_or(color, Style::default()).add_modifier(Modifier::BOLD)
    }

    /// Focused border in the owning app's accent
    pub fn border_focused_style(&self, bridge_app: bool) -> Style {
        self.fg_or(
            self.accent(bridge_app),
            Style::default().add_modifier(Modifier::BOLD),
        )
    }

    pub fn border_style(&self) -> Style {
        self.fg_or(self.border, Style::default())
    }

    /// Style for list item highlight (selected row)
    pub fn highlight_style(&self) -> Style {
        if self.colorless() {
            return Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        Style::default()
            .fg(self.text_emphasis)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Disabled buttons (Verify below six digits, Grant with missing toggles)
    pub fn disabled_style(&self) -> Style {
        self.fg_or(self.text_muted, Style::default().add_modifier(Modifier::DIM))
    }
}
