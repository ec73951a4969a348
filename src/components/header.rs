use crate::flow::Screen;
use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

/// Rows the header occupies
pub const HEADER_HEIGHT: u16 = 4;

/// App bar shown on top of every screen
pub struct Header;

impl Header {
    /// Render the app bar for `screen`: its title, which app it belongs to, and
    /// a one-line description.
    pub fn render(frame: &mut Frame, area: Rect, screen: Screen, description: &str) {
        let t = theme();
        let bridge = screen.is_bridge_app();
        let app_name = if bridge { "Bridge Health" } else { "Fam" };

        let mut right = vec![Span::styled(format!(" {} ", app_name), t.muted_style())];
        if let Some(step) = Self::step(screen) {
            right.push(Span::styled(format!("· Step {} of 4 ", step), t.muted_style()));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_focused_style(bridge))
            .title(Line::from(format!(" {} ", screen.title())).style(t.title_style(bridge)))
            .title(Line::from(right).right_aligned())
            .padding(Padding::horizontal(1));

        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(description).style(t.text_style()),
            inner,
        );
    }

    /// Position of `screen` in the pairing flow, `None` for the main screen
    pub fn step(screen: Screen) -> Option<usize> {
        Screen::ALL
            .iter()
            .position(|s| *s == screen)
            .filter(|i| *i > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_numbers() {
        assert_eq!(Header::step(Screen::Main), None);
        assert_eq!(Header::step(Screen::Connection), Some(1));
        assert_eq!(Header::step(Screen::FitData), Some(4));
    }
}
