//! Card-style menu widget.
//!
//! Items are three lines tall: padding, icon and title with an optional
//! description, padding. The selected card gets a bar on its left edge.

use crate::styles::theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{StatefulWidget, Widget},
};

const ITEM_HEIGHT: u16 = 3;

/// A single menu item
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub icon: String,
    pub text: String,
    /// Color for the icon and title
    pub color: Color,
    /// Muted text after the title
    pub info: Option<String>,
}

impl MenuItem {
    pub fn new(icon: impl Into<String>, text: impl Into<String>, color: Color) -> Self {
        Self {
            icon: icon.into(),
            text: text.into(),
            color,
            info: None,
        }
    }

    pub fn info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }
}

/// State for the Menu widget
#[derive(Debug, Default, Clone)]
pub struct MenuState {
    selected: Option<usize>,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index;
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }
}

/// Menu widget that renders items as cards
#[derive(Debug, Clone)]
pub struct Menu {
    items: Vec<MenuItem>,
    /// Selection bar color
    accent: Color,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self {
            items,
            accent: theme().fam_accent,
        }
    }

    pub fn accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }

    /// Rows needed to show every item
    pub fn height(&self) -> u16 {
        self.items.len() as u16 * ITEM_HEIGHT
    }
}

impl StatefulWidget for Menu {
    type State = MenuState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let t = theme();

        for (i, item) in self.items.iter().enumerate() {
            let y = area.y + i as u16 * ITEM_HEIGHT;
            if y + ITEM_HEIGHT > area.y + area.height {
                break;
            }

            let is_selected = state.selected == Some(i);
            let mut style = t.text_style().fg(item.color);
            if is_selected {
                style = t.highlight_style().fg(item.color);
            }
            let bold = style.add_modifier(Modifier::BOLD);
            let bar = Span::styled(
                if is_selected { "▌" } else { " " },
                Style::default().fg(self.accent).bg(style.bg.unwrap_or(Color::Reset)),
            );

            let fill = |spans: Vec<Span<'static>>| -> Line<'static> {
                let used: usize = spans.iter().map(Span::width).sum();
                let mut spans = spans;
                spans.push(Span::styled(
                    " ".repeat((area.width as usize).saturating_sub(used)),
                    style,
                ));
                Line::from(spans)
            };

            let padding = fill(vec![bar.clone()]);
            padding
                .clone()
                .render(Rect::new(area.x, y, area.width, 1), buf);

            let mut content = vec![
                bar.clone(),
                Span::styled(" ", style),
                Span::styled(format!("{} ", item.icon), bold),
                Span::styled(item.text.clone(), if is_selected { bold } else { style }),
            ];
            if let Some(info) = &item.info {
                content.push(Span::styled(
                    format!("  {}", info),
                    t.muted_style().bg(style.bg.unwrap_or(Color::Reset)),
                ));
            }
            fill(content).render(Rect::new(area.x, y + 1, area.width, 1), buf);

            padding.render(Rect::new(area.x, y + 2, area.width, 1), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_menu_item_creation() {
        let item = MenuItem::new("+", "Connect", Color::Cyan).info("Bridge Health");
        assert_eq!(item.text, "Connect");
        assert_eq!(item.info.as_deref(), Some("Bridge Health"));
    }

    #[test]
    fn test_menu_height() {
        let menu = Menu::new(vec![
            MenuItem::new("1", "First", Color::Cyan),
            MenuItem::new("2", "Second", Color::Green),
        ]);
        assert_eq!(menu.height(), 6);
    }

    #[test]
    fn test_render_marks_selected_item() {
        let menu = Menu::new(vec![
            MenuItem::new("*", "First", Color::Cyan),
            MenuItem::new("*", "Second", Color::Cyan),
        ]);
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);
        let mut state = MenuState::new();
        state.select(Some(1));
        menu.render(area, &mut buf, &mut state);

        assert!(row_text(&buf, 1).contains("First"));
        assert!(!row_text(&buf, 1).starts_with('▌'));
        assert!(row_text(&buf, 4).starts_with('▌'));
        assert!(row_text(&buf, 4).contains("Second"));
    }
}
