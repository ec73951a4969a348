//! Text input widget for rendering TextInput instances.
//!
//! Handles the placeholder, disabled state, focused border and cursor
//! placement. With `spaced(true)` every character is followed by a gap, which
//! is how the six pairing digits are shown.

use crate::styles::theme;
use crate::utils::TextInput;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub struct TextInputWidget<'a> {
    input: &'a TextInput,
    title: Option<&'a str>,
    placeholder: Option<&'a str>,
    focused: bool,
    disabled: bool,
    spaced: bool,
    /// Focused border color
    accent: Color,
}

impl<'a> TextInputWidget<'a> {
    pub fn new(input: &'a TextInput) -> Self {
        Self {
            input,
            title: None,
            placeholder: None,
            focused: false,
            disabled: false,
            spaced: false,
            accent: theme().bridge_accent,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn spaced(mut self, spaced: bool) -> Self {
        self.spaced = spaced;
        self
    }

    pub fn accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }

    fn display_text(&self) -> String {
        let text = self.input.text();
        if text.is_empty() {
            return self.placeholder.unwrap_or("").to_string();
        }
        if self.spaced {
            text.chars().flat_map(|c| [c, ' ']).collect::<String>().trim_end().to_string()
        } else {
            text.to_string()
        }
    }

    /// Column of the cursor inside the block
    fn cursor_column(&self) -> u16 {
        let cursor = self.input.cursor().min(self.input.len());
        let column = if self.spaced { cursor * 2 } else { cursor };
        column as u16
    }

    fn text_style(&self) -> Style {
        let t = theme();
        if self.disabled || self.input.is_empty() {
            t.muted_style()
        } else if self.spaced {
            t.emphasis_style()
        } else {
            t.text_style()
        }
    }

    fn border_style(&self) -> Style {
        let t = theme();
        if self.disabled {
            t.disabled_style()
        } else if self.focused && t.theme_type != crate::styles::ThemeType::NoColor {
            Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
        } else if self.focused {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            t.border_style()
        }
    }

    fn create_block(&self) -> Block<'a> {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.border_style());
        if let Some(title) = self.title {
            block = block.title(format!(" {} ", title));
        }
        block
    }
}

impl Widget for TextInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.display_text())
            .block(self.create_block())
            .style(self.text_style())
            .render(area, buf);
    }
}

/// Extension trait for Frame to render TextInputWidget with cursor support.
pub trait TextInputWidgetExt {
    /// Render a TextInputWidget and set cursor position if focused.
    fn render_text_input_widget(&mut self, widget: TextInputWidget, area: Rect);
}

impl TextInputWidgetExt for Frame<'_> {
    fn render_text_input_widget(&mut self, widget: TextInputWidget, area: Rect) {
        let show_cursor = widget.focused && !widget.disabled;
        let inner = widget.create_block().inner(area);
        let column = widget.cursor_column().min(inner.width.saturating_sub(1));

        self.render_widget(widget, area);

        if show_cursor {
            self.set_cursor_position((inner.x + column, inner.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text_placeholder() {
        let input = TextInput::digits(6);
        let widget = TextInputWidget::new(&input).placeholder("000000");
        assert_eq!(widget.display_text(), "000000");
    }

    #[test]
    fn test_display_text_spaced() {
        let input = TextInput::with_text("4829");
        let widget = TextInputWidget::new(&input).spaced(true);
        assert_eq!(widget.display_text(), "4 8 2 9");
        assert_eq!(widget.cursor_column(), 8);
    }

    #[test]
    fn test_display_text_plain() {
        let input = TextInput::with_text("hello");
        let widget = TextInputWidget::new(&input);
        assert_eq!(widget.display_text(), "hello");
        assert_eq!(widget.cursor_column(), 5);
    }

    #[test]
    fn test_render_shows_title() {
        let input = TextInput::with_text("12");
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        TextInputWidget::new(&input)
            .title("Code")
            .focused(true)
            .render(area, &mut buf);
        let top: String = (0..20).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(top.contains("Code"));
    }
}
