use crate::styles::theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Rows the footer occupies (1 border + 1 text)
pub const FOOTER_HEIGHT: u16 = 2;

/// Common footer component
pub struct Footer;

impl Footer {
    /// Render key hints like `"Continue: Enter | Back: Esc"`.
    ///
    /// Labels and keys of each `label: keys` part get their own styles.
    pub fn render(frame: &mut Frame, area: Rect, text: &str) {
        let t = theme();
        let block = Block::default()
            .borders(Borders::TOP)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style());

        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(Self::spans(text)).alignment(Alignment::Center),
            inner,
        );
    }

    fn spans(text: &str) -> Line<'static> {
        let t = theme();
        let mut spans = Vec::new();
        for (i, part) in text.split(" | ").enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", t.muted_style()));
            }
            match part.split_once(": ") {
                Some((label, keys)) => {
                    spans.push(Span::styled(format!("{}: ", label), t.text_style()));
                    spans.push(Span::styled(keys.to_string(), t.emphasis_style()));
                }
                None => spans.push(Span::styled(part.to_string(), t.text_style())),
            }
        }
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_split_label_and_keys() {
        let line = Footer::spans("Continue: Enter | Back: Esc");
        let texts: Vec<String> = line.spans.iter().map(|s| s.content.to_string()).collect();
        assert_eq!(texts, vec!["Continue: ", "Enter", " | ", "Back: ", "Esc"]);
    }
}
