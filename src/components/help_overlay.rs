//! Help Overlay Component
//!
//! Displays current keybindings when user presses '?' key. Number keys switch
//! the keymap preset while the overlay is open.

use crate::keymap::{Keymap, KeymapPreset};
use crate::styles::theme;
use crate::utils::center_popup;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Presets in the order of their number keys
pub const PRESET_KEYS: [(char, KeymapPreset); 3] = [
    ('1', KeymapPreset::Standard),
    ('2', KeymapPreset::Vim),
    ('3', KeymapPreset::Emacs),
];

/// Preset bound to a number key inside the overlay
pub fn preset_for_key(c: char) -> Option<KeymapPreset> {
    PRESET_KEYS
        .iter()
        .find(|(key, _)| *key == c)
        .map(|(_, preset)| *preset)
}

/// Renders the help overlay showing current keybindings
pub struct HelpOverlay;

impl HelpOverlay {
    pub fn render(frame: &mut Frame, area: Rect, keymap: &Keymap, config_path: &str) {
        let t = theme();
        let popup_area = center_popup(area, 80, 90);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" Keyboard Shortcuts - {} Preset ", keymap.preset.name()))
            .title_alignment(Alignment::Center)
            .border_style(t.border_focused_style(false));

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let [presets_area, bindings_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .areas(inner);

        let mut preset_spans = vec![Span::styled("Preset: ", t.muted_style())];
        for (key, preset) in PRESET_KEYS {
            let style = if preset == keymap.preset {
                t.title_style(false)
            } else {
                t.muted_style()
            };
            preset_spans.push(Span::styled(format!("[{}] {}  ", key, preset.name()), style));
        }
        frame.render_widget(Paragraph::new(Line::from(preset_spans)), presets_area);

        // Bindings grouped by category, in first-seen order
        let bindings = keymap.all_bindings();
        let mut categories: Vec<&str> = Vec::new();
        for binding in &bindings {
            if !categories.contains(&binding.action.category()) {
                categories.push(binding.action.category());
            }
        }

        let mut lines: Vec<Line> = Vec::new();
        for category in categories {
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                format!("  {}", category),
                t.text_style().add_modifier(Modifier::BOLD),
            )));
            for binding in bindings.iter().filter(|b| b.action.category() == category) {
                lines.push(Line::from(vec![
                    Span::styled(format!("    {:12}", binding.display()), t.emphasis_style()),
                    Span::styled(binding.get_description().to_string(), t.text_style()),
                ]));
            }
        }
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }),
            bindings_area,
        );

        let footer_text = format!(
            "Edit keybindings in: {}\nPress 1/2/3 to switch preset, any other key to close",
            config_path
        );
        frame.render_widget(
            Paragraph::new(footer_text)
                .style(t.muted_style())
                .alignment(Alignment::Center),
            footer_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_preset_for_key() {
        assert_eq!(preset_for_key('2'), Some(KeymapPreset::Vim));
        assert_eq!(preset_for_key('4'), None);
    }

    #[test]
    fn test_renders_bindings() {
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        let keymap = Keymap::default();
        terminal
            .draw(|frame| {
                let area = frame.area();
                HelpOverlay::render(frame, area, &keymap, "/tmp/config.toml")
            })
            .unwrap();
        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("Standard Preset"));
        assert!(content.contains("Copy pairing code"));
    }
}
