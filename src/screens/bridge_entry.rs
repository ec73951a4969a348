//! Bridge Health: pairing code entry.

use crate::components::{Footer, Header, FOOTER_HEIGHT, HEADER_HEIGHT};
use crate::flow::{FlowError, FlowEvent, Screen as ScreenId, PAIRING_CODE_LEN};
use crate::keymap::Action;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::styles::theme;
use crate::tasks::TaskKind;
use crate::utils::{create_standard_layout, phone_column, TextInput};
use crate::widgets::{TextInputWidget, TextInputWidgetExt};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::layout::Flex;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};
use tracing::debug;

#[derive(Debug)]
pub struct BridgeEntryScreen {
    input: TextInput,
    verifying: bool,
    error: Option<String>,
}

impl Default for BridgeEntryScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl BridgeEntryScreen {
    pub fn new() -> Self {
        Self {
            input: TextInput::digits(PAIRING_CODE_LEN),
            verifying: false,
            error: None,
        }
    }

    pub fn entered(&self) -> &str {
        self.input.text()
    }

    pub fn is_verifying(&self) -> bool {
        self.verifying
    }

    /// Inline error under the input
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Verify is only offered for a complete code
    pub fn can_verify(&self) -> bool {
        !self.verifying && self.input.len() == PAIRING_CODE_LEN
    }

    fn edit(&mut self, action: Option<Action>, code: KeyCode) {
        let before = self.input.text().to_string();
        let handled = match action {
            Some(action) if action != Action::Confirm && action != Action::Back => {
                self.input.handle_action(action)
            }
            _ => false,
        };
        if !handled {
            self.input.handle_key(code);
        }
        if self.input.text() != before {
            self.error = None;
        }
    }

    fn verify_label(&self) -> &'static str {
        if self.verifying {
            "Verifying..."
        } else {
            "Verify Code"
        }
    }
}

impl Screen for BridgeEntryScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let (header, content, footer) = create_standard_layout(area, HEADER_HEIGHT, FOOTER_HEIGHT);
        Header::render(
            frame,
            header,
            ScreenId::BridgeEntry,
            "Connect your health data with Android Health Connect and Apple HealthKit",
        );

        let column = phone_column(content, 56);
        let [label_area, input_area, error_area, button_area, help_area, demo_area] =
            Layout::vertical([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(5),
                Constraint::Min(0),
            ])
            .areas(column);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{} ", ctx.icons.activity()), t.title_style(true)),
                Span::styled("Enter your 6-digit connection code", t.text_style()),
            ])),
            label_area,
        );

        let input_width = (PAIRING_CODE_LEN as u16 * 2 + 3).min(input_area.width);
        let [input_area] = Layout::horizontal([Constraint::Length(input_width)])
            .flex(Flex::Center)
            .areas(input_area);
        frame.render_text_input_widget(
            TextInputWidget::new(&self.input)
                .placeholder("0 0 0 0 0 0")
                .spaced(true)
                .focused(!self.verifying)
                .disabled(self.verifying)
                .accent(t.bridge_accent),
            input_area,
        );

        if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(format!("{} {}", ctx.icons.error(), error))
                    .style(t.error_style())
                    .alignment(Alignment::Center),
                error_area,
            );
        }

        let button_style = if self.can_verify() || self.verifying {
            t.title_style(true)
        } else {
            t.disabled_style()
        };
        let button = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(button_style);
        frame.render_widget(
            Paragraph::new(self.verify_label())
                .style(button_style)
                .alignment(Alignment::Center)
                .block(button),
            button_area,
        );

        let help = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .title(" Need help? ")
            .padding(Padding::horizontal(1));
        frame.render_widget(
            Paragraph::new(
                "The 6-digit code was generated in your main Fam App. \
                 Go to Profile → Connect with Bridge App to find your code.",
            )
            .style(t.muted_style())
            .wrap(Wrap { trim: true })
            .block(help),
            help_area,
        );

        if let Some(code) = ctx.flow.pairing_code() {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled("Demo Mode: ", t.warning_style()),
                    Span::styled("Use code ", t.muted_style()),
                    Span::styled(code.as_str().to_string(), t.emphasis_style()),
                    Span::styled(" to continue", t.muted_style()),
                ]))
                .alignment(Alignment::Center),
                demo_area,
            );
        }

        Footer::render(
            frame,
            footer,
            &ctx.config.keymap.footer_for(&[
                (Action::Confirm, "Verify"),
                (Action::Backspace, "Delete"),
                (Action::Back, "Back"),
            ]),
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &mut ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press || self.verifying {
            return Ok(ScreenAction::None);
        }

        let action = ctx.config.keymap.get_action(key.code, key.modifiers);
        Ok(match action {
            Some(Action::Confirm) => {
                if self.can_verify() {
                    self.verifying = true;
                    self.error = None;
                    ScreenAction::StartTask(TaskKind::VerifyCode)
                } else {
                    ScreenAction::None
                }
            }
            Some(Action::Back) => ScreenAction::Flow(FlowEvent::Back),
            _ => {
                self.edit(action, key.code);
                ScreenAction::None
            }
        })
    }

    fn is_input_focused(&self) -> bool {
        !self.verifying
    }

    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        *self = Self::new();
        Ok(ScreenAction::None)
    }

    fn on_task_complete(&mut self, kind: TaskKind, _ctx: &ScreenContext) -> Result<ScreenAction> {
        if kind != TaskKind::VerifyCode || !self.verifying {
            return Ok(ScreenAction::None);
        }
        self.verifying = false;
        debug!("Submitting entered code");
        Ok(ScreenAction::Flow(FlowEvent::SubmitCode(
            self.input.text().to_string(),
        )))
    }

    fn on_flow_error(&mut self, error: &FlowError) {
        self.verifying = false;
        self.error = Some(error.to_string());
    }
}
