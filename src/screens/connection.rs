//! Fam app screen that shows the pairing code.

use crate::components::{Footer, Header, FOOTER_HEIGHT, HEADER_HEIGHT};
use crate::flow::{FlowEvent, Screen as ScreenId};
use crate::keymap::Action;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::styles::theme;
use crate::tasks::TaskKind;
use crate::utils::{create_standard_layout, phone_column};
use crate::widgets::Toast;
use anyhow::Result;
use crossterm::event::{Event, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};
use tracing::warn;

const STEPS: [&str; 3] = [
    "Download and install the Bridge Health App from your device's app store",
    "Open the Bridge App and enter the 6-digit code shown above",
    "Grant health permissions when prompted to sync your workout data",
];

const CONNECT_FACTS: [&str; 4] = [
    "Your workout videos will be automatically recorded as health activities",
    "Health data (steps, calories, heart rate) will sync between apps",
    "Data is encrypted and stored securely on your device",
    "You can disconnect at any time from either app",
];

#[derive(Debug, Default)]
pub struct ConnectionScreen {
    /// "Copied" indicator, cleared by `ResetCopyFeedback`
    copied: bool,
}

impl ConnectionScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_copied(&self) -> bool {
        self.copied
    }

    fn copy_code(&mut self, ctx: &mut ScreenContext) -> ScreenAction {
        let Some(code) = ctx.flow.pairing_code() else {
            return ScreenAction::None;
        };
        match ctx.clipboard.copy(code.as_str()) {
            Ok(()) => {
                self.copied = true;
                ScreenAction::StartTask(TaskKind::ResetCopyFeedback)
            }
            Err(e) => {
                warn!("Copy failed: {:#}", e);
                ScreenAction::Toast(Toast::error(format!("{:#}", e)))
            }
        }
    }

    fn render_code_card(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let t = theme();
        let code = ctx
            .flow
            .pairing_code()
            .map(|c| c.as_str().chars().flat_map(|d| [d, ' ']).collect::<String>())
            .unwrap_or_default();
        let copy_hint = if self.copied {
            Span::styled(format!("{} Copied!", ctx.icons.check()), t.success_style())
        } else {
            Span::styled(
                format!(
                    "{} {} to copy",
                    ctx.icons.copy(),
                    ctx.config.keymap.get_key_display_for_action(Action::Copy)
                ),
                t.muted_style(),
            )
        };

        let lines = vec![
            Line::from(Span::styled("Your Connection Code", t.muted_style())),
            Line::from(""),
            Line::from(Span::styled(code.trim_end().to_string(), t.emphasis_style())),
            Line::from(copy_hint),
            Line::from(Span::styled("Code expires in 10 minutes", t.muted_style())),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_focused_style(false))
            .title(format!(" {} Setup Health Connection ", ctx.icons.phone()));
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            area,
        );
    }

    fn render_instructions(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let t = theme();
        let mut lines: Vec<Line> = STEPS
            .iter()
            .enumerate()
            .map(|(i, step)| {
                Line::from(vec![
                    Span::styled(format!("{}. ", i + 1), t.title_style(false)),
                    Span::styled(*step, t.text_style()),
                ])
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{} What happens when you connect?", ctx.icons.shield()),
            t.success_style(),
        )));
        lines.extend(
            CONNECT_FACTS
                .iter()
                .map(|fact| Line::from(Span::styled(format!("  • {}", fact), t.muted_style()))),
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .padding(Padding::horizontal(1));
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
            area,
        );
    }
}

impl Screen for ConnectionScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let (header, content, footer) = create_standard_layout(area, HEADER_HEIGHT, FOOTER_HEIGHT);
        Header::render(
            frame,
            header,
            ScreenId::Connection,
            "Connect your health data across devices with our secure bridge application",
        );

        let column = phone_column(content, 64);
        let [code_area, instructions_area] =
            Layout::vertical([Constraint::Length(7), Constraint::Min(0)]).areas(column);
        self.render_code_card(frame, code_area, ctx);
        self.render_instructions(frame, instructions_area, ctx);

        Footer::render(
            frame,
            footer,
            &ctx.config.keymap.footer_for(&[
                (Action::Copy, "Copy"),
                (Action::Confirm, "Continue to Bridge App"),
                (Action::Back, "Back"),
            ]),
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &mut ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }

        Ok(match ctx.config.keymap.get_action(key.code, key.modifiers) {
            Some(Action::Copy) => self.copy_code(ctx),
            Some(Action::Confirm) => ScreenAction::Flow(FlowEvent::ContinueToBridge),
            Some(Action::Back) => ScreenAction::Flow(FlowEvent::Back),
            _ => ScreenAction::None,
        })
    }

    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        self.copied = false;
        Ok(ScreenAction::None)
    }

    fn on_task_complete(&mut self, kind: TaskKind, _ctx: &ScreenContext) -> Result<ScreenAction> {
        if kind == TaskKind::ResetCopyFeedback {
            self.copied = false;
        }
        Ok(ScreenAction::None)
    }
}
