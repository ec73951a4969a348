//! Fam app home screen.
//!
//! Profile card, three menu entries, and the recent videos list. Only
//! "Connect with Bridge App" leads anywhere; the other entries answer with a
//! toast.

use crate::components::{Footer, Header, FOOTER_HEIGHT, HEADER_HEIGHT};
use crate::flow::{FlowEvent, Screen as ScreenId};
use crate::health::recent_videos;
use crate::keymap::Action;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::styles::theme;
use crate::utils::{create_standard_layout, phone_column};
use crate::widgets::{Menu, MenuItem, MenuState, Toast};
use anyhow::Result;
use crossterm::event::{Event, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

/// Main menu entries in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    EditProfile,
    Settings,
    ConnectBridge,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; 3] = [
        MenuEntry::EditProfile,
        MenuEntry::Settings,
        MenuEntry::ConnectBridge,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuEntry::EditProfile => "Edit Profile",
            MenuEntry::Settings => "Settings",
            MenuEntry::ConnectBridge => "Connect with Bridge App",
        }
    }
}

pub struct MainMenuScreen {
    menu_state: MenuState,
}

impl Default for MainMenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl MainMenuScreen {
    pub fn new() -> Self {
        let mut screen = Self {
            menu_state: MenuState::new(),
        };
        screen.reset();
        screen
    }

    fn reset(&mut self) {
        // The connect entry is the one action that goes somewhere
        self.menu_state
            .select(MenuEntry::ALL.iter().position(|e| *e == MenuEntry::ConnectBridge));
    }

    pub fn selected(&self) -> MenuEntry {
        self.menu_state
            .selected()
            .and_then(|i| MenuEntry::ALL.get(i).copied())
            .unwrap_or(MenuEntry::ConnectBridge)
    }

    fn move_selection(&mut self, down: bool) {
        let len = MenuEntry::ALL.len();
        let current = self.menu_state.selected().unwrap_or(0);
        let next = if down {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.menu_state.select(Some(next));
    }

    fn activate(&self, entry: MenuEntry) -> ScreenAction {
        match entry {
            MenuEntry::ConnectBridge => ScreenAction::Flow(FlowEvent::StartPairing),
            MenuEntry::EditProfile => {
                ScreenAction::Toast(Toast::info("Profile editing is not part of this demo"))
            }
            MenuEntry::Settings => ScreenAction::Toast(Toast::info(
                "Settings live in config.toml (fambridge config path)",
            )),
        }
    }

    fn render_profile(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let t = theme();
        let profile = &ctx.config.profile;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .padding(Padding::horizontal(1));
        let lines = vec![
            Line::from(vec![
                Span::styled(format!("{} ", ctx.icons.profile()), t.title_style(false)),
                Span::styled(profile.name.clone(), t.text_style().add_modifier(Modifier::BOLD)),
            ]),
            Line::from(Span::styled(profile.membership.clone(), t.muted_style())),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_videos(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .title(" Recent Videos ")
            .padding(Padding::horizontal(1));

        let mut lines = Vec::new();
        for video in recent_videos() {
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", ctx.icons.video()), t.muted_style()),
                Span::styled(video.title, t.text_style()),
            ]));
            let status = if video.completed { "Completed" } else { "In progress" };
            lines.push(Line::from(Span::styled(
                format!("   {} min • {}", video.minutes, status),
                t.muted_style(),
            )));
        }
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

impl Screen for MainMenuScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let (header, content, footer) = create_standard_layout(area, HEADER_HEIGHT, FOOTER_HEIGHT);
        Header::render(frame, header, ScreenId::Main, "Your fitness, your family.");

        let icons = ctx.icons;
        let items = MenuEntry::ALL
            .iter()
            .map(|entry| {
                let (icon, color) = match entry {
                    MenuEntry::EditProfile => (icons.edit(), t.text),
                    MenuEntry::Settings => (icons.settings(), t.text),
                    MenuEntry::ConnectBridge => (icons.link(), t.success),
                };
                MenuItem::new(icon, entry.label(), color)
            })
            .collect();
        let menu = Menu::new(items).accent(t.fam_accent);

        let column = phone_column(content, 64);
        let [profile_area, menu_area, videos_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(menu.height() + 1),
            Constraint::Min(0),
        ])
        .areas(column);

        self.render_profile(frame, profile_area, ctx);
        frame.render_stateful_widget(menu, menu_area, &mut self.menu_state);
        self.render_videos(frame, videos_area, ctx);

        let keymap = &ctx.config.keymap;
        Footer::render(
            frame,
            footer,
            &keymap.footer_for(&[
                (Action::MoveDown, "Navigate"),
                (Action::Confirm, "Select"),
                (Action::Help, "Help"),
                (Action::Quit, "Quit"),
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
            Some(Action::MoveUp) => {
                self.move_selection(false);
                ScreenAction::None
            }
            Some(Action::MoveDown) => {
                self.move_selection(true);
                ScreenAction::None
            }
            Some(Action::Confirm) => self.activate(self.selected()),
            _ => ScreenAction::None,
        })
    }

    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        self.reset();
        Ok(ScreenAction::None)
    }
}
