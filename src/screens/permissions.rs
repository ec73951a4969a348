//! Bridge Health: health permission toggles.

use crate::components::{Footer, Header, FOOTER_HEIGHT, HEADER_HEIGHT};
use crate::flow::{FlowError, FlowEvent, PermissionKind, PermissionSet, Platform, Screen as ScreenId};
use crate::keymap::Action;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::styles::{theme, LIST_HIGHLIGHT_SYMBOL};
use crate::tasks::TaskKind;
use crate::utils::{create_standard_layout, phone_column, ListStateExt};
use anyhow::Result;
use crossterm::event::{Event, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Padding, Paragraph};

const PRIVACY_NOTES: [&str; 4] = [
    "Your health data remains encrypted on your device",
    "Data is only shared between your connected apps",
    "You can revoke these permissions at any time",
    "No data is sent to external servers without your consent",
];

#[derive(Debug)]
pub struct PermissionsScreen {
    platform: Platform,
    permissions: PermissionSet,
    list_state: ListState,
    granting: bool,
    /// Kinds the controller reported missing on the last refused grant
    refused: Option<Vec<PermissionKind>>,
}

impl Default for PermissionsScreen {
    fn default() -> Self {
        Self::new(Platform::default())
    }
}

impl PermissionsScreen {
    pub fn new(platform: Platform) -> Self {
        let mut list_state = ListState::default();
        list_state.select_first_item(PermissionKind::ALL.len());
        Self {
            platform,
            permissions: PermissionSet::new(),
            list_state,
            granting: false,
            refused: None,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn permissions(&self) -> PermissionSet {
        self.permissions
    }

    pub fn is_granting(&self) -> bool {
        self.granting
    }

    pub fn refused(&self) -> Option<&[PermissionKind]> {
        self.refused.as_deref()
    }

    pub fn selected_kind(&self) -> PermissionKind {
        let index = self.list_state.selected().unwrap_or(0);
        PermissionKind::ALL[index.min(PermissionKind::ALL.len() - 1)]
    }

    fn grant_label(&self) -> &'static str {
        if self.granting {
            "Granting Permissions..."
        } else {
            "Grant Permissions"
        }
    }

    fn grant(&mut self) -> ScreenAction {
        if self.permissions.all() {
            self.granting = true;
            self.refused = None;
            ScreenAction::StartTask(TaskKind::GrantPermissions)
        } else {
            // Let the controller refuse it so the missing kinds come back
            ScreenAction::Flow(FlowEvent::GrantPermissions(self.permissions))
        }
    }

    fn render_toggles(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let t = theme();
        let icons = ctx.icons;
        let items: Vec<ListItem> = PermissionKind::ALL
            .iter()
            .map(|kind| {
                let granted = self.permissions.is_granted(*kind);
                let (mark, mark_style) = if granted {
                    (icons.check(), t.success_style())
                } else {
                    (icons.uncheck(), t.muted_style())
                };
                let icon = match kind {
                    PermissionKind::Steps => icons.steps(),
                    PermissionKind::Calories => icons.calories(),
                    PermissionKind::HeartRate => icons.heart(),
                    PermissionKind::Workouts => icons.workout(),
                    PermissionKind::Sleep => icons.sleep(),
                };
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(format!("[{}] ", mark), mark_style),
                        Span::styled(format!("{} {}", icon, kind.label()), t.text_style()),
                    ]),
                    Line::from(Span::styled(
                        format!("      {}", kind.description()),
                        t.muted_style(),
                    )),
                ])
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_focused_style(true))
            .title(format!(
                " {} Grant Health Access ({}/{}) ",
                icons.shield(),
                self.permissions.granted_count(),
                PermissionKind::ALL.len()
            ));
        let list = List::new(items)
            .block(block)
            .highlight_style(t.highlight_style())
            .highlight_symbol(LIST_HIGHLIGHT_SYMBOL);
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

impl Screen for PermissionsScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let t = theme();
        let (header, content, footer) = create_standard_layout(area, HEADER_HEIGHT, FOOTER_HEIGHT);
        let description = format!(
            "Allow Bridge Health to access your {} data",
            self.platform.store_name()
        );
        Header::render(frame, header, ScreenId::Permissions, &description);

        let column = phone_column(content, 64);
        let [platform_area, toggles_area, privacy_area, button_area, hint_area] =
            Layout::vertical([
                Constraint::Length(2),
                Constraint::Length(12),
                Constraint::Length(6),
                Constraint::Length(3),
                Constraint::Min(1),
            ])
            .areas(column);

        let mut tabs = Vec::new();
        for platform in [Platform::Android, Platform::Ios] {
            let label = format!(" {} ", platform.store_name());
            if platform == self.platform {
                tabs.push(Span::styled(label, t.highlight_style()));
            } else {
                tabs.push(Span::styled(label, t.muted_style()));
            }
            tabs.push(Span::raw("  "));
        }
        frame.render_widget(
            Paragraph::new(Line::from(tabs)).alignment(Alignment::Center),
            platform_area,
        );

        self.render_toggles(frame, toggles_area, ctx);

        let privacy: Vec<Line> = PRIVACY_NOTES
            .iter()
            .map(|note| Line::from(Span::styled(format!("• {}", note), t.muted_style())))
            .collect();
        frame.render_widget(
            Paragraph::new(privacy).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(t.border_style())
                    .title(" Privacy & Security ")
                    .padding(Padding::horizontal(1)),
            ),
            privacy_area,
        );

        let enabled = self.permissions.all() || self.granting;
        let button_style = if enabled {
            t.title_style(true)
        } else {
            t.disabled_style()
        };
        frame.render_widget(
            Paragraph::new(self.grant_label())
                .style(button_style)
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(button_style),
                ),
            button_area,
        );

        let hint = match &self.refused {
            Some(missing) if !missing.is_empty() => Some((
                format!(
                    "{} Still missing: {}",
                    ctx.icons.warning(),
                    missing.iter().map(|k| k.label()).collect::<Vec<_>>().join(", ")
                ),
                t.warning_style(),
            )),
            _ if !self.permissions.all() => Some((
                "Enable all permissions to continue".to_string(),
                t.muted_style(),
            )),
            _ => None,
        };
        if let Some((text, style)) = hint {
            frame.render_widget(
                Paragraph::new(text).style(style).alignment(Alignment::Center),
                hint_area,
            );
        }

        Footer::render(
            frame,
            footer,
            &ctx.config.keymap.footer_for(&[
                (Action::ToggleSelect, "Toggle"),
                (Action::SwitchPlatform, "Platform"),
                (Action::Confirm, "Grant"),
                (Action::Back, "Back"),
            ]),
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &mut ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press || self.granting {
            return Ok(ScreenAction::None);
        }

        let total = PermissionKind::ALL.len();
        Ok(match ctx.config.keymap.get_action(key.code, key.modifiers) {
            Some(Action::MoveUp) => {
                self.list_state.select_previous_wrap(total);
                ScreenAction::None
            }
            Some(Action::MoveDown) => {
                self.list_state.select_next_wrap(total);
                ScreenAction::None
            }
            Some(Action::Home) => {
                self.list_state.select_first_item(total);
                ScreenAction::None
            }
            Some(Action::End) => {
                self.list_state.select_last_item(total);
                ScreenAction::None
            }
            Some(Action::ToggleSelect) => {
                self.permissions.toggle(self.selected_kind());
                if let Some(missing) = &mut self.refused {
                    missing.retain(|kind| !self.permissions.is_granted(*kind));
                }
                ScreenAction::None
            }
            Some(Action::SwitchPlatform | Action::MoveLeft | Action::MoveRight) => {
                self.platform = self.platform.other();
                ScreenAction::None
            }
            Some(Action::Confirm) => self.grant(),
            Some(Action::Back) => ScreenAction::Flow(FlowEvent::Back),
            _ => ScreenAction::None,
        })
    }

    fn on_enter(&mut self, ctx: &ScreenContext) -> Result<ScreenAction> {
        *self = Self::new(ctx.config.default_platform);
        Ok(ScreenAction::None)
    }

    fn on_task_complete(&mut self, kind: TaskKind, _ctx: &ScreenContext) -> Result<ScreenAction> {
        if kind != TaskKind::GrantPermissions || !self.granting {
            return Ok(ScreenAction::None);
        }
        self.granting = false;
        Ok(ScreenAction::Flow(FlowEvent::GrantPermissions(self.permissions)))
    }

    fn on_flow_error(&mut self, error: &FlowError) {
        self.granting = false;
        if let FlowError::IncompletePermissions { missing } = error {
            self.refused = Some(missing.clone());
        }
    }
}
