//! Bridge Health: synced health dashboard.

use crate::components::{Footer, Header, FOOTER_HEIGHT, HEADER_HEIGHT};
use crate::flow::{FlowEvent, Screen as ScreenId};
use crate::health::{
    format_sync_time, format_thousands, format_workout_age, HealthData, HealthDataProvider,
    MockHealthProvider,
};
use crate::keymap::Action;
use crate::screens::screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
use crate::styles::theme;
use crate::tasks::TaskKind;
use crate::utils::{create_standard_layout, phone_column};
use anyhow::Result;
use chrono::{DateTime, Utc};
use crossterm::event::{Event, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Padding, Paragraph};
use tracing::debug;

pub struct FitDataScreen {
    provider: Box<dyn HealthDataProvider>,
    data: Option<HealthData>,
    loading: bool,
    last_sync: Option<DateTime<Utc>>,
}

impl Default for FitDataScreen {
    fn default() -> Self {
        Self::new(Box::new(MockHealthProvider))
    }
}

impl std::fmt::Debug for FitDataScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FitDataScreen")
            .field("loading", &self.loading)
            .field("last_sync", &self.last_sync)
            .finish_non_exhaustive()
    }
}

impl FitDataScreen {
    pub fn new(provider: Box<dyn HealthDataProvider>) -> Self {
        Self {
            provider,
            data: None,
            loading: false,
            last_sync: None,
        }
    }

    pub fn data(&self) -> Option<&HealthData> {
        self.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_sync(&self) -> Option<DateTime<Utc>> {
        self.last_sync
    }

    fn sync(&mut self, now: DateTime<Utc>) {
        self.data = Some(self.provider.snapshot(now));
        self.last_sync = Some(now);
        self.loading = false;
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
        let t = theme();
        let [_, center, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .areas(area);
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(ctx.icons.loading(), t.title_style(true))),
                Line::from(""),
                Line::from(Span::styled("Loading your health data...", t.muted_style())),
            ])
            .alignment(Alignment::Center),
            center,
        );
    }

    fn render_metric(
        frame: &mut Frame,
        area: Rect,
        icon: &str,
        label: &str,
        value: String,
        color: Color,
    ) {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .padding(Padding::horizontal(1));
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(vec![
                    Span::styled(format!("{} ", icon), t.metric_style(color)),
                    Span::styled(label.to_string(), t.muted_style()),
                ]),
                Line::from(Span::styled(value, t.emphasis_style())),
            ])
            .block(block),
            area,
        );
    }

    fn render_dashboard(&self, frame: &mut Frame, area: Rect, data: &HealthData, ctx: &RenderContext) {
        let t = theme();
        let icons = ctx.icons;
        let [sync_area, steps_area, row_a, row_b, workouts_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(4),
            Constraint::Length(4),
        ])
        .areas(area);

        let sync_text = match self.last_sync {
            Some(at) => format!("Last synced: {}", format_sync_time(at)),
            None => String::new(),
        };
        frame.render_widget(
            Paragraph::new(sync_text)
                .style(t.muted_style())
                .alignment(Alignment::Center),
            sync_area,
        );

        // Steps card with goal gauge
        let steps_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_style())
            .padding(Padding::horizontal(1));
        let steps_inner = steps_block.inner(steps_area);
        frame.render_widget(steps_block, steps_area);
        let [steps_label, steps_gauge, steps_goal] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(steps_inner);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{} ", icons.steps()), t.metric_style(t.steps)),
                Span::styled("Steps  ", t.muted_style()),
                Span::styled(format_thousands(data.steps), t.emphasis_style()),
            ])),
            steps_label,
        );
        frame.render_widget(
            Gauge::default()
                .gauge_style(Style::default().fg(t.steps))
                .ratio(data.step_progress())
                .label(format!("{:.0}%", data.step_progress() * 100.0)),
            steps_gauge,
        );
        frame.render_widget(
            Paragraph::new(format!("{} goal", format_thousands(data.step_goal)))
                .style(t.muted_style()),
            steps_goal,
        );

        let [calories_area, heart_area] =
            Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).areas(row_a);
        let [active_area, _] =
            Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).areas(row_b);
        Self::render_metric(
            frame,
            calories_area,
            icons.calories(),
            "Calories",
            data.calories.to_string(),
            t.calories,
        );
        Self::render_metric(
            frame,
            heart_area,
            icons.heart(),
            "Heart Rate",
            format!("{} BPM", data.heart_rate),
            t.heart,
        );
        Self::render_metric(
            frame,
            active_area,
            icons.clock(),
            "Active",
            format!("{}m", data.active_minutes),
            t.activity,
        );

        let mut lines = Vec::new();
        for workout in &data.workouts {
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", icons.workout()), t.metric_style(t.activity)),
                Span::styled(workout.name.clone(), t.text_style()),
                Span::styled(
                    format!("  {}", format_workout_age(workout.timestamp, ctx.now)),
                    t.muted_style(),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                format!(
                    "   {} min • {} cal • {}",
                    workout.duration, workout.calories, workout.kind
                ),
                t.muted_style(),
            )));
        }
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(t.border_style())
                    .title(" Recent Workouts ")
                    .padding(Padding::horizontal(1)),
            ),
            workouts_area,
        );

        frame.render_widget(
            Paragraph::new(vec![
                Line::from(vec![
                    Span::styled("● ", t.success_style()),
                    Span::styled("Connected to Fam App", t.text_style()),
                ]),
                Line::from(Span::styled(
                    "Your workout videos are being recorded as health activities",
                    t.muted_style(),
                )),
            ])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(t.border_style())
                    .padding(Padding::horizontal(1)),
            ),
            status_area,
        );
    }
}

impl Screen for FitDataScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let (header, content, footer) = create_standard_layout(area, HEADER_HEIGHT, FOOTER_HEIGHT);
        Header::render(frame, header, ScreenId::FitData, "Your Health Data");

        let column = phone_column(content, 64);
        match (&self.data, self.loading) {
            (Some(data), false) => self.render_dashboard(frame, column, data, ctx),
            _ => self.render_loading(frame, column, ctx),
        }

        Footer::render(
            frame,
            footer,
            &ctx.config.keymap.footer_for(&[
                (Action::Refresh, "Refresh"),
                (Action::Back, "Back to Fam App"),
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
            // Sync time is stamped when the refresh starts
            Some(Action::Refresh) if !self.loading => {
                self.loading = true;
                self.last_sync = Some(Utc::now());
                ScreenAction::StartTask(TaskKind::RefreshHealthData)
            }
            Some(Action::Back) => ScreenAction::Flow(FlowEvent::Exit),
            _ => ScreenAction::None,
        })
    }

    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        self.data = None;
        self.last_sync = None;
        self.loading = true;
        Ok(ScreenAction::StartTask(TaskKind::LoadHealthData))
    }

    fn on_task_complete(&mut self, kind: TaskKind, _ctx: &ScreenContext) -> Result<ScreenAction> {
        match kind {
            TaskKind::LoadHealthData => {
                debug!("Health data loaded");
                self.sync(Utc::now());
            }
            TaskKind::RefreshHealthData => {
                debug!("Health data refreshed");
                self.loading = false;
            }
            _ => {}
        }
        Ok(ScreenAction::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::flow::FlowState;
    use crate::utils::MemoryClipboard;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    struct Harness {
        config: Config,
        flow: FlowState,
        clipboard: MemoryClipboard,
        screen: FitDataScreen,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                config: Config::default(),
                flow: FlowState {
                    screen: ScreenId::FitData,
                    pairing_code: None,
                },
                clipboard: MemoryClipboard::new(),
                screen: FitDataScreen::default(),
            }
        }

        fn enter(&mut self) -> ScreenAction {
            let ctx = ScreenContext::new(&self.config, &self.flow, &mut self.clipboard);
            self.screen.on_enter(&ctx).unwrap()
        }

        fn complete(&mut self, kind: TaskKind) {
            let ctx = ScreenContext::new(&self.config, &self.flow, &mut self.clipboard);
            self.screen.on_task_complete(kind, &ctx).unwrap();
        }

        fn press(&mut self, code: KeyCode) -> ScreenAction {
            let mut ctx = ScreenContext::new(&self.config, &self.flow, &mut self.clipboard);
            self.screen
                .handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)), &mut ctx)
                .unwrap()
        }
    }

    #[test]
    fn test_enter_starts_loading() {
        let mut h = Harness::new();
        assert_eq!(h.enter(), ScreenAction::StartTask(TaskKind::LoadHealthData));
        assert!(h.screen.is_loading());
        assert!(h.screen.data().is_none());

        h.complete(TaskKind::LoadHealthData);
        assert!(!h.screen.is_loading());
        assert_eq!(h.screen.data().map(|d| d.steps), Some(8247));
        assert!(h.screen.last_sync().is_some());
    }

    #[test]
    fn test_refresh_reenters_loading() {
        let mut h = Harness::new();
        h.enter();
        // Refresh is ignored during the first load
        assert_eq!(h.press(KeyCode::Char('r')), ScreenAction::None);
        h.complete(TaskKind::LoadHealthData);
        let first_sync = h.screen.last_sync();

        assert_eq!(
            h.press(KeyCode::Char('r')),
            ScreenAction::StartTask(TaskKind::RefreshHealthData)
        );
        assert!(h.screen.is_loading());
        let stamped = h.screen.last_sync();
        assert!(stamped >= first_sync);
        assert_eq!(h.press(KeyCode::Char('r')), ScreenAction::None);

        h.complete(TaskKind::RefreshHealthData);
        assert!(!h.screen.is_loading());
        assert!(h.screen.data().is_some());
        assert_eq!(h.screen.last_sync(), stamped);
    }

    #[test]
    fn test_back_exits_to_main() {
        let mut h = Harness::new();
        assert_eq!(h.press(KeyCode::Esc), ScreenAction::Flow(FlowEvent::Exit));
    }

    #[test]
    fn test_reenter_discards_old_snapshot() {
        let mut h = Harness::new();
        h.enter();
        h.complete(TaskKind::LoadHealthData);
        h.enter();
        assert!(h.screen.data().is_none());
        assert!(h.screen.last_sync().is_none());
    }
}
