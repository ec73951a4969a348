//! Application shell.
//!
//! Routes terminal events to the active screen, applies the screen's actions to
//! the navigation controller and the scheduler, and hands task completions back
//! to the screen that asked for them.

use crate::components::help_overlay::preset_for_key;
use crate::components::HelpOverlay;
use crate::config::{Config, DelayConfig};
use crate::flow::{CodeSource, FlowEvent, FlowState, NavigationController, Screen as ScreenId};
use crate::health::HealthDataProvider;
use crate::icons::Icons;
use crate::keymap::{Action, KeymapPreset};
use crate::screens::{
    BridgeEntryScreen, ConnectionScreen, FitDataScreen, MainMenuScreen, PermissionsScreen,
    RenderContext, Screen, ScreenAction, ScreenContext,
};
use crate::tasks::Scheduler;
use crate::tui::Tui;
use crate::utils::{Clipboard, SystemClipboard};
use crate::widgets::{Toast, ToastManager};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

/// How long the run loop waits for input before ticking again
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// One renderer per flow screen
#[derive(Default)]
struct Screens {
    main_menu: MainMenuScreen,
    connection: ConnectionScreen,
    bridge_entry: BridgeEntryScreen,
    permissions: PermissionsScreen,
    fit_data: FitDataScreen,
}

impl Screens {
    fn get_mut(&mut self, id: ScreenId) -> &mut dyn Screen {
        match id {
            ScreenId::Main => &mut self.main_menu,
            ScreenId::Connection => &mut self.connection,
            ScreenId::BridgeEntry => &mut self.bridge_entry,
            ScreenId::Permissions => &mut self.permissions,
            ScreenId::FitData => &mut self.fit_data,
        }
    }
}

/// Main application state
pub struct App {
    config: Config,
    /// Where preset changes from the help overlay are saved
    config_path: Option<PathBuf>,
    controller: NavigationController,
    scheduler: Box<dyn Scheduler>,
    /// Delays in effect for this run; may differ from `config.delays`, which
    /// is what gets saved
    delays: DelayConfig,
    clipboard: Box<dyn Clipboard>,
    icons: Icons,
    screens: Screens,
    toasts: ToastManager,
    show_help: bool,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, scheduler: Box<dyn Scheduler>, codes: Box<dyn CodeSource>) -> Self {
        let icons = Icons::from_config(&config);
        Self {
            delays: config.delays.clone(),
            config,
            config_path: None,
            controller: NavigationController::new(codes),
            scheduler,
            clipboard: Box::new(SystemClipboard),
            icons,
            screens: Screens::default(),
            toasts: ToastManager::new(),
            show_help: false,
            should_quit: false,
        }
    }

    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn with_health_provider(mut self, provider: Box<dyn HealthDataProvider>) -> Self {
        self.screens.fit_data = FitDataScreen::new(provider);
        self
    }

    /// Run with `delays` without touching the saved configuration.
    pub fn with_delays(mut self, delays: DelayConfig) -> Self {
        self.delays = delays;
        self
    }

    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn current_screen(&self) -> ScreenId {
        self.controller.screen()
    }

    pub fn flow_state(&self) -> &FlowState {
        self.controller.state()
    }

    pub fn controller(&self) -> &NavigationController {
        &self.controller
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_help_visible(&self) -> bool {
        self.show_help
    }

    /// Tasks started but not yet delivered
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toasts.current()
    }

    pub fn connection(&self) -> &ConnectionScreen {
        &self.screens.connection
    }

    pub fn bridge_entry(&self) -> &BridgeEntryScreen {
        &self.screens.bridge_entry
    }

    pub fn permissions(&self) -> &PermissionsScreen {
        &self.screens.permissions
    }

    pub fn fit_data(&self) -> &FitDataScreen {
        &self.screens.fit_data
    }

    /// Run the active screen's enter hook. Called once before the first frame.
    pub fn start(&mut self) -> Result<()> {
        let active = self.controller.screen();
        let action = {
            let ctx = ScreenContext::new(&self.config, self.controller.state(), self.clipboard.as_mut());
            self.screens.get_mut(active).on_enter(&ctx)?
        };
        self.dispatch(action)
    }

    pub fn run(&mut self, tui: &mut Tui) -> Result<()> {
        tui.enter()?;
        self.start()?;
        info!("Started on {} screen", self.controller.screen());

        loop {
            self.tick()?;

            let mut rendered = Ok(());
            tui.terminal_mut().draw(|frame| rendered = self.draw(frame))?;
            rendered?;

            if self.should_quit {
                break;
            }

            if let Some(event) = tui.poll_event(POLL_INTERVAL)? {
                self.handle_event(event)?;
            }
        }

        info!(
            "Quitting after {} transitions",
            self.controller.transitions()
        );
        tui.exit()?;
        Ok(())
    }

    /// Draw the active screen plus overlays.
    pub fn draw(&mut self, frame: &mut Frame) -> Result<()> {
        let area = frame.area();
        let active = self.controller.screen();
        let ctx = RenderContext::new(&self.config, self.controller.state(), &self.icons);
        self.screens.get_mut(active).render(frame, area, &ctx)?;

        self.toasts.render(frame, area);

        if self.show_help {
            let path = self
                .config_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(not saved)".to_string());
            HelpOverlay::render(frame, area, &self.config.keymap, &path);
        }
        Ok(())
    }

    /// Expire toasts and deliver finished tasks.
    pub fn tick(&mut self) -> Result<()> {
        self.toasts.tick();

        for completion in self.scheduler.poll_completed() {
            let active = self.controller.screen();
            if completion.kind.owner() != active {
                debug!(
                    "Dropping {:?} {}: {} screen is not active",
                    completion.kind,
                    completion.id,
                    completion.kind.owner()
                );
                continue;
            }
            let action = {
                let ctx = ScreenContext::new(&self.config, self.controller.state(), self.clipboard.as_mut());
                self.screens
                    .get_mut(active)
                    .on_task_complete(completion.kind, &ctx)?
            };
            self.dispatch(action)?;
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        let Event::Key(key) = event else {
            return Ok(());
        };
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        if self.show_help {
            self.handle_help_key(key.code);
            return Ok(());
        }

        let active = self.controller.screen();
        // Plain characters belong to a focused input; modified keys stay global
        let input_focused = self.screens.get_mut(active).is_input_focused()
            && !key.modifiers.contains(KeyModifiers::CONTROL);
        if !input_focused {
            match self.config.keymap.get_action(key.code, key.modifiers) {
                Some(Action::Quit) => {
                    self.should_quit = true;
                    return Ok(());
                }
                Some(Action::Help) => {
                    self.show_help = true;
                    return Ok(());
                }
                _ => {}
            }
        }

        let action = {
            let mut ctx =
                ScreenContext::new(&self.config, self.controller.state(), self.clipboard.as_mut());
            self.screens.get_mut(active).handle_event(event, &mut ctx)?
        };
        self.dispatch(action)
    }

    fn handle_help_key(&mut self, code: KeyCode) {
        if let KeyCode::Char(c) = code {
            if let Some(preset) = preset_for_key(c) {
                self.set_keymap_preset(preset);
                return;
            }
        }
        self.show_help = false;
    }

    fn set_keymap_preset(&mut self, preset: KeymapPreset) {
        if self.config.keymap.preset == preset {
            return;
        }
        self.config.keymap.preset = preset;
        info!("Switched keymap preset to {}", preset.name());

        if let Some(path) = &self.config_path {
            if let Err(e) = self.config.save(path) {
                warn!("Failed to save keymap preset: {:#}", e);
                self.toasts.error("Failed to save keymap preset");
                return;
            }
        }
        self.toasts
            .success(format!("Keymap preset: {}", preset.name()));
    }

    /// Apply a screen action and everything it leads to.
    fn dispatch(&mut self, mut action: ScreenAction) -> Result<()> {
        loop {
            action = match action {
                ScreenAction::None => return Ok(()),
                ScreenAction::Flow(event) => self.apply_flow(event)?,
                ScreenAction::StartTask(kind) => {
                    let delay = kind.delay(&self.delays);
                    self.scheduler.schedule(kind, delay);
                    ScreenAction::None
                }
                ScreenAction::Toast(toast) => {
                    self.toasts.push(toast);
                    ScreenAction::None
                }
            };
        }
    }

    /// Forward an event to the controller. A screen change cancels pending tasks
    /// and runs the exit and enter hooks; a refusal goes back to the screen.
    fn apply_flow(&mut self, event: FlowEvent) -> Result<ScreenAction> {
        let from = self.controller.screen();
        let result = self.controller.apply(event).map(|state| state.screen);

        match result {
            Ok(to) if to == from => Ok(ScreenAction::None),
            Ok(to) => {
                let cancelled = self.scheduler.pending();
                self.scheduler.cancel_all();
                if cancelled > 0 {
                    debug!("Cancelled {} pending tasks leaving {}", cancelled, from);
                }

                let ctx = ScreenContext::new(&self.config, self.controller.state(), self.clipboard.as_mut());
                self.screens.get_mut(from).on_exit(&ctx)?;
                self.screens.get_mut(to).on_enter(&ctx)
            }
            Err(e) => {
                self.screens.get_mut(from).on_flow_error(&e);
                Ok(ScreenAction::None)
            }
        }
    }
}
