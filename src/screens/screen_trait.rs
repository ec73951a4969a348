//! Screen trait and associated types.
//!
//! Screens own their local state (inputs, toggles, loading flags) and never
//! touch the navigation state. They read it through the context objects and
//! ask for changes by returning a [`ScreenAction`]; the app applies flow events
//! to the navigation controller and starts timers on their behalf.

use crate::config::Config;
use crate::flow::{FlowError, FlowEvent, FlowState};
use crate::icons::Icons;
use crate::tasks::TaskKind;
use crate::utils::Clipboard;
use crate::widgets::Toast;
use anyhow::Result;
use chrono::{DateTime, Utc};
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::Frame;

/// Read-only resources for rendering.
pub struct RenderContext<'a> {
    pub config: &'a Config,
    /// Current navigation state (screen and pairing code)
    pub flow: &'a FlowState,
    pub icons: &'a Icons,
    /// Wall clock for relative times
    pub now: DateTime<Utc>,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a Config, flow: &'a FlowState, icons: &'a Icons) -> Self {
        Self {
            config,
            flow,
            icons,
            now: Utc::now(),
        }
    }
}

/// Resources for event handling.
pub struct ScreenContext<'a> {
    pub config: &'a Config,
    pub flow: &'a FlowState,
    /// Where the copy action writes the pairing code.
    pub clipboard: &'a mut dyn Clipboard,
}

impl<'a> ScreenContext<'a> {
    pub fn new(config: &'a Config, flow: &'a FlowState, clipboard: &'a mut dyn Clipboard) -> Self {
        Self {
            config,
            flow,
            clipboard,
        }
    }
}

/// Actions that a screen can return after handling an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScreenAction {
    /// Nothing to do.
    #[default]
    None,
    /// Ask the navigation controller to apply an event.
    Flow(FlowEvent),
    /// Start a simulated operation; its completion comes back through
    /// [`Screen::on_task_complete`] while this screen is still active.
    StartTask(TaskKind),
    /// Show a toast notification.
    Toast(Toast),
}

/// Trait for screen controllers.
///
/// # Example
///
/// ```rust,ignore
/// struct MyScreen {
///     busy: bool,
/// }
///
/// impl Screen for MyScreen {
///     fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
///         Ok(())
///     }
///
///     fn handle_event(&mut self, event: Event, ctx: &mut ScreenContext) -> Result<ScreenAction> {
///         self.busy = true;
///         Ok(ScreenAction::StartTask(TaskKind::VerifyCode))
///     }
/// }
/// ```
pub trait Screen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()>;

    /// Handle an input event.
    fn handle_event(&mut self, event: Event, ctx: &mut ScreenContext) -> Result<ScreenAction>;

    /// Check if a text input is currently focused.
    ///
    /// When true, global bindings on plain characters (quit, help) are disabled
    /// so the keys reach the input.
    fn is_input_focused(&self) -> bool {
        false
    }

    /// Called when the screen becomes active. Local state is rebuilt here.
    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        Ok(ScreenAction::None)
    }

    /// Called when the screen is navigated away from.
    fn on_exit(&mut self, _ctx: &ScreenContext) -> Result<()> {
        Ok(())
    }

    /// A task this screen started has finished.
    fn on_task_complete(&mut self, _kind: TaskKind, _ctx: &ScreenContext) -> Result<ScreenAction> {
        Ok(ScreenAction::None)
    }

    /// The controller refused a flow event this screen emitted.
    fn on_flow_error(&mut self, _error: &FlowError) {}
}
