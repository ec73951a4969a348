//! Shared helpers for the pairing workflow integration tests.
//!
//! `TestApp` wraps an [`App`] wired to an instant scheduler, an in-memory
//! clipboard and a fixed pairing code, and drives it with synthetic key
//! presses. Rendering goes through ratatui's `TestBackend`.

#![allow(dead_code)]

use anyhow::{bail, Result};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use fambridge::config::{Config, DelayConfig};
use fambridge::flow::{FixedCodeSource, PairingCode, Screen};
use fambridge::tasks::InstantScheduler;
use fambridge::utils::MemoryClipboard;
use fambridge::App;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::path::PathBuf;
use tempfile::TempDir;

/// Code used by the reference scenario
pub const DEMO_CODE: &str = "482913";

pub struct TestApp {
    pub app: App,
    pub clipboard: MemoryClipboard,
    /// Holds the config file when built with `with_config_dir`
    _config_dir: Option<TempDir>,
    pub config_path: Option<PathBuf>,
}

impl TestApp {
    /// App that always draws [`DEMO_CODE`].
    pub fn new() -> Self {
        Self::with_codes(&[DEMO_CODE])
    }

    /// App that hands out `codes` in order, one per visit to the connection
    /// screen.
    pub fn with_codes(codes: &[&str]) -> Self {
        Self::build(Config::default(), codes, false)
    }

    /// App whose preset changes are saved to a temporary config file.
    pub fn with_config_dir(config: Config) -> Self {
        Self::build(config, &[DEMO_CODE], true)
    }

    fn build(config: Config, codes: &[&str], persist: bool) -> Self {
        let codes: Vec<PairingCode> = codes.iter().map(|c| c.parse().unwrap()).collect();
        let clipboard = MemoryClipboard::new();

        let mut app = App::new(
            config,
            Box::new(InstantScheduler::new()),
            Box::new(FixedCodeSource::new(codes)),
        )
        .with_clipboard(Box::new(clipboard.clone()))
        .with_delays(DelayConfig::instant());

        let (config_dir, config_path) = if persist {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("config.toml");
            app = app.with_config_path(path.clone());
            (Some(dir), Some(path))
        } else {
            (None, None)
        };

        app.start().unwrap();
        Self {
            app,
            clipboard,
            _config_dir: config_dir,
            config_path,
        }
    }

    pub fn screen(&self) -> Screen {
        self.app.current_screen()
    }

    pub fn code(&self) -> Option<String> {
        self.app.flow_state().pairing_code().map(|c| c.to_string())
    }

    pub fn key(&mut self, code: KeyCode) {
        self.key_with(code, KeyModifiers::NONE);
    }

    pub fn key_with(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        self.app
            .handle_event(Event::Key(KeyEvent::new(code, modifiers)))
            .unwrap();
    }

    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.key(KeyCode::Char(c));
        }
    }

    /// Deliver task completions until nothing is in flight.
    pub fn settle(&mut self) {
        self.try_settle().unwrap();
    }

    fn try_settle(&mut self) -> Result<()> {
        for _ in 0..16 {
            self.app.tick()?;
            if self.app.pending_tasks() == 0 {
                return Ok(());
            }
        }
        bail!("tasks never settled")
    }

    /// Main -> Connection -> BridgeEntry
    pub fn go_to_bridge_entry(&mut self) {
        self.key(KeyCode::Enter);
        self.key(KeyCode::Enter);
        assert_eq!(self.screen(), Screen::BridgeEntry);
    }

    /// Type `code` on the bridge entry screen and wait for verification.
    pub fn submit_code(&mut self, code: &str) {
        self.type_text(code);
        self.key(KeyCode::Enter);
        self.settle();
    }

    /// Turn on every permission, top to bottom.
    pub fn enable_all_permissions(&mut self) {
        for _ in 0..5 {
            self.key(KeyCode::Char(' '));
            self.key(KeyCode::Down);
        }
    }

    /// Walk the happy path up to the dashboard.
    pub fn go_to_fit_data(&mut self) {
        self.go_to_bridge_entry();
        let code = self.code().unwrap();
        self.submit_code(&code);
        self.enable_all_permissions();
        self.key(KeyCode::Enter);
        self.settle();
        assert_eq!(self.screen(), Screen::FitData);
    }

    /// Render one frame and return the buffer as text, one line per row.
    pub fn render(&mut self, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut result = Ok(());
        terminal
            .draw(|frame| result = self.app.draw(frame))
            .unwrap();
        result.unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }
}
