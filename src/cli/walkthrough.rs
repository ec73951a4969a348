//! Headless run of the whole pairing flow.
//!
//! Drives an [`App`] with synthetic key presses and an instant scheduler, the
//! same way a user would: open the connection screen, carry the code over,
//! enter a wrong code once, then the right one, grant every permission, load
//! the dashboard and exit back to the main screen.

use crate::app::App;
use crate::config::{Config, DelayConfig};
use crate::flow::{CodeSource, PermissionKind, Screen};
use crate::tasks::InstantScheduler;
use crate::utils::MemoryClipboard;
use anyhow::{bail, Result};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tracing::info;

/// Upper bound on ticks spent waiting for chained tasks
const MAX_SETTLE_TICKS: usize = 16;

/// What one walkthrough step led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub label: String,
    pub screen: Screen,
    /// Inline error or hint the screen showed after the step
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkthroughReport {
    pub code: String,
    pub steps: Vec<StepOutcome>,
    /// Whether the pairing code was cleared at the end
    pub code_cleared: bool,
}

struct Walker {
    app: App,
    steps: Vec<StepOutcome>,
}

impl Walker {
    fn press(&mut self, code: KeyCode) -> Result<()> {
        self.app
            .handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    /// Tick until no task is left in flight
    fn settle(&mut self) -> Result<()> {
        for _ in 0..MAX_SETTLE_TICKS {
            self.app.tick()?;
            if self.app.pending_tasks() == 0 {
                return Ok(());
            }
        }
        bail!("Tasks still pending after {} ticks", MAX_SETTLE_TICKS)
    }

    fn step(&mut self, label: impl Into<String>, keys: &[KeyCode]) -> Result<()> {
        for key in keys {
            self.press(*key)?;
        }
        self.settle()?;

        let screen = self.app.current_screen();
        let note = match screen {
            Screen::BridgeEntry => self.app.bridge_entry().error().map(str::to_string),
            Screen::Permissions => self.app.permissions().refused().map(|missing| {
                let labels: Vec<&str> = missing.iter().map(|k| k.label()).collect();
                format!("Still missing: {}", labels.join(", "))
            }),
            _ => None,
        };

        let label = label.into();
        info!("Walkthrough step '{}' -> {}", label, screen);
        self.steps.push(StepOutcome {
            label,
            screen,
            note,
        });
        Ok(())
    }
}

fn digit_keys(code: &str) -> Vec<KeyCode> {
    code.chars().map(KeyCode::Char).collect()
}

/// Same length, last digit shifted by one
fn wrong_code(code: &str) -> String {
    code.chars()
        .enumerate()
        .map(|(i, c)| match c.to_digit(10) {
            Some(d) if i + 1 == code.len() => char::from_digit((d + 1) % 10, 10).unwrap_or('0'),
            _ => c,
        })
        .collect()
}

/// Run the scenario end to end.
pub fn run_walkthrough(codes: Box<dyn CodeSource>) -> Result<WalkthroughReport> {
    let mut app = App::new(Config::default(), Box::new(InstantScheduler::new()), codes)
        .with_clipboard(Box::new(MemoryClipboard::new()))
        .with_delays(DelayConfig::instant());
    app.start()?;
    let mut walker = Walker {
        app,
        steps: Vec::new(),
    };

    walker.step("Connect with Bridge App", &[KeyCode::Enter])?;
    let Some(code) = walker.app.flow_state().pairing_code().map(|c| c.to_string()) else {
        bail!("No pairing code after entering the connection screen");
    };

    walker.step("Copy code", &[KeyCode::Char('c')])?;
    walker.step("Continue to Bridge App", &[KeyCode::Enter])?;

    let wrong = wrong_code(&code);
    let mut keys = digit_keys(&wrong);
    keys.push(KeyCode::Enter);
    walker.step(format!("Enter wrong code {}", wrong), &keys)?;

    let mut keys = vec![KeyCode::Backspace; code.len()];
    keys.extend(digit_keys(&code));
    keys.push(KeyCode::Enter);
    walker.step(format!("Enter code {}", code), &keys)?;

    walker.step("Grant with nothing enabled", &[KeyCode::Enter])?;

    let mut keys = Vec::new();
    for _ in PermissionKind::ALL {
        keys.push(KeyCode::Char(' '));
        keys.push(KeyCode::Down);
    }
    keys.push(KeyCode::Enter);
    walker.step("Enable all permissions and grant", &keys)?;

    walker.step("Refresh health data", &[KeyCode::Char('r')])?;
    walker.step("Back to Fam App", &[KeyCode::Esc])?;

    Ok(WalkthroughReport {
        code,
        code_cleared: walker.app.flow_state().pairing_code().is_none(),
        steps: walker.steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{FixedCodeSource, PairingCode};

    #[test]
    fn test_wrong_code() {
        assert_eq!(wrong_code("482913"), "482914");
        assert_eq!(wrong_code("100009"), "100000");
    }

    #[test]
    fn test_walkthrough_visits_every_screen() {
        let code: PairingCode = "482913".parse().unwrap();
        let report = run_walkthrough(Box::new(FixedCodeSource::single(code))).unwrap();

        assert_eq!(report.code, "482913");
        assert!(report.code_cleared);

        let screens: Vec<Screen> = report.steps.iter().map(|s| s.screen).collect();
        assert_eq!(
            screens,
            vec![
                Screen::Connection,
                Screen::Connection,
                Screen::BridgeEntry,
                Screen::BridgeEntry,
                Screen::Permissions,
                Screen::Permissions,
                Screen::FitData,
                Screen::FitData,
                Screen::Main,
            ]
        );
        assert_eq!(
            report.steps[3].note.as_deref(),
            Some("Invalid code. Please check and try again.")
        );
        assert!(report.steps[5]
            .note
            .as_deref()
            .is_some_and(|n| n.starts_with("Still missing: Steps")));
    }
}
