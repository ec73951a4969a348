//! Render every screen into a test backend and check the key text shows up.

mod common;

use common::{TestApp, DEMO_CODE};
use crossterm::event::KeyCode;

const WIDTH: u16 = 100;
const HEIGHT: u16 = 60;

#[test]
fn main_screen_shows_menu() {
    let mut t = TestApp::new();
    let out = t.render(WIDTH, HEIGHT);
    assert!(out.contains("Fam App"));
    assert!(out.contains("Connect with Bridge App"));
    assert!(out.contains("Recent Videos"));
}

#[test]
fn connection_screen_shows_spaced_code() {
    let mut t = TestApp::new();
    t.key(KeyCode::Enter);
    let out = t.render(WIDTH, HEIGHT);
    assert!(out.contains("Your Connection Code"));
    assert!(out.contains("4 8 2 9 1 3"));
    assert!(out.contains("Code expires in 10 minutes"));

    t.key(KeyCode::Char('c'));
    let out = t.render(WIDTH, HEIGHT);
    assert!(out.contains("Copied!"));
}

#[test]
fn bridge_entry_shows_error_after_mismatch() {
    let mut t = TestApp::new();
    t.go_to_bridge_entry();
    let out = t.render(WIDTH, HEIGHT);
    assert!(out.contains("Enter your 6-digit connection code"));
    assert!(out.contains("Verify Code"));

    t.submit_code("000000");
    let out = t.render(WIDTH, HEIGHT);
    assert!(out.contains("Invalid code. Please check and try again."));
}

#[test]
fn permissions_screen_counts_granted() {
    let mut t = TestApp::new();
    t.go_to_bridge_entry();
    t.submit_code(DEMO_CODE);
    let out = t.render(WIDTH, HEIGHT);
    assert!(out.contains("Grant Health Access (0/5)"));
    assert!(out.contains("Enable all permissions to continue"));

    t.enable_all_permissions();
    let out = t.render(WIDTH, HEIGHT);
    assert!(out.contains("Grant Health Access (5/5)"));
    assert!(!out.contains("Enable all permissions to continue"));
}

#[test]
fn fit_data_dashboard_renders() {
    let mut t = TestApp::new();
    t.go_to_fit_data();
    let out = t.render(WIDTH, HEIGHT);
    assert!(out.contains("Your Health Data"));
    assert!(out.contains("Last synced:"));
    assert!(out.contains("8,247"));
    assert!(out.contains("Recent Workouts"));
    assert!(out.contains("Connected to Fam App"));
}

#[test]
fn help_overlay_lists_presets() {
    let mut t = TestApp::new();
    t.key(KeyCode::Char('?'));
    assert!(t.app.is_help_visible());
    let out = t.render(WIDTH, HEIGHT);
    assert!(out.contains("Keyboard Shortcuts - Standard Preset"));
    assert!(out.contains("(not saved)"));
}
