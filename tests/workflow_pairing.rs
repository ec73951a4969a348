//! Integration tests for the pairing workflow driven through the app.
//!
//! - Happy path from Main to FitData and back
//! - Code mismatch and retry
//! - Back navigation and code regeneration
//! - Incomplete permissions
//! - Copy feedback and task cancellation

mod common;

use common::{TestApp, DEMO_CODE};
use crossterm::event::{KeyCode, KeyModifiers};
use fambridge::flow::{PermissionKind, Platform, Screen};
use fambridge::keymap::KeymapPreset;
use fambridge::config::DelayConfig;
use fambridge::Config;

// ============================================================================
// HAPPY PATH
// ============================================================================

#[test]
fn full_pairing_flow_returns_to_main_with_code_cleared() {
    let mut t = TestApp::new();
    assert_eq!(t.screen(), Screen::Main);
    assert_eq!(t.code(), None);

    // Main -> Connection draws the code
    t.key(KeyCode::Enter);
    assert_eq!(t.screen(), Screen::Connection);
    assert_eq!(t.code().as_deref(), Some(DEMO_CODE));

    // Connection -> BridgeEntry carries it
    t.key(KeyCode::Enter);
    assert_eq!(t.screen(), Screen::BridgeEntry);
    assert_eq!(t.code().as_deref(), Some(DEMO_CODE));

    // Verification waits for its task
    t.type_text(DEMO_CODE);
    t.key(KeyCode::Enter);
    assert!(t.app.bridge_entry().is_verifying());
    assert_eq!(t.screen(), Screen::BridgeEntry);
    t.settle();
    assert_eq!(t.screen(), Screen::Permissions);

    t.enable_all_permissions();
    assert!(t.app.permissions().permissions().all());
    t.key(KeyCode::Enter);
    assert!(t.app.permissions().is_granting());
    t.settle();
    assert_eq!(t.screen(), Screen::FitData);

    // Entering FitData starts the load; settle() ran it
    assert!(!t.app.fit_data().is_loading());
    assert_eq!(t.app.fit_data().data().map(|d| d.steps), Some(8247));

    t.key(KeyCode::Esc);
    assert_eq!(t.screen(), Screen::Main);
    assert_eq!(t.code(), None);
}

#[test]
fn second_pairing_draws_a_new_code() {
    let mut t = TestApp::with_codes(&["482913", "135790"]);
    t.go_to_fit_data();
    t.key(KeyCode::Esc);
    assert_eq!(t.screen(), Screen::Main);

    t.key(KeyCode::Enter);
    assert_eq!(t.code().as_deref(), Some("135790"));
}

// ============================================================================
// CODE ENTRY
// ============================================================================

#[test]
fn wrong_code_stays_on_bridge_entry_with_error() {
    let mut t = TestApp::new();
    t.go_to_bridge_entry();

    t.submit_code("111111");
    assert_eq!(t.screen(), Screen::BridgeEntry);
    assert_eq!(
        t.app.bridge_entry().error(),
        Some("Invalid code. Please check and try again.")
    );
    // The code survives a failed attempt
    assert_eq!(t.code().as_deref(), Some(DEMO_CODE));

    // Retry without limit
    for _ in 0..6 {
        t.key(KeyCode::Backspace);
    }
    assert_eq!(t.app.bridge_entry().error(), None);
    t.submit_code(DEMO_CODE);
    assert_eq!(t.screen(), Screen::Permissions);
}

#[test]
fn short_code_cannot_be_submitted() {
    let mut t = TestApp::new();
    t.go_to_bridge_entry();
    t.type_text("4829");
    t.key(KeyCode::Enter);
    assert_eq!(t.app.pending_tasks(), 0);
    assert!(!t.app.bridge_entry().is_verifying());
}

#[test]
fn noise_in_code_input_is_dropped() {
    let mut t = TestApp::new();
    t.go_to_bridge_entry();
    t.type_text("48-29 13x9");
    assert_eq!(t.app.bridge_entry().entered(), DEMO_CODE);
    t.key(KeyCode::Enter);
    t.settle();
    assert_eq!(t.screen(), Screen::Permissions);
}

// ============================================================================
// BACK NAVIGATION
// ============================================================================

#[test]
fn back_walks_the_chain() {
    let mut t = TestApp::with_codes(&["482913", "246810"]);
    t.go_to_bridge_entry();
    t.submit_code(DEMO_CODE);
    assert_eq!(t.screen(), Screen::Permissions);

    t.key(KeyCode::Esc);
    assert_eq!(t.screen(), Screen::BridgeEntry);
    assert_eq!(t.code().as_deref(), Some(DEMO_CODE));
    // Entry state is rebuilt on the way back in
    assert_eq!(t.app.bridge_entry().entered(), "");

    // Re-entering Connection draws a fresh code
    t.key(KeyCode::Esc);
    assert_eq!(t.screen(), Screen::Connection);
    assert_eq!(t.code().as_deref(), Some("246810"));

    t.key(KeyCode::Esc);
    assert_eq!(t.screen(), Screen::Main);
    assert_eq!(t.code(), None);

    // Back on Main is a no-op
    t.key(KeyCode::Esc);
    assert_eq!(t.screen(), Screen::Main);
}

#[test]
fn verification_locks_the_screen() {
    let mut t = TestApp::new();
    t.go_to_bridge_entry();
    t.type_text(DEMO_CODE);
    t.key(KeyCode::Enter);
    assert_eq!(t.app.pending_tasks(), 1);

    // Back is ignored until the verification lands
    t.key(KeyCode::Esc);
    assert_eq!(t.screen(), Screen::BridgeEntry);

    // Ctrl+C still quits
    t.key_with(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(t.app.should_quit());
}

// ============================================================================
// PERMISSIONS
// ============================================================================

#[test]
fn incomplete_permissions_are_refused() {
    let mut t = TestApp::new();
    t.go_to_bridge_entry();
    t.submit_code(DEMO_CODE);

    // Four of five
    for _ in 0..4 {
        t.key(KeyCode::Char(' '));
        t.key(KeyCode::Down);
    }
    t.key(KeyCode::Enter);
    t.settle();
    assert_eq!(t.screen(), Screen::Permissions);
    assert_eq!(
        t.app.permissions().refused(),
        Some(&[PermissionKind::Sleep][..])
    );

    t.key(KeyCode::Char(' '));
    assert_eq!(t.app.permissions().refused(), Some(&[][..]));
    t.key(KeyCode::Enter);
    t.settle();
    assert_eq!(t.screen(), Screen::FitData);
}

#[test]
fn platform_defaults_from_config_and_toggles() {
    let mut config = Config::default();
    config.default_platform = Platform::Ios;
    let mut t = TestApp::with_config_dir(config);
    t.go_to_bridge_entry();
    t.submit_code(DEMO_CODE);

    assert_eq!(t.app.permissions().platform(), Platform::Ios);
    t.key(KeyCode::Tab);
    assert_eq!(t.app.permissions().platform(), Platform::Android);
}

// ============================================================================
// CONNECTION SCREEN
// ============================================================================

#[test]
fn copy_puts_code_on_clipboard() {
    let mut t = TestApp::new();
    t.key(KeyCode::Enter);
    t.key(KeyCode::Char('c'));

    assert_eq!(t.clipboard.contents().as_deref(), Some(DEMO_CODE));
    assert!(t.app.connection().is_copied());

    t.settle();
    assert!(!t.app.connection().is_copied());
}

#[test]
fn fit_data_refresh_updates_sync_time() {
    let mut t = TestApp::new();
    t.go_to_fit_data();
    let first = t.app.fit_data().last_sync();
    assert!(first.is_some());

    t.key(KeyCode::Char('r'));
    assert!(t.app.fit_data().is_loading());
    let out = t.render(100, 60);
    assert!(out.contains("Loading your health data..."));

    t.settle();
    assert!(!t.app.fit_data().is_loading());
    assert!(t.app.fit_data().last_sync() >= first);
}

// ============================================================================
// HELP OVERLAY
// ============================================================================

#[test]
fn preset_switch_is_saved() {
    let mut t = TestApp::with_config_dir(Config::default());
    t.key(KeyCode::Char('?'));
    t.key(KeyCode::Char('3'));
    t.key(KeyCode::Esc);
    assert!(!t.app.is_help_visible());

    let path = t.config_path.clone().unwrap();
    let saved = Config::load_or_create(&path).unwrap();
    assert_eq!(saved.keymap.preset, KeymapPreset::Emacs);
    // The app ran with instant delays; the file keeps the configured ones
    assert_eq!(saved.delays, DelayConfig::default());
}
