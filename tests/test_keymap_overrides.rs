mod common;

use common::{TestApp, DEMO_CODE};
use crossterm::event::{KeyCode, KeyModifiers};
use fambridge::config::Config;
use fambridge::flow::Screen;
use fambridge::keymap::{Action, KeyBinding, KeymapPreset};
use tempfile::TempDir;

fn config_with(preset: KeymapPreset, overrides: &[(&str, Action)]) -> Config {
    let mut config = Config::default();
    config.keymap.preset = preset;
    for (key, action) in overrides {
        config.keymap.overrides.push(KeyBinding::new(key, *action));
    }
    config
}

#[test]
fn test_copy_override_survives_save_and_shadows_preset() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let config = config_with(KeymapPreset::Standard, &[("ctrl+y", Action::Copy)]);
    config.save(&config_path).unwrap();
    let loaded = Config::load_or_create(&config_path).unwrap();

    assert_eq!(loaded.keymap.overrides.len(), 1);
    assert_eq!(
        loaded
            .keymap
            .get_action(KeyCode::Char('y'), KeyModifiers::CONTROL),
        Some(Action::Copy)
    );
    // 'c' was the preset copy key
    assert_eq!(
        loaded.keymap.get_action(KeyCode::Char('c'), KeyModifiers::NONE),
        None
    );
    // Untouched actions keep their preset keys
    assert_eq!(
        loaded.keymap.get_action(KeyCode::Char('r'), KeyModifiers::NONE),
        Some(Action::Refresh)
    );
    assert_eq!(loaded.keymap.get_key_display_for_action(Action::Copy), "Ctrl+Y");
}

#[test]
fn test_overridden_copy_key_drives_connection_screen() {
    let config = config_with(KeymapPreset::Standard, &[("ctrl+y", Action::Copy)]);
    let mut t = TestApp::with_config_dir(config);
    t.key(KeyCode::Enter);
    assert_eq!(t.screen(), Screen::Connection);

    let out = t.render(100, 60);
    assert!(out.contains("Ctrl+Y to copy"));

    t.key(KeyCode::Char('c'));
    assert_eq!(t.clipboard.contents(), None);

    t.key_with(KeyCode::Char('y'), KeyModifiers::CONTROL);
    assert_eq!(t.clipboard.contents().as_deref(), Some(DEMO_CODE));
}

#[test]
fn test_confirm_override_on_vim_preset() {
    let config = config_with(KeymapPreset::Vim, &[("l", Action::Confirm)]);
    let mut t = TestApp::with_config_dir(config);

    // Enter no longer confirms
    t.key(KeyCode::Enter);
    assert_eq!(t.screen(), Screen::Main);

    t.key(KeyCode::Char('l'));
    assert_eq!(t.screen(), Screen::Connection);

    // Vim navigation is still there
    assert_eq!(
        t.app
            .config()
            .keymap
            .get_action(KeyCode::Char('j'), KeyModifiers::NONE),
        Some(Action::MoveDown)
    );
}

#[test]
fn test_unparseable_override_leaves_preset_in_place() {
    let config = config_with(KeymapPreset::Standard, &[("hyper+r", Action::Refresh)]);
    assert_eq!(config.keymap.invalid_overrides().len(), 1);
    assert_eq!(
        config.keymap.get_action(KeyCode::Char('r'), KeyModifiers::NONE),
        Some(Action::Refresh)
    );
    assert_eq!(config.keymap.get_key_display_for_action(Action::Refresh), "R");
}

#[test]
fn test_keymap_override_serialization_format() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let config = config_with(
        KeymapPreset::Emacs,
        &[("f1", Action::Help), ("ctrl+t", Action::SwitchPlatform)],
    );
    config.save(&config_path).unwrap();

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[keymap]"));
    assert!(content.contains("preset = \"emacs\""));
    assert!(content.contains("overrides"));

    let loaded = Config::load_or_create(&config_path).unwrap();
    assert_eq!(loaded.keymap.preset, KeymapPreset::Emacs);
    assert_eq!(
        loaded.keymap.get_action(KeyCode::F(1), KeyModifiers::NONE),
        Some(Action::Help)
    );
    assert_eq!(
        loaded
            .keymap
            .get_action(KeyCode::Char('t'), KeyModifiers::CONTROL),
        Some(Action::SwitchPlatform)
    );
    // Emacs copy binding is untouched
    assert_eq!(
        loaded.keymap.get_action(KeyCode::Char('w'), KeyModifiers::ALT),
        Some(Action::Copy)
    );
}

#[test]
fn test_ctrl_shift_override_copies_instead_of_quitting() {
    let config = config_with(KeymapPreset::Standard, &[("ctrl+shift+c", Action::Copy)]);
    let mut t = TestApp::with_config_dir(config);
    t.key(KeyCode::Enter);

    t.key_with(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL | KeyModifiers::SHIFT,
    );
    assert!(!t.app.should_quit());
    assert_eq!(t.clipboard.contents().as_deref(), Some(DEMO_CODE));

    t.key_with(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(t.app.should_quit());
}
