//! Property checks for the navigation controller, without any terminal.

use fambridge::flow::{
    sanitize_code_input, transition, FixedCodeSource, FlowError, FlowEvent, FlowState,
    NavigationController, PairingCode, PermissionKind, PermissionSet, RandomCodeSource, Screen,
};

fn controller_with(code: &str) -> NavigationController {
    let code: PairingCode = code.parse().unwrap();
    NavigationController::new(Box::new(FixedCodeSource::single(code)))
}

/// Every subset of the five permissions
fn all_permission_sets() -> Vec<PermissionSet> {
    (0u32..32)
        .map(|mask| {
            let mut set = PermissionSet::new();
            for (i, kind) in PermissionKind::ALL.iter().enumerate() {
                set.set(*kind, mask & (1 << i) != 0);
            }
            set
        })
        .collect()
}

#[test]
fn matching_code_advances_and_other_codes_do_not() {
    // A spread of codes across the valid range
    for value in (100_000u32..=999_999).step_by(37_337) {
        let code = value.to_string();
        let mut controller = controller_with(&code);
        controller.start_pairing().unwrap();
        controller.continue_to_bridge().unwrap();

        let other = if value == 999_999 { value - 1 } else { value + 1 };
        assert_eq!(
            controller.submit_code(&other.to_string()),
            Err(FlowError::CodeMismatch)
        );
        assert_eq!(controller.screen(), Screen::BridgeEntry);

        let state = controller.submit_code(&code).unwrap();
        assert_eq!(state.screen, Screen::Permissions);
    }
}

#[test]
fn sanitize_strips_non_digits_and_caps_length() {
    assert_eq!(sanitize_code_input("48 29-13"), "482913");
    assert_eq!(sanitize_code_input("4829131234"), "482913");
    assert_eq!(sanitize_code_input("abc"), "");

    for raw in ["482913", "12a34b56c78", " 0 0 0 1 ", "999999999"] {
        let once = sanitize_code_input(raw);
        assert!(once.len() <= 6);
        assert!(once.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(sanitize_code_input(&once), once);
    }
}

#[test]
fn grant_succeeds_only_with_all_five() {
    for set in all_permission_sets() {
        let state = FlowState {
            screen: Screen::Permissions,
            pairing_code: Some("482913".parse().unwrap()),
        };
        let mut codes = FixedCodeSource::single("111111".parse().unwrap());
        let result = transition(&state, &FlowEvent::GrantPermissions(set), &mut codes);

        if set.all() {
            assert_eq!(result.unwrap().screen, Screen::FitData);
        } else {
            match result {
                Err(FlowError::IncompletePermissions { missing }) => {
                    assert_eq!(missing.len(), 5 - set.granted_count());
                    assert!(missing.iter().all(|k| !set.is_granted(*k)));
                }
                other => panic!("expected refusal for {:?}, got {:?}", set, other),
            }
        }
    }
}

#[test]
fn start_pairing_draws_codes_in_range() {
    let mut controller = NavigationController::new(Box::new(RandomCodeSource::seeded(42)));
    for _ in 0..200 {
        controller.start_pairing().unwrap();
        let code = controller.pairing_code().unwrap().as_str().to_string();
        assert_eq!(code.len(), 6);
        let value: u32 = code.parse().unwrap();
        assert!((100_000..=999_999).contains(&value));
        controller.back().unwrap();
        assert!(controller.pairing_code().is_none());
    }
}

#[test]
fn exit_clears_code_and_next_pairing_draws_again() {
    let codes = vec!["482913".parse().unwrap(), "707070".parse().unwrap()];
    let mut controller = NavigationController::new(Box::new(FixedCodeSource::new(codes)));
    controller.start_pairing().unwrap();
    controller.continue_to_bridge().unwrap();
    controller.submit_code("482913").unwrap();
    controller
        .grant_permissions(PermissionSet::all_granted())
        .unwrap();
    assert_eq!(controller.screen(), Screen::FitData);

    let state = controller.exit().unwrap();
    assert_eq!(state.screen, Screen::Main);
    assert!(state.pairing_code.is_none());

    controller.start_pairing().unwrap();
    assert_eq!(controller.pairing_code().unwrap().as_str(), "707070");
}

#[test]
fn no_event_skips_ahead() {
    let forward = [
        FlowEvent::StartPairing,
        FlowEvent::ContinueToBridge,
        FlowEvent::SubmitCode("482913".to_string()),
        FlowEvent::GrantPermissions(PermissionSet::all_granted()),
        FlowEvent::Exit,
    ];
    let code: PairingCode = "482913".parse().unwrap();

    for screen in Screen::ALL {
        let state = FlowState {
            screen,
            pairing_code: (screen != Screen::Main).then(|| code.clone()),
        };
        for event in &forward {
            let mut codes = FixedCodeSource::single(code.clone());
            let Ok(next) = transition(&state, event, &mut codes) else {
                continue;
            };
            assert!(
                next.screen == screen || next.screen == screen.forward_target(),
                "{:?} on {:?} jumped to {:?}",
                event,
                screen,
                next.screen
            );
            assert_eq!(next.pairing_code.is_some(), next.screen != Screen::Main);
        }
    }
}

#[test]
fn reference_scenario() {
    let mut controller = controller_with("482913");
    assert_eq!(controller.screen(), Screen::Main);

    controller.start_pairing().unwrap();
    assert_eq!(controller.pairing_code().unwrap().as_str(), "482913");
    controller.continue_to_bridge().unwrap();
    controller.submit_code("482913").unwrap();

    let mut permissions = PermissionSet::new();
    for kind in PermissionKind::ALL {
        permissions.set(kind, true);
    }
    controller.grant_permissions(permissions).unwrap();
    assert_eq!(controller.screen(), Screen::FitData);

    controller.exit().unwrap();
    assert_eq!(controller.screen(), Screen::Main);
    assert!(controller.pairing_code().is_none());
    assert_eq!(controller.transitions(), 5);
}
