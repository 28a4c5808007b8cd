mod common;

use common::{grid_document, Harness};
use reverie_core::input::{HostInput, InputAction, InputBindings, InputDispatcher, Key, PointerButton};
use reverie_core::PlaybackState;
use reverie_shared::config::ConfigStore;

#[test]
fn default_bindings() {
    let dispatcher = InputDispatcher::default();
    assert_eq!(dispatcher.action_for(HostInput::Key(Key::Space)), Some(InputAction::Confirm));
    assert_eq!(dispatcher.action_for(HostInput::Key(Key::Return)), Some(InputAction::Confirm));
    assert_eq!(dispatcher.action_for(HostInput::Pointer(PointerButton::Primary)), Some(InputAction::Confirm));
    assert_eq!(dispatcher.action_for(HostInput::Key(Key::Escape)), Some(InputAction::Cancel));
    assert_eq!(dispatcher.action_for(HostInput::Key(Key::Tab)), None);
}

#[test]
fn confirm_advances_and_cancel_skips() {
    let dispatcher = InputDispatcher::default();
    let mut h = Harness::new();
    h.engine.start(grid_document(1, 2)).unwrap();

    dispatcher.dispatch(&mut h.engine, HostInput::Key(Key::Space));
    assert_eq!(h.engine.state(), PlaybackState::Revealed);
    dispatcher.dispatch(&mut h.engine, HostInput::Pointer(PointerButton::Primary));
    assert_eq!(h.engine.current_line_index(), 1);

    assert_eq!(dispatcher.dispatch(&mut h.engine, HostInput::Key(Key::Char('z'))), None);
    assert!(h.engine.is_revealing());

    assert_eq!(
        dispatcher.dispatch(&mut h.engine, HostInput::Key(Key::Escape)),
        Some(InputAction::Cancel)
    );
    assert_eq!(h.engine.state(), PlaybackState::Ended);
}

#[test]
fn presses_outside_a_session_do_nothing() {
    let dispatcher = InputDispatcher::default();
    let mut h = Harness::new();
    dispatcher.dispatch(&mut h.engine, HostInput::Key(Key::Return));
    dispatcher.dispatch(&mut h.engine, HostInput::Key(Key::Escape));
    assert_eq!(h.engine.state(), PlaybackState::Idle);
    assert!(h.take_events().is_empty());
}

#[test]
fn bindings_from_config_section() {
    let store = ConfigStore::parse(
        r#"
[input]
confirm = [{ key = "tab" }, { key = { char = "n" } }]
cancel = [{ pointer = "secondary" }]
"#,
    );
    let bindings: InputBindings = store.get("input");
    let dispatcher = InputDispatcher::new(bindings);
    assert_eq!(dispatcher.action_for(HostInput::Key(Key::Tab)), Some(InputAction::Confirm));
    assert_eq!(dispatcher.action_for(HostInput::Key(Key::Char('n'))), Some(InputAction::Confirm));
    assert_eq!(dispatcher.action_for(HostInput::Pointer(PointerButton::Secondary)), Some(InputAction::Cancel));
    assert_eq!(dispatcher.action_for(HostInput::Key(Key::Space)), None);
}
