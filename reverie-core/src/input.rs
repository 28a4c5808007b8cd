//! Host input to engine commands.
//!
//! The host forwards discrete presses; nothing here polls device state.
//! The engine's `advance` and `skip` are no-ops outside a session, so
//! presses need no debouncing.

use serde::{Deserialize, Serialize};
use crate::engine::PlaybackEngine;
use crate::presenter::Presenter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Space,
    Return,
    Escape,
    Tab,
    Backspace,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// A single press reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostInput {
    Key(Key),
    Pointer(PointerButton),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Confirm,
    Cancel,
}

/// Which presses mean "continue" and which mean "skip". Loaded from the
/// `[input]` config section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputBindings {
    pub confirm: Vec<HostInput>,
    pub cancel: Vec<HostInput>,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            confirm: vec![
                HostInput::Pointer(PointerButton::Primary),
                HostInput::Key(Key::Space),
                HostInput::Key(Key::Return),
            ],
            cancel: vec![HostInput::Key(Key::Escape)],
        }
    }
}

impl InputBindings {
    pub fn from_global() -> Self {
        reverie_shared::config::get("input")
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputDispatcher {
    bindings: InputBindings,
}

impl InputDispatcher {
    pub fn new(bindings: InputBindings) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &InputBindings {
        &self.bindings
    }

    pub fn action_for(&self, input: HostInput) -> Option<InputAction> {
        if self.bindings.confirm.contains(&input) {
            Some(InputAction::Confirm)
        } else if self.bindings.cancel.contains(&input) {
            Some(InputAction::Cancel)
        } else {
            None
        }
    }

    /// Translates `input` and applies it. Returns the action taken, if the
    /// press was bound at all.
    pub fn dispatch<P: Presenter>(&self, engine: &mut PlaybackEngine<P>, input: HostInput) -> Option<InputAction> {
        let action = self.action_for(input)?;
        log::trace!("input {:?} -> {:?}", input, action);
        apply(engine, action);
        Some(action)
    }
}

pub fn apply<P: Presenter>(engine: &mut PlaybackEngine<P>, action: InputAction) {
    match action {
        InputAction::Confirm => engine.advance(),
        InputAction::Cancel => engine.skip(),
    }
}
