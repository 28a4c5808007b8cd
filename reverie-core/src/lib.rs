pub mod character;
pub mod clock;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod event;
pub mod input;
pub mod loader;
pub mod presenter;
pub mod reveal;

pub use character::{CharacterProfile, CharacterRoster, Expression};
pub use clock::{Clock, ManualClock, RealtimeClock};
pub use document::{Cursor, DialogueDocument, Line, Scene};
pub use engine::{PlaybackEngine, PlaybackState};
pub use error::PlaybackError;
pub use event::{EventKind, PlaybackEvent};
pub use input::InputDispatcher;
pub use presenter::Presenter;
pub use reveal::TextReveal;
