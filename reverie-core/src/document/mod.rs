mod line;

pub use line::{
    AudioRef, ImageRef, Line, PortraitAnimation, PortraitSlot,
    clamp_auto_advance_delay, clamp_typing_interval,
    DEFAULT_AUTO_ADVANCE_DELAY, DEFAULT_TYPING_INTERVAL,
    MAX_AUTO_ADVANCE_DELAY, MAX_TYPING_INTERVAL, MIN_AUTO_ADVANCE_DELAY, MIN_TYPING_INTERVAL,
};

use std::fmt;
use serde::{Deserialize, Serialize};

/// Position of a line inside a document: `scenes[scene].lines[line]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Cursor {
    pub scene: usize,
    pub line: usize,
}

impl Cursor {
    pub const fn new(scene: usize, line: usize) -> Self {
        Self { scene, line }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scene, self.line)
    }
}

/// An ordered group of lines, one beat of the narrative.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub name: String,
    pub description: String,
    pub lines: Vec<Line>,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_line(mut self, line: Line) -> Self {
        self.lines.push(line);
        self
    }

    pub fn with_lines(mut self, lines: impl IntoIterator<Item = Line>) -> Self {
        self.lines.extend(lines);
        self
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// The full declarative data for one playback session.
///
/// Playback never mutates a document; engines share it behind an `Arc` and
/// keep their own cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueDocument {
    pub title: String,
    pub description: String,
    pub scenes: Vec<Scene>,
    pub allow_skip: bool,
    /// Forwarded to the presenter; playback itself ignores it.
    pub allow_fast_forward: bool,
    /// Seconds per character for lines made through [`DialogueDocument::new_line`].
    /// Loaded lines without an interval keep the line default.
    #[serde(deserialize_with = "line::default_typing_speed_in_range")]
    pub default_typing_speed: f32,
}

impl Default for DialogueDocument {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            scenes: Vec::new(),
            allow_skip: true,
            allow_fast_forward: true,
            default_typing_speed: DEFAULT_TYPING_INTERVAL,
        }
    }
}

impl DialogueDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Default::default() }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.scenes.push(scene);
        self
    }

    pub fn with_skip(mut self, allow: bool) -> Self {
        self.allow_skip = allow;
        self
    }

    pub fn with_fast_forward(mut self, allow: bool) -> Self {
        self.allow_fast_forward = allow;
        self
    }

    /// A blank line carrying this document's default typing speed, the
    /// starting point for anything an authoring tool adds.
    pub fn new_line(&self, speaker: impl Into<String>, text: impl Into<String>) -> Line {
        Line::new(speaker, text).with_typing_interval(self.default_typing_speed)
    }

    pub fn total_line_count(&self) -> usize {
        self.scenes.iter().map(Scene::len).sum()
    }

    pub fn has_content(&self) -> bool {
        self.scenes.iter().any(|s| !s.is_empty())
    }

    pub fn scene(&self, index: usize) -> Option<&Scene> {
        self.scenes.get(index)
    }

    pub fn line(&self, cursor: Cursor) -> Option<&Line> {
        self.scenes.get(cursor.scene)?.lines.get(cursor.line)
    }

    pub fn is_valid_cursor(&self, cursor: Cursor) -> bool {
        self.line(cursor).is_some()
    }

    /// First line of the first scene that has any.
    pub fn first_cursor(&self) -> Option<Cursor> {
        self.first_cursor_from(0)
    }

    /// The line played after `cursor` in sequential order. Scenes without
    /// lines are stepped over.
    pub fn successor(&self, cursor: Cursor) -> Option<Cursor> {
        let scene = self.scenes.get(cursor.scene)?;
        if cursor.line + 1 < scene.len() {
            return Some(Cursor::new(cursor.scene, cursor.line + 1));
        }
        self.first_cursor_from(cursor.scene + 1)
    }

    fn first_cursor_from(&self, scene: usize) -> Option<Cursor> {
        self.scenes
            .iter()
            .enumerate()
            .skip(scene)
            .find(|(_, s)| !s.is_empty())
            .map(|(i, _)| Cursor::new(i, 0))
    }

    /// Pulls every timing value back into its allowed range. Loading does
    /// this already; hand-built documents may call it explicitly.
    pub fn normalize(&mut self) {
        self.default_typing_speed = clamp_typing_interval(self.default_typing_speed);
        for line in self.scenes.iter_mut().flat_map(|s| s.lines.iter_mut()) {
            line.typing_interval = clamp_typing_interval(line.typing_interval);
            line.auto_advance_delay = clamp_auto_advance_delay(line.auto_advance_delay);
        }
    }
}
