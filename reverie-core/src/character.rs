//! Character roster: who can speak, how their name is drawn and which
//! portraits and sounds they bring along.

use serde::{Deserialize, Serialize};
use crate::document::{AudioRef, DialogueDocument, ImageRef};

pub const DEFAULT_NAME_COLOR: &str = "#FFFFFF";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Expression {
    pub name: String,
    pub image: Option<ImageRef>,
}

impl Expression {
    pub fn new(name: impl Into<String>, image: ImageRef) -> Self {
        Self { name: name.into(), image: Some(image) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterProfile {
    pub name: String,
    pub description: String,
    /// `#RRGGBB`.
    pub name_color: String,
    pub default_portrait: Option<ImageRef>,
    pub expressions: Vec<Expression>,
    pub default_voice: Option<AudioRef>,
    pub default_typing_sound: Option<AudioRef>,
}

impl Default for CharacterProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            name_color: DEFAULT_NAME_COLOR.into(),
            default_portrait: None,
            expressions: Vec::new(),
            default_voice: None,
            default_typing_sound: None,
        }
    }
}

impl CharacterProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn with_default_portrait(mut self, image: ImageRef) -> Self {
        self.default_portrait = Some(image);
        self
    }

    pub fn with_expression(mut self, expression: Expression) -> Self {
        self.expressions.push(expression);
        self
    }

    pub fn with_typing_sound(mut self, sound: AudioRef) -> Self {
        self.default_typing_sound = Some(sound);
        self
    }

    pub fn with_name_color(mut self, color: impl Into<String>) -> Self {
        self.name_color = color.into();
        self
    }

    /// Portrait for the named expression. An empty or unknown name falls
    /// back to the default portrait; so does a known expression that was
    /// stored without an image.
    pub fn expression(&self, name: &str) -> Option<&ImageRef> {
        if name.is_empty() {
            return self.default_portrait.as_ref();
        }
        self.expressions
            .iter()
            .find(|e| e.name == name)
            .and_then(|e| e.image.as_ref())
            .or(self.default_portrait.as_ref())
    }

    /// `name_color` as RGB, or `None` when it is not a `#RRGGBB` string.
    pub fn name_rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.name_color.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some((channel(0)?, channel(2)?, channel(4)?))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterRoster {
    pub characters: Vec<CharacterProfile>,
}

impl CharacterRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_character(mut self, character: CharacterProfile) -> Self {
        self.characters.push(character);
        self
    }

    pub fn get(&self, name: &str) -> Option<&CharacterProfile> {
        self.characters.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Gives every line spoken by a known character that character's
    /// typing sound, unless the line names its own. Returns how many lines
    /// were filled in.
    pub fn apply_defaults(&self, document: &mut DialogueDocument) -> usize {
        let mut filled = 0;
        for line in document.scenes.iter_mut().flat_map(|s| s.lines.iter_mut()) {
            if line.typing_sound.is_some() {
                continue;
            }
            let sound = self.get(&line.speaker_name).and_then(|c| c.default_typing_sound.clone());
            if sound.is_some() {
                line.typing_sound = sound;
                filled += 1;
            }
        }
        log::debug!("roster filled typing sounds on {} lines", filled);
        filled
    }
}
