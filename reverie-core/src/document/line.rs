use std::fmt;
use std::time::Duration;
use serde::{Deserialize, Deserializer, Serialize};

pub const MIN_TYPING_INTERVAL: f32 = 0.01;
pub const MAX_TYPING_INTERVAL: f32 = 0.2;
pub const DEFAULT_TYPING_INTERVAL: f32 = 0.05;
pub const MIN_AUTO_ADVANCE_DELAY: f32 = 0.0;
pub const MAX_AUTO_ADVANCE_DELAY: f32 = 5.0;
pub const DEFAULT_AUTO_ADVANCE_DELAY: f32 = 2.0;

/// Opaque handle to a picture (portrait or background). The host decides
/// what the string means.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

/// Opaque handle to a sound (voice, typing cue or music).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioRef(pub String);

impl ImageRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AudioRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for AudioRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PortraitSlot {
    #[default]
    Left,
    Right,
    Center,
}

impl PortraitSlot {
    pub const ALL: [PortraitSlot; 3] = [PortraitSlot::Left, PortraitSlot::Right, PortraitSlot::Center];

    /// The two slots that are not `self`, in declaration order.
    pub fn others(self) -> impl Iterator<Item = PortraitSlot> {
        Self::ALL.into_iter().filter(move |s| *s != self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PortraitAnimation {
    #[default]
    None,
    FadeIn,
    FadeOut,
    Shake,
    Bounce,
}

/// One unit of dialogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Line {
    pub speaker_name: String,
    pub portrait: Option<ImageRef>,
    pub portrait_slot: PortraitSlot,
    pub portrait_animation: PortraitAnimation,
    pub text: String,
    #[serde(deserialize_with = "typing_interval_in_range")]
    pub typing_interval: f32,
    pub voice: Option<AudioRef>,
    pub typing_sound: Option<AudioRef>,
    pub auto_advance: bool,
    #[serde(deserialize_with = "auto_advance_delay_in_range")]
    pub auto_advance_delay: f32,
    pub hide_other_portrait: bool,
    /// `None` keeps whatever background is on screen.
    pub background: Option<ImageRef>,
    /// `None` keeps the current music.
    pub music: Option<AudioRef>,
}

impl Default for Line {
    fn default() -> Self {
        Self {
            speaker_name: String::new(),
            portrait: None,
            portrait_slot: PortraitSlot::Left,
            portrait_animation: PortraitAnimation::None,
            text: String::new(),
            typing_interval: DEFAULT_TYPING_INTERVAL,
            voice: None,
            typing_sound: None,
            auto_advance: false,
            auto_advance_delay: DEFAULT_AUTO_ADVANCE_DELAY,
            hide_other_portrait: false,
            background: None,
            music: None,
        }
    }
}

impl Line {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker_name: speaker.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_portrait(mut self, image: ImageRef, slot: PortraitSlot, animation: PortraitAnimation) -> Self {
        self.portrait = Some(image);
        self.portrait_slot = slot;
        self.portrait_animation = animation;
        self
    }

    pub fn with_typing_interval(mut self, seconds: f32) -> Self {
        self.typing_interval = clamp_typing_interval(seconds);
        self
    }

    pub fn with_auto_advance(mut self, delay: f32) -> Self {
        self.auto_advance = true;
        self.auto_advance_delay = clamp_auto_advance_delay(delay);
        self
    }

    pub fn with_voice(mut self, voice: AudioRef) -> Self {
        self.voice = Some(voice);
        self
    }

    pub fn with_typing_sound(mut self, sound: AudioRef) -> Self {
        self.typing_sound = Some(sound);
        self
    }

    pub fn with_background(mut self, image: ImageRef) -> Self {
        self.background = Some(image);
        self
    }

    pub fn with_music(mut self, music: AudioRef) -> Self {
        self.music = Some(music);
        self
    }

    pub fn hiding_other_portraits(mut self) -> Self {
        self.hide_other_portrait = true;
        self
    }

    /// Per-character reveal interval, always within `[0.01, 0.2]` seconds
    /// even if the public field was edited by hand.
    pub fn typing_interval(&self) -> Duration {
        Duration::from_secs_f32(clamp_typing_interval(self.typing_interval))
    }

    /// Auto-advance delay, always within `[0, 5]` seconds.
    pub fn auto_advance_delay(&self) -> Duration {
        Duration::from_secs_f32(clamp_auto_advance_delay(self.auto_advance_delay))
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

pub fn clamp_typing_interval(seconds: f32) -> f32 {
    if seconds.is_nan() {
        return DEFAULT_TYPING_INTERVAL;
    }
    seconds.clamp(MIN_TYPING_INTERVAL, MAX_TYPING_INTERVAL)
}

pub fn clamp_auto_advance_delay(seconds: f32) -> f32 {
    if seconds.is_nan() {
        return DEFAULT_AUTO_ADVANCE_DELAY;
    }
    seconds.clamp(MIN_AUTO_ADVANCE_DELAY, MAX_AUTO_ADVANCE_DELAY)
}

fn typing_interval_in_range<'de, D: Deserializer<'de>>(d: D) -> Result<f32, D::Error> {
    f32::deserialize(d).map(clamp_typing_interval)
}

fn auto_advance_delay_in_range<'de, D: Deserializer<'de>>(d: D) -> Result<f32, D::Error> {
    f32::deserialize(d).map(clamp_auto_advance_delay)
}

pub(super) fn default_typing_speed_in_range<'de, D: Deserializer<'de>>(d: D) -> Result<f32, D::Error> {
    typing_interval_in_range(d)
}
