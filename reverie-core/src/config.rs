use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub document_path: String,
    /// Optional character roster; a missing file means no roster.
    pub roster_path:   String,
    pub log_path:      String,
    pub log_level:     String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Ask the host to freeze its simulation while dialogue is on screen.
    pub pause_host_on_dialogue: bool,
    pub play_on_start: bool,
    /// Seconds to wait before an automatic start.
    pub start_delay: f32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            document_path: "demos/prologue.json".into(),
            roster_path:   "demos/characters.json".into(),
            log_path:      "logs/".into(),
            log_level:     "info".into(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            pause_host_on_dialogue: false,
            play_on_start: true,
            start_delay: 0.5,
        }
    }
}

impl SystemConfig {
    pub fn from_global() -> Self {
        reverie_shared::config::get("system")
    }
}

impl PlaybackConfig {
    pub fn from_global() -> Self {
        reverie_shared::config::get("playback")
    }

    pub fn start_delay(&self) -> std::time::Duration {
        if !self.start_delay.is_finite() {
            return std::time::Duration::ZERO;
        }
        std::time::Duration::from_secs_f32(self.start_delay.max(0.0))
    }
}
