use thiserror::Error;

/// Rejections from the playback engine. A rejected call never touches the
/// cursor or the playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("document has no playable lines")]
    NoContent,
    #[error("no line at scene {scene}, line {line}")]
    InvalidIndex { scene: usize, line: usize },
    #[error("dialogue is not playing")]
    NotPlaying,
}
