use crate::document::{Cursor, Line};

/// A line as it was presented, kept for the backlog view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub cursor: Cursor,
    pub speaker: String,
    pub text: String,
}

impl HistoryEntry {
    pub(crate) fn from_line(cursor: Cursor, line: &Line) -> Self {
        Self {
            cursor,
            speaker: line.speaker_name.clone(),
            text: line.text.clone(),
        }
    }
}
