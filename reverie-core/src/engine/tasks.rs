use std::time::Duration;
use crate::reveal::TextReveal;

/// The two kinds of scheduled work a line can have outstanding. Each slot
/// holds at most one task, so scheduling replaces and never stacks.
#[derive(Debug, Default)]
pub(crate) struct PendingTasks {
    pub reveal: Option<TextReveal>,
    pub auto_advance: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Due {
    Reveal(Duration),
    AutoAdvance(Duration),
}

impl Due {
    pub fn at(self) -> Duration {
        match self {
            Due::Reveal(at) | Due::AutoAdvance(at) => at,
        }
    }
}

impl PendingTasks {
    pub fn cancel_all(&mut self) {
        if let Some(mut reveal) = self.reveal.take() {
            reveal.cancel();
        }
        self.auto_advance = None;
    }

    /// Earliest deadline among the outstanding tasks; a reveal tick wins a
    /// tie.
    pub fn next_due(&self) -> Option<Due> {
        let reveal = self.reveal.as_ref().and_then(TextReveal::next_deadline).map(Due::Reveal);
        let auto = self.auto_advance.map(Due::AutoAdvance);
        match (reveal, auto) {
            (Some(r), Some(a)) if a.at() < r.at() => Some(a),
            (Some(r), _) => Some(r),
            (None, a) => a,
        }
    }
}
