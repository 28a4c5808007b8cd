use crate::document::{Cursor, Line};

/// Lifecycle notifications, delivered synchronously in transition order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackEvent<'a> {
    DialogueStarted,
    LineStarted { cursor: Cursor, line: &'a Line },
    LineRevealCompleted { cursor: Cursor },
    SceneChanged { scene: usize },
    DialogueEnded,
}

impl PlaybackEvent<'_> {
    pub fn kind(&self) -> EventKind {
        match self {
            PlaybackEvent::DialogueStarted => EventKind::DialogueStarted,
            PlaybackEvent::LineStarted { cursor, .. } => EventKind::LineStarted(*cursor),
            PlaybackEvent::LineRevealCompleted { cursor } => EventKind::LineRevealCompleted(*cursor),
            PlaybackEvent::SceneChanged { scene } => EventKind::SceneChanged(*scene),
            PlaybackEvent::DialogueEnded => EventKind::DialogueEnded,
        }
    }
}

/// Owned, borrow-free summary of a [`PlaybackEvent`], handy for logs and
/// for collecting events out of a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    DialogueStarted,
    LineStarted(Cursor),
    LineRevealCompleted(Cursor),
    SceneChanged(usize),
    DialogueEnded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&PlaybackEvent<'_>)>;

/// Observer list owned by one engine.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    pub fn subscribe(&mut self, listener: impl FnMut(&PlaybackEvent<'_>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(i, _)| *i != id);
        self.entries.len() != before
    }

    /// Calls every listener in subscription order.
    pub fn emit(&mut self, event: &PlaybackEvent<'_>) {
        log::debug!("event {:?}", event.kind());
        if self.is_empty() {
            return;
        }
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners").field("len", &self.len()).finish()
    }
}
