#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use reverie_core::config::PlaybackConfig;
use reverie_core::presenter::RecordingPresenter;
use reverie_core::{DialogueDocument, EventKind, Line, ManualClock, PlaybackEngine, Scene};

pub struct Harness {
    pub engine: PlaybackEngine<RecordingPresenter>,
    pub clock: ManualClock,
    pub events: Rc<RefCell<Vec<EventKind>>>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(PlaybackConfig::default())
    }

    pub fn with_config(config: PlaybackConfig) -> Self {
        let clock = ManualClock::new();
        let mut engine = PlaybackEngine::with_clock(RecordingPresenter::new(), clock.clone())
            .with_config(config);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        engine.subscribe(move |e| sink.borrow_mut().push(e.kind()));
        Self { engine, clock, events }
    }

    pub fn take_events(&self) -> Vec<EventKind> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn tick(&mut self, by: Duration) {
        self.clock.advance(by);
        self.engine.update();
    }
}

/// `scenes` x `lines` document with texts like "s0l1".
pub fn grid_document(scenes: usize, lines: usize) -> DialogueDocument {
    let mut doc = DialogueDocument::new("grid");
    for s in 0..scenes {
        let scene = Scene::new(format!("scene {s}"))
            .with_lines((0..lines).map(|l| Line::new("Narrator", format!("s{s}l{l}"))));
        doc = doc.with_scene(scene);
    }
    doc
}

pub fn interval() -> Duration {
    Line::default().typing_interval()
}
