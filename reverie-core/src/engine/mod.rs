mod history;
mod tasks;

pub use history::HistoryEntry;

use std::sync::Arc;
use std::time::Duration;
use crate::clock::{Clock, RealtimeClock};
use crate::config::PlaybackConfig;
use crate::document::{Cursor, DialogueDocument, Line};
use crate::error::PlaybackError;
use crate::event::{Listeners, PlaybackEvent, SubscriptionId};
use crate::presenter::Presenter;
use crate::reveal::{RevealStep, TextReveal};
use tasks::{Due, PendingTasks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    /// Presenting a line whose text is still being revealed.
    Revealing,
    /// Presenting a line whose text is fully shown.
    Revealed,
    Ended,
}

impl PlaybackState {
    pub fn is_presenting(self) -> bool {
        matches!(self, PlaybackState::Revealing | PlaybackState::Revealed)
    }
}

/// Walks a [`DialogueDocument`] line by line and drives a [`Presenter`].
///
/// The engine never blocks and owns no threads. Timed work (reveal ticks
/// and the auto-advance delay) is kept as deadlines on an unscaled
/// [`Clock`] and fired from [`PlaybackEngine::update`], which the host calls
/// once per frame. Every public call that changes position first cancels
/// whatever the current line still had scheduled.
pub struct PlaybackEngine<P: Presenter> {
    presenter: P,
    clock: Box<dyn Clock>,
    config: PlaybackConfig,
    document: Option<Arc<DialogueDocument>>,
    cursor: Cursor,
    state: PlaybackState,
    tasks: PendingTasks,
    listeners: Listeners,
    history: Vec<HistoryEntry>,
    host_paused: bool,
}

impl<P: Presenter> PlaybackEngine<P> {
    pub fn new(presenter: P) -> Self {
        Self::with_clock(presenter, RealtimeClock::new())
    }

    pub fn with_clock(presenter: P, clock: impl Clock + 'static) -> Self {
        Self {
            presenter,
            clock: Box::new(clock),
            config: PlaybackConfig::default(),
            document: None,
            cursor: Cursor::default(),
            state: PlaybackState::Idle,
            tasks: PendingTasks::default(),
            listeners: Listeners::default(),
            history: Vec::new(),
            host_paused: false,
        }
    }

    pub fn with_config(mut self, config: PlaybackConfig) -> Self {
        self.config = config;
        self
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&PlaybackEvent<'_>) + 'static) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Begins a new session at the first playable line. A session already
    /// in progress is abandoned without a `DialogueEnded`.
    pub fn start(&mut self, document: impl Into<Arc<DialogueDocument>>) -> Result<(), PlaybackError> {
        let document = document.into();
        let Some(first) = document.first_cursor() else {
            log::warn!("Refusing to start '{}': no playable lines", document.title);
            return Err(PlaybackError::NoContent);
        };

        self.tasks.cancel_all();
        log::info!(
            "Dialogue '{}' started: {} scenes, {} lines",
            document.title,
            document.scenes.len(),
            document.total_line_count()
        );

        self.presenter.show_panel();
        self.presenter.set_skip_available(document.allow_skip);
        self.presenter.set_fast_forward_available(document.allow_fast_forward);
        if self.config.pause_host_on_dialogue && !self.host_paused {
            self.presenter.set_host_paused(true);
            self.host_paused = true;
        }

        self.document = Some(document);
        self.cursor = first;
        self.history.clear();
        self.state = PlaybackState::Revealing;
        self.listeners.emit(&PlaybackEvent::DialogueStarted);

        let now = self.clock.now();
        self.present(now);
        Ok(())
    }

    /// The single "continue" action: finishes a running reveal, or moves
    /// to the next line when the current one is fully shown.
    pub fn advance(&mut self) {
        let now = self.clock.now();
        self.advance_at(now);
    }

    /// Ends the session at once, if the document allows skipping.
    pub fn skip(&mut self) {
        if !self.state.is_presenting() {
            return;
        }
        let allowed = self.document.as_ref().is_some_and(|d| d.allow_skip);
        if !allowed {
            log::debug!("skip ignored: document does not allow skipping");
            return;
        }
        log::info!("Dialogue skipped at {}", self.cursor);
        self.finish();
    }

    /// Ends the session from the host side. Unlike [`skip`](Self::skip)
    /// this ignores `allow_skip`; it is how a host closes dialogue it owns.
    pub fn stop(&mut self) {
        if !self.state.is_presenting() {
            return;
        }
        log::info!("Dialogue stopped by host at {}", self.cursor);
        self.finish();
    }

    pub fn go_to_scene(&mut self, scene: usize) -> Result<(), PlaybackError> {
        let target = Cursor::new(scene, 0);
        self.check_jump(target)?;
        self.tasks.cancel_all();
        self.cursor = target;
        self.listeners.emit(&PlaybackEvent::SceneChanged { scene });
        let now = self.clock.now();
        self.present(now);
        Ok(())
    }

    pub fn go_to_line(&mut self, scene: usize, line: usize) -> Result<(), PlaybackError> {
        let target = Cursor::new(scene, line);
        self.check_jump(target)?;
        self.tasks.cancel_all();
        self.cursor = target;
        let now = self.clock.now();
        self.present(now);
        Ok(())
    }

    /// Fires every reveal tick and auto-advance whose deadline has passed,
    /// oldest first. Work started by a fired task is timed from that task's
    /// deadline rather than from the current reading, so a late frame
    /// catches up exactly.
    pub fn update(&mut self) {
        let now = self.clock.now();
        while let Some(due) = self.tasks.next_due() {
            if due.at() > now {
                break;
            }
            match due {
                Due::Reveal(at) => self.tick_reveal(at),
                Due::AutoAdvance(at) => {
                    self.tasks.auto_advance = None;
                    log::debug!("auto-advance fired at {:?}", at);
                    self.advance_at(at);
                }
            }
        }
    }

    /// Clock reading at which `update` next has something to do.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.tasks.next_due().map(Due::at)
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_presenting()
    }

    pub fn is_revealing(&self) -> bool {
        self.state == PlaybackState::Revealing
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn current_scene_index(&self) -> usize {
        self.cursor.scene
    }

    pub fn current_line_index(&self) -> usize {
        self.cursor.line
    }

    pub fn document(&self) -> Option<&Arc<DialogueDocument>> {
        self.document.as_ref()
    }

    pub fn current_line(&self) -> Option<&Line> {
        self.document.as_ref()?.line(self.cursor)
    }

    /// Lines presented since the last `start`, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    fn check_jump(&self, target: Cursor) -> Result<(), PlaybackError> {
        let document = match &self.document {
            Some(d) if self.state.is_presenting() => d,
            _ => {
                log::warn!("jump to {} rejected: not playing", target);
                return Err(PlaybackError::NotPlaying);
            }
        };
        if !document.is_valid_cursor(target) {
            log::warn!("jump to {} rejected: out of range", target);
            return Err(PlaybackError::InvalidIndex { scene: target.scene, line: target.line });
        }
        Ok(())
    }

    fn advance_at(&mut self, epoch: Duration) {
        match self.state {
            PlaybackState::Idle | PlaybackState::Ended => {}
            PlaybackState::Revealing => self.complete_reveal(),
            PlaybackState::Revealed => {
                self.tasks.cancel_all();
                let next = self.document.as_ref().and_then(|d| d.successor(self.cursor));
                match next {
                    None => self.finish(),
                    Some(next) => {
                        let scene_changed = next.scene != self.cursor.scene;
                        self.cursor = next;
                        if scene_changed {
                            self.listeners.emit(&PlaybackEvent::SceneChanged { scene: next.scene });
                        }
                        self.present(epoch);
                    }
                }
            }
        }
    }

    /// Shows the line under the cursor and schedules its reveal.
    fn present(&mut self, epoch: Duration) {
        let Some(document) = self.document.clone() else {
            return;
        };
        let cursor = self.cursor;
        let Some(line) = document.line(cursor) else {
            self.finish();
            return;
        };

        self.tasks.cancel_all();
        self.state = PlaybackState::Revealing;
        log::debug!("present {} '{}'", cursor, line.speaker_name);
        self.listeners.emit(&PlaybackEvent::LineStarted { cursor, line });
        self.history.push(HistoryEntry::from_line(cursor, line));

        self.presenter.set_speaker_name(&line.speaker_name);
        self.presenter.set_portrait(line.portrait_slot, line.portrait.as_ref(), line.portrait_animation);
        if line.hide_other_portrait {
            for slot in line.portrait_slot.others() {
                self.presenter.fade_out_portrait(slot);
            }
        }
        if let Some(background) = &line.background {
            self.presenter.set_background(background);
        }
        self.presenter.set_continue_indicator(false);

        self.tasks.reveal = Some(TextReveal::start(&line.text, line.typing_interval(), epoch));
        // whatever is due at the epoch (the first character) shows now
        while self.tasks.reveal.as_ref().and_then(TextReveal::next_deadline).is_some_and(|d| d <= epoch) {
            self.tick_reveal(epoch);
        }

        if let Some(voice) = &line.voice {
            self.presenter.play_voice(voice);
        }
        if let Some(music) = &line.music {
            self.presenter.play_background_music(music);
        }
    }

    fn tick_reveal(&mut self, at: Duration) {
        let Some(document) = self.document.clone() else {
            self.tasks.reveal = None;
            return;
        };
        let Some(line) = document.line(self.cursor) else {
            self.tasks.reveal = None;
            return;
        };
        let Some(step) = self.tasks.reveal.as_mut().and_then(|r| r.poll(at)) else {
            return;
        };
        match step {
            RevealStep::Grow { prefix, typing_cue, .. } => {
                self.presenter.set_revealed_text(&prefix);
                if typing_cue {
                    if let Some(sound) = &line.typing_sound {
                        self.presenter.play_typing_cue(sound);
                    }
                }
            }
            RevealStep::Completed => {
                self.tasks.reveal = None;
                self.mark_revealed(line);
                if line.auto_advance {
                    let fire_at = at + line.auto_advance_delay();
                    log::debug!("auto-advance scheduled for {:?}", fire_at);
                    self.tasks.auto_advance = Some(fire_at);
                }
            }
        }
    }

    fn complete_reveal(&mut self) {
        let Some(document) = self.document.clone() else {
            return;
        };
        let Some(line) = document.line(self.cursor) else {
            return;
        };
        let full = self
            .tasks
            .reveal
            .as_mut()
            .and_then(|r| r.complete_immediately().map(str::to_string))
            .unwrap_or_else(|| line.text.clone());
        self.tasks.cancel_all();
        self.presenter.set_revealed_text(&full);
        self.mark_revealed(line);
    }

    fn mark_revealed(&mut self, line: &Line) {
        self.state = PlaybackState::Revealed;
        log::trace!("revealed {} ({} chars)", self.cursor, line.char_count());
        self.presenter.set_continue_indicator(true);
        self.listeners.emit(&PlaybackEvent::LineRevealCompleted { cursor: self.cursor });
    }

    fn finish(&mut self) {
        self.tasks.cancel_all();
        self.state = PlaybackState::Ended;
        self.presenter.set_continue_indicator(false);
        self.presenter.hide_panel();
        if self.host_paused {
            self.presenter.set_host_paused(false);
            self.host_paused = false;
        }
        log::info!("Dialogue ended after {} lines", self.history.len());
        self.listeners.emit(&PlaybackEvent::DialogueEnded);
    }
}

impl<P: Presenter> std::fmt::Debug for PlaybackEngine<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackEngine")
            .field("state", &self.state)
            .field("cursor", &self.cursor)
            .field("tasks", &self.tasks)
            .field("listeners", &self.listeners)
            .finish()
    }
}
