//! Character-by-character text reveal.
//!
//! A [`TextReveal`] is a schedule, not a thread: the owner asks for the
//! next deadline, and once its clock has reached it, [`TextReveal::poll`]
//! hands out exactly one step. Growth `i` (the prefix holding `i + 1`
//! characters) is due `i * interval` after the start, so the first
//! character shows up immediately. The terminal [`RevealStep::Completed`]
//! follows one interval after the last character.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealStep {
    Grow {
        /// 0-based index of the character that just became visible.
        index: usize,
        prefix: String,
        /// Raised on every even index, the hook for typing sounds.
        typing_cue: bool,
    },
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStatus {
    Running,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct TextReveal {
    text: String,
    // byte offset where the prefix of `i + 1` characters ends
    ends: Vec<usize>,
    interval: Duration,
    started_at: Duration,
    emitted: usize,
    status: RevealStatus,
}

impl TextReveal {
    pub fn start(text: &str, interval: Duration, now: Duration) -> Self {
        let ends = text
            .char_indices()
            .map(|(i, c)| i + c.len_utf8())
            .collect();
        Self {
            text: text.to_string(),
            ends,
            interval,
            started_at: now,
            emitted: 0,
            status: RevealStatus::Running,
        }
    }

    /// Rewinds to the empty prefix and runs the schedule again from `now`.
    pub fn restart(&mut self, now: Duration) {
        self.started_at = now;
        self.emitted = 0;
        self.status = RevealStatus::Running;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn started_at(&self) -> Duration {
        self.started_at
    }

    pub fn status(&self) -> RevealStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == RevealStatus::Running
    }

    pub fn char_count(&self) -> usize {
        self.ends.len()
    }

    pub fn visible_text(&self) -> &str {
        &self.text[..self.prefix_end(self.emitted)]
    }

    /// When the next step becomes due, or `None` once the reveal has
    /// completed or been cancelled.
    pub fn next_deadline(&self) -> Option<Duration> {
        if !self.is_running() {
            return None;
        }
        Some(self.started_at + self.offset(self.emitted))
    }

    /// Hands out the next step if its deadline is at or before `now`.
    /// Call repeatedly to catch up after a long frame.
    pub fn poll(&mut self, now: Duration) -> Option<RevealStep> {
        let due = self.next_deadline()?;
        if due > now {
            return None;
        }
        Some(self.step())
    }

    /// Stops without emitting anything further.
    pub fn cancel(&mut self) {
        if self.is_running() {
            self.status = RevealStatus::Cancelled;
        }
    }

    /// Jumps to the full text. Returns it when the reveal was still
    /// running; a finished or cancelled reveal yields `None`.
    pub fn complete_immediately(&mut self) -> Option<&str> {
        if !self.is_running() {
            return None;
        }
        self.emitted = self.char_count();
        self.status = RevealStatus::Completed;
        Some(&self.text)
    }

    /// The whole schedule as `(deadline, step)` pairs, produced lazily and
    /// independent of how far this reveal has progressed.
    pub fn timeline(&self) -> Timeline<'_> {
        Timeline { reveal: self, next: 0 }
    }

    fn step(&mut self) -> RevealStep {
        if self.emitted < self.char_count() {
            let index = self.emitted;
            self.emitted += 1;
            log::trace!("reveal grow {}/{}", self.emitted, self.char_count());
            self.grow_step(index)
        } else {
            self.status = RevealStatus::Completed;
            RevealStep::Completed
        }
    }

    fn grow_step(&self, index: usize) -> RevealStep {
        RevealStep::Grow {
            index,
            prefix: self.text[..self.prefix_end(index + 1)].to_string(),
            typing_cue: index % 2 == 0,
        }
    }

    fn prefix_end(&self, chars: usize) -> usize {
        match chars {
            0 => 0,
            n => self.ends[n - 1],
        }
    }

    fn offset(&self, steps: usize) -> Duration {
        self.interval.saturating_mul(u32::try_from(steps).unwrap_or(u32::MAX))
    }
}

pub struct Timeline<'a> {
    reveal: &'a TextReveal,
    next: usize,
}

impl Iterator for Timeline<'_> {
    type Item = (Duration, RevealStep);

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.reveal.char_count();
        if self.next > len {
            return None;
        }
        let at = self.reveal.started_at + self.reveal.offset(self.next);
        let step = if self.next < len {
            self.reveal.grow_step(self.next)
        } else {
            RevealStep::Completed
        };
        self.next += 1;
        Some((at, step))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.reveal.char_count() + 1).saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Timeline<'_> {}
