use std::fmt::Arguments;
use std::io::{self, Stdout, Write};
use reverie_core::document::{AudioRef, ImageRef, PortraitAnimation, PortraitSlot};
use reverie_core::{CharacterRoster, Presenter};

/// Plain-text presenter: the text box is the current terminal line,
/// everything else is printed as a bracketed cue.
pub struct TerminalPresenter<W: Write> {
    out: W,
    roster: CharacterRoster,
    speaker: String,
    shown: usize,
    broken: bool,
}

impl TerminalPresenter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            roster: CharacterRoster::default(),
            speaker: String::new(),
            shown: 0,
            broken: false,
        }
    }

    /// Speakers found in `roster` get their name colour.
    pub fn with_roster(mut self, roster: CharacterRoster) -> Self {
        self.roster = roster;
        self
    }

    /// Whether a write has failed since construction.
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    fn emit(&mut self, args: Arguments<'_>) {
        let result = self.out.write_fmt(args).and_then(|_| self.out.flush());
        if let Err(e) = result {
            // one warning is enough, a closed terminal fails every write
            if !self.broken {
                log::warn!("Terminal output failed: {}", e);
            }
            self.broken = true;
        }
    }

    fn cue(&mut self, text: Arguments<'_>) {
        self.break_line();
        self.emit(format_args!("[{}]\n", text));
    }

    // ends a partially revealed line before printing anything else
    fn break_line(&mut self) {
        if self.shown > 0 {
            self.emit(format_args!("\n"));
            self.shown = 0;
        }
    }

    fn speaker_label(&self) -> String {
        match self.roster.get(&self.speaker).and_then(|c| c.name_rgb()) {
            Some((r, g, b)) => format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, self.speaker),
            None => self.speaker.clone(),
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn show_panel(&mut self) {
        self.cue(format_args!("dialogue opens"));
    }

    fn hide_panel(&mut self) {
        self.cue(format_args!("dialogue closes"));
    }

    fn set_speaker_name(&mut self, name: &str) {
        self.break_line();
        self.speaker = name.to_string();
    }

    fn set_revealed_text(&mut self, text: &str) {
        if self.shown == 0 && !self.speaker.is_empty() {
            let label = self.speaker_label();
            self.emit(format_args!("{}: ", label));
        }
        // the text only ever grows within a line, so print the new tail
        let total = text.chars().count();
        if total > self.shown {
            let tail: String = text.chars().skip(self.shown).collect();
            self.emit(format_args!("{}", tail));
            self.shown = total;
        }
    }

    fn set_portrait(&mut self, slot: PortraitSlot, image: Option<&ImageRef>, animation: PortraitAnimation) {
        match image {
            Some(image) if animation != PortraitAnimation::None => {
                self.cue(format_args!("{:?}: {} ({:?})", slot, image, animation))
            }
            Some(image) => self.cue(format_args!("{:?}: {}", slot, image)),
            None => {}
        }
    }

    fn fade_out_portrait(&mut self, slot: PortraitSlot) {
        log::trace!("fade out {:?}", slot);
    }

    fn set_background(&mut self, image: &ImageRef) {
        self.cue(format_args!("background: {}", image));
    }

    fn set_skip_available(&mut self, available: bool) {
        if available {
            self.cue(format_args!("type 'skip' to skip"));
        }
    }

    fn play_voice(&mut self, voice: &AudioRef) {
        log::debug!("voice {}", voice);
    }

    fn play_background_music(&mut self, music: &AudioRef) {
        self.cue(format_args!("music: {}", music));
    }

    fn set_continue_indicator(&mut self, visible: bool) {
        if visible && self.shown > 0 {
            self.emit(format_args!(" ▼\n"));
            self.shown = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reverie_core::CharacterProfile;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn output(presenter: TerminalPresenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.out).unwrap()
    }

    #[test]
    fn prints_growing_text_once() {
        let mut p = TerminalPresenter::new(Vec::new());
        p.set_speaker_name("Mira");
        p.set_revealed_text("H");
        p.set_revealed_text("Hi");
        p.set_revealed_text("Hi!");
        p.set_continue_indicator(true);
        p.set_background(&ImageRef::new("shore"));
        assert!(!p.is_broken());
        assert_eq!(output(p), "Mira: Hi! ▼\n[background: shore]\n");
    }

    #[test]
    fn colours_known_speakers() {
        let roster = CharacterRoster::new()
            .with_character(CharacterProfile::new("Mira").with_name_color("#FF8000"));
        let mut p = TerminalPresenter::new(Vec::new()).with_roster(roster);
        p.set_speaker_name("Mira");
        p.set_revealed_text("a");
        assert_eq!(output(p), "\x1b[38;2;255;128;0mMira\x1b[0m: a");
    }

    #[test]
    fn write_failures_are_recorded() {
        let mut p = TerminalPresenter::new(ClosedPipe);
        p.show_panel();
        p.set_revealed_text("still going");
        assert!(p.is_broken());
    }
}
