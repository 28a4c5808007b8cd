use crate::document::{AudioRef, ImageRef, PortraitAnimation, PortraitSlot};
use crate::presenter::Presenter;

/// One call received by a [`RecordingPresenter`].
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterCommand {
    ShowPanel,
    HidePanel,
    SpeakerName(String),
    RevealedText(String),
    Portrait { slot: PortraitSlot, image: Option<ImageRef>, animation: PortraitAnimation },
    FadeOutPortrait(PortraitSlot),
    Background(ImageRef),
    SkipAvailable(bool),
    Voice(AudioRef),
    TypingCue(AudioRef),
    BackgroundMusic(AudioRef),
    ContinueIndicator(bool),
    FastForwardAvailable(bool),
    HostPaused(bool),
}

/// Keeps every command in arrival order.
#[derive(Debug, Default, Clone)]
pub struct RecordingPresenter {
    pub commands: Vec<PresenterCommand>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<PresenterCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Most recent text pushed into the text box.
    pub fn last_text(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|c| match c {
            PresenterCommand::RevealedText(t) => Some(t.as_str()),
            _ => None,
        })
    }

    pub fn count(&self, pred: impl Fn(&PresenterCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl Presenter for RecordingPresenter {
    fn show_panel(&mut self) {
        self.commands.push(PresenterCommand::ShowPanel);
    }

    fn hide_panel(&mut self) {
        self.commands.push(PresenterCommand::HidePanel);
    }

    fn set_speaker_name(&mut self, name: &str) {
        self.commands.push(PresenterCommand::SpeakerName(name.to_string()));
    }

    fn set_revealed_text(&mut self, text: &str) {
        self.commands.push(PresenterCommand::RevealedText(text.to_string()));
    }

    fn set_portrait(&mut self, slot: PortraitSlot, image: Option<&ImageRef>, animation: PortraitAnimation) {
        self.commands.push(PresenterCommand::Portrait { slot, image: image.cloned(), animation });
    }

    fn fade_out_portrait(&mut self, slot: PortraitSlot) {
        self.commands.push(PresenterCommand::FadeOutPortrait(slot));
    }

    fn set_background(&mut self, image: &ImageRef) {
        self.commands.push(PresenterCommand::Background(image.clone()));
    }

    fn set_skip_available(&mut self, available: bool) {
        self.commands.push(PresenterCommand::SkipAvailable(available));
    }

    fn play_voice(&mut self, voice: &AudioRef) {
        self.commands.push(PresenterCommand::Voice(voice.clone()));
    }

    fn play_typing_cue(&mut self, sound: &AudioRef) {
        self.commands.push(PresenterCommand::TypingCue(sound.clone()));
    }

    fn play_background_music(&mut self, music: &AudioRef) {
        self.commands.push(PresenterCommand::BackgroundMusic(music.clone()));
    }

    fn set_continue_indicator(&mut self, visible: bool) {
        self.commands.push(PresenterCommand::ContinueIndicator(visible));
    }

    fn set_fast_forward_available(&mut self, available: bool) {
        self.commands.push(PresenterCommand::FastForwardAvailable(available));
    }

    fn set_host_paused(&mut self, paused: bool) {
        self.commands.push(PresenterCommand::HostPaused(paused));
    }
}
