mod recording;

pub use recording::{PresenterCommand, RecordingPresenter};

use crate::document::{AudioRef, ImageRef, PortraitAnimation, PortraitSlot};

/// Display side of playback, implemented by the host.
///
/// Calls are fire-and-forget: panel fades and portrait animations run on the
/// presenter's own schedule and the engine never waits for them. The audio
/// hooks and a few cosmetic extras have empty default bodies.
pub trait Presenter {
    fn show_panel(&mut self);
    fn hide_panel(&mut self);
    fn set_speaker_name(&mut self, name: &str);
    fn set_revealed_text(&mut self, text: &str);
    /// `None` hides the slot.
    fn set_portrait(&mut self, slot: PortraitSlot, image: Option<&ImageRef>, animation: PortraitAnimation);
    fn fade_out_portrait(&mut self, slot: PortraitSlot);
    fn set_background(&mut self, image: &ImageRef);
    fn set_skip_available(&mut self, available: bool);

    fn play_voice(&mut self, _voice: &AudioRef) {}
    fn play_typing_cue(&mut self, _sound: &AudioRef) {}
    fn play_background_music(&mut self, _music: &AudioRef) {}
    fn set_continue_indicator(&mut self, _visible: bool) {}
    fn set_fast_forward_available(&mut self, _available: bool) {}
    /// Asks the host to freeze (or resume) its own simulation time.
    fn set_host_paused(&mut self, _paused: bool) {}
}

/// Drops every command.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn show_panel(&mut self) {}
    fn hide_panel(&mut self) {}
    fn set_speaker_name(&mut self, _name: &str) {}
    fn set_revealed_text(&mut self, _text: &str) {}
    fn set_portrait(&mut self, _slot: PortraitSlot, _image: Option<&ImageRef>, _animation: PortraitAnimation) {}
    fn fade_out_portrait(&mut self, _slot: PortraitSlot) {}
    fn set_background(&mut self, _image: &ImageRef) {}
    fn set_skip_available(&mut self, _available: bool) {}
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn show_panel(&mut self) { (**self).show_panel() }
    fn hide_panel(&mut self) { (**self).hide_panel() }
    fn set_speaker_name(&mut self, name: &str) { (**self).set_speaker_name(name) }
    fn set_revealed_text(&mut self, text: &str) { (**self).set_revealed_text(text) }
    fn set_portrait(&mut self, slot: PortraitSlot, image: Option<&ImageRef>, animation: PortraitAnimation) {
        (**self).set_portrait(slot, image, animation)
    }
    fn fade_out_portrait(&mut self, slot: PortraitSlot) { (**self).fade_out_portrait(slot) }
    fn set_background(&mut self, image: &ImageRef) { (**self).set_background(image) }
    fn set_skip_available(&mut self, available: bool) { (**self).set_skip_available(available) }
    fn play_voice(&mut self, voice: &AudioRef) { (**self).play_voice(voice) }
    fn play_typing_cue(&mut self, sound: &AudioRef) { (**self).play_typing_cue(sound) }
    fn play_background_music(&mut self, music: &AudioRef) { (**self).play_background_music(music) }
    fn set_continue_indicator(&mut self, visible: bool) { (**self).set_continue_indicator(visible) }
    fn set_fast_forward_available(&mut self, available: bool) { (**self).set_fast_forward_available(available) }
    fn set_host_paused(&mut self, paused: bool) { (**self).set_host_paused(paused) }
}
