// src/controllers/playback.rs

/// Whether the frame loop is growing pipes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Playback {
    is_playing: bool,
}

impl Playback {
    pub fn new(is_playing: bool) -> Self {
        Self { is_playing }
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn play(&mut self) {
        self.is_playing = true;
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    /// Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.is_playing = !self.is_playing;
        self.is_playing
    }
}
