// src/controllers/resize.rs
//
// Pauses growth while the window is being resized and picks it back up
// once resizing has been quiet for the debounce time.

use crate::controllers::Playback;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceOutcome {
    Resumed,
    Settled,
}

#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    debounce: f32,
    deadline: Option<f32>,
    was_playing_before_resize: bool,
}

impl ResizeDebouncer {
    pub fn new(debounce_secs: f32) -> Self {
        Self {
            debounce: debounce_secs,
            deadline: None,
            was_playing_before_resize: false,
        }
    }

    /// Handle one resize event. Returns true if this event paused playback.
    pub fn on_resize(&mut self, now: f32, playback: &mut Playback) -> bool {
        let paused = if playback.is_playing() {
            self.was_playing_before_resize = true;
            playback.pause();
            debug!("Paused for resize");
            true
        } else {
            // mid-burst the flag must survive: playback is only stopped
            // because an earlier event in this burst stopped it
            if self.deadline.is_none() {
                self.was_playing_before_resize = false;
            }
            false
        };

        self.deadline = Some(now + self.debounce);
        paused
    }

    /// Fire the debounce timer if resizing has been quiet long enough.
    pub fn poll(&mut self, now: f32, playback: &mut Playback) -> Option<DebounceOutcome> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                if self.was_playing_before_resize && !playback.is_playing() {
                    playback.play();
                    debug!("Resumed after resize");
                    Some(DebounceOutcome::Resumed)
                } else {
                    Some(DebounceOutcome::Settled)
                }
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn was_playing_before_resize(&self) -> bool {
        self.was_playing_before_resize
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
