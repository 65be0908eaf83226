pub mod osc;
pub mod playback;
pub mod resize;

pub use osc::OscController;
pub use playback::Playback;
pub use resize::{DebounceOutcome, ResizeDebouncer};

/// User and remote actions the scene responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeCommand {
    Play,
    Pause,
    TogglePlaying,
    Clear,
    SetCollision(bool),
    ToggleCollision,
}
