// src/render/mod.rs
// The pipe rendering module

pub mod pause_overlay;
pub mod pipe_canvas;
pub mod surface;

pub use pause_overlay::PauseOverlay;
pub use pipe_canvas::{PathHandle, PipeCanvas, PipePath};
pub use surface::RenderSurface;
