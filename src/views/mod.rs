// src/views/mod.rs

pub mod pipe_scene;

pub use pipe_scene::{FrameEvents, PipeScene};
