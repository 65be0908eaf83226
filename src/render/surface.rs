// src/render/surface.rs
//
// What the pipe engine needs from whatever draws the pipes

use crate::models::PipeColor;
use nannou::prelude::*;
use std::fmt::Debug;

/// Drawing capabilities the engine drives. Points are in canvas space,
/// origin top-left with y growing downward.
pub trait RenderSurface {
    type Handle: Copy + Eq + Debug;

    fn create_path(&mut self, color: PipeColor, stroke_width: f32, opacity: f32) -> Self::Handle;
    fn append_point(&mut self, handle: Self::Handle, point: Point2);
    fn remove_all_paths(&mut self);
    /// True when `point` touches geometry already on the surface.
    fn hit_test(&self, handle: Self::Handle, point: Point2) -> bool;
}
