// src/models/pipe.rs
//
// The pipe data model: growth state plus the records the lifecycle
// buckets hold

use nannou::prelude::*;
use std::fmt;

/// Stroke color of a pipe, as handed out by the color source.
pub type PipeColor = nannou::color::Rgb8;

/// Identity of a pipe, unique for the lifetime of a `PipeLifecycle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PipeId(pub u64);

impl fmt::Display for PipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pipe#{}", self.0)
    }
}

/// The planned growth path of a pipe and how much of it is drawn.
/// `animated_points` is always a prefix of `all_points`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipeAnimationState {
    all_points: Vec<Point2>,
    animated_points: Vec<Point2>,
}

impl PipeAnimationState {
    pub fn new(all_points: Vec<Point2>) -> Self {
        Self {
            all_points,
            animated_points: Vec::new(),
        }
    }

    pub fn all_points(&self) -> &[Point2] {
        &self.all_points
    }

    pub fn animated_points(&self) -> &[Point2] {
        &self.animated_points
    }

    /// A path of one point or less has no segment to grow.
    pub fn is_empty_path(&self) -> bool {
        self.all_points.len() <= 1
    }

    pub fn is_complete(&self) -> bool {
        self.is_empty_path() || self.animated_points.len() == self.all_points.len()
    }

    pub fn next_point(&self) -> Option<Point2> {
        if self.is_empty_path() {
            return None;
        }
        self.all_points.get(self.animated_points.len()).copied()
    }

    /// Mark the next planned point as drawn.
    pub fn advance(&mut self) -> Option<Point2> {
        let next = self.next_point()?;
        self.animated_points.push(next);
        Some(next)
    }

    pub fn rewind(&mut self) {
        self.animated_points.clear();
    }
}

/// A live pipe: identity, its geometry on the render surface, and its state.
#[derive(Debug, Clone)]
pub struct PipeRecord<H> {
    pub id: PipeId,
    pub handle: H,
    pub state: PipeAnimationState,
}
