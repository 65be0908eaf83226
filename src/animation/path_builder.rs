// src/animation/path_builder.rs
//
// Turns raw direction steps into the point sequence a pipe grows along.
//
// The builder is plain `Copy` data and the output is owned, so a build
// can run on a worker thread and be sent back over a channel.

use crate::config::PipeSettings;
use crate::models::DirectionStep;
use crate::utilities::limiter;
use nannou::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionPathBuilder {
    pub segment_distance: f32,
    pub pipe_min_length: f32,
    pub pipe_max_length: f32,
}

impl DirectionPathBuilder {
    pub fn new(settings: &PipeSettings) -> Self {
        Self {
            segment_distance: settings.segment_distance,
            pipe_min_length: settings.pipe_min_length,
            pipe_max_length: settings.pipe_max_length,
        }
    }

    /// Clamp a raw distance into the pipe length range and round it down
    /// to whole segments.
    pub fn limit_distance(&self, raw_distance: f32) -> f32 {
        limiter(
            raw_distance,
            self.pipe_min_length,
            self.pipe_max_length,
            self.segment_distance,
        )
    }

    /// Every planned point, beginning with `start`. Consecutive points lie
    /// on one axis, `segment_distance` apart.
    pub fn build(&self, start: Point2, steps: &[DirectionStep]) -> Vec<Point2> {
        let mut points = vec![start];
        let mut prev = start;

        for step in filter_backtracking(steps) {
            let distance = self.limit_distance(step.raw_distance);
            let segments = (distance / self.segment_distance).round() as usize;
            if segments == 0 {
                continue;
            }

            let unit = step.direction.unit();
            for i in 1..segments {
                points.push(prev + unit * self.segment_distance * i as f32);
            }

            let end = prev + unit * distance;
            points.push(end);
            prev = end;
        }

        points
    }
}

/// Drop every step that reverses the last kept step. The first step is
/// always kept.
pub fn filter_backtracking(steps: &[DirectionStep]) -> Vec<DirectionStep> {
    let mut kept: Vec<DirectionStep> = Vec::with_capacity(steps.len());

    for step in steps {
        match kept.last() {
            Some(prev) if step.direction.is_reverse_of(prev.direction) => continue,
            _ => kept.push(*step),
        }
    }

    kept
}
