// src/render/pipe_canvas.rs
//
// The nannou render surface. Holds every pipe's stroke in canvas space
// (origin top-left, y down) and maps it into nannou space when drawn.

use crate::models::PipeColor;
use crate::render::RenderSurface;
use log::warn;
use nannou::prelude::*;

/// Handles from before a `remove_all_paths` no longer resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathHandle {
    generation: u32,
    index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipePath {
    pub color: PipeColor,
    pub stroke_width: f32,
    pub opacity: f32,
    pub points: Vec<Point2>,
}

impl PipePath {
    fn touches(&self, point: Point2, skip_tip: bool) -> bool {
        let reach = self.stroke_width * 0.5;
        let segments = self.points.windows(2).count();
        // the segment ending at the tip is always adjacent to the next point
        let checked = if skip_tip {
            segments.saturating_sub(1)
        } else {
            segments
        };

        let hit_segment = self
            .points
            .windows(2)
            .take(checked)
            .any(|pair| distance_to_segment(point, pair[0], pair[1]) <= reach);

        hit_segment || (!skip_tip && self.points.len() == 1 && self.points[0].distance(point) <= reach)
    }
}

#[derive(Debug, Default)]
pub struct PipeCanvas {
    paths: Vec<PipePath>,
    generation: u32,
}

impl PipeCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> &[PipePath] {
        &self.paths
    }

    pub fn path(&self, handle: PathHandle) -> Option<&PipePath> {
        if handle.generation != self.generation {
            return None;
        }
        self.paths.get(handle.index)
    }

    /// Canvas space to nannou space for a window `rect`.
    pub fn to_nannou(point: Point2, rect: Rect) -> Point2 {
        pt2(rect.left() + point.x, rect.top() - point.y)
    }

    pub fn draw(&self, draw: &Draw, rect: Rect) {
        for path in &self.paths {
            if path.points.len() < 2 {
                continue;
            }

            let color = rgba(
                path.color.red as f32 / 255.0,
                path.color.green as f32 / 255.0,
                path.color.blue as f32 / 255.0,
                path.opacity,
            );

            draw.polyline()
                .weight(path.stroke_width)
                .join_round()
                .points(path.points.iter().map(|p| Self::to_nannou(*p, rect)))
                .color(color);
        }
    }
}

impl RenderSurface for PipeCanvas {
    type Handle = PathHandle;

    fn create_path(&mut self, color: PipeColor, stroke_width: f32, opacity: f32) -> PathHandle {
        self.paths.push(PipePath {
            color,
            stroke_width,
            opacity,
            points: Vec::new(),
        });
        PathHandle {
            generation: self.generation,
            index: self.paths.len() - 1,
        }
    }

    fn append_point(&mut self, handle: PathHandle, point: Point2) {
        if handle.generation != self.generation {
            warn!("Dropping point for a path removed by a reset: {:?}", handle);
            return;
        }
        match self.paths.get_mut(handle.index) {
            Some(path) => path.points.push(point),
            None => warn!("Unknown path handle {:?}", handle),
        }
    }

    fn remove_all_paths(&mut self) {
        self.paths.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    fn hit_test(&self, handle: PathHandle, point: Point2) -> bool {
        let own = (handle.generation == self.generation).then_some(handle.index);

        self.paths
            .iter()
            .enumerate()
            .any(|(index, path)| path.touches(point, Some(index) == own))
    }
}

/// Shortest distance from `p` to the segment `a`..`b`.
pub fn distance_to_segment(p: Point2, a: Point2, b: Point2) -> f32 {
    let ab = b - a;
    let length_squared = ab.length_squared();
    if length_squared == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / length_squared).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas_with(points: &[Point2], width: f32) -> (PipeCanvas, PathHandle) {
        let mut canvas = PipeCanvas::new();
        let handle = canvas.create_path(PipeColor::new(10, 20, 30), width, 1.0);
        for p in points {
            canvas.append_point(handle, *p);
        }
        (canvas, handle)
    }

    #[test]
    fn test_distance_to_segment() {
        let a = pt2(0.0, 0.0);
        let b = pt2(10.0, 0.0);
        assert_eq!(distance_to_segment(pt2(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_segment(pt2(13.0, 4.0), a, b), 5.0);
        assert_eq!(distance_to_segment(pt2(3.0, 4.0), a, a), 5.0);
    }

    #[test]
    fn test_to_nannou_flips_y() {
        let rect = Rect::from_w_h(200.0, 100.0);
        assert_eq!(PipeCanvas::to_nannou(pt2(0.0, 0.0), rect), pt2(-100.0, 50.0));
        assert_eq!(PipeCanvas::to_nannou(pt2(200.0, 100.0), rect), pt2(100.0, -50.0));
    }

    #[test]
    fn test_hit_test_against_other_paths() {
        let (mut canvas, _) = canvas_with(&[pt2(0.0, 50.0), pt2(100.0, 50.0)], 4.0);
        let other = canvas.create_path(PipeColor::new(0, 0, 0), 4.0, 1.0);

        assert!(canvas.hit_test(other, pt2(50.0, 51.0)));
        assert!(!canvas.hit_test(other, pt2(50.0, 60.0)));
    }

    #[test]
    fn test_hit_test_against_own_path_skips_the_tip() {
        let points = [
            pt2(0.0, 0.0),
            pt2(10.0, 0.0),
            pt2(20.0, 0.0),
            pt2(20.0, 10.0),
            pt2(10.0, 10.0),
        ];
        let (canvas, handle) = canvas_with(&points, 10.0);

        // continuing along from the tip is not a collision
        assert!(!canvas.hit_test(handle, pt2(0.0, 10.0)));
        // turning back up onto the first segment is
        assert!(canvas.hit_test(handle, pt2(10.0, 0.0)));
    }

    #[test]
    fn test_reset_invalidates_handles() {
        let (mut canvas, handle) = canvas_with(&[pt2(0.0, 0.0), pt2(10.0, 0.0)], 2.0);
        canvas.remove_all_paths();

        assert!(canvas.paths().is_empty());
        assert!(canvas.path(handle).is_none());

        canvas.append_point(handle, pt2(1.0, 1.0));
        assert!(canvas.paths().is_empty());

        let fresh = canvas.create_path(PipeColor::new(0, 0, 0), 1.0, 1.0);
        assert_ne!(fresh, handle);
    }
}
