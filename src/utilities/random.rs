// src/utilities/random.rs
//
// random picks for new pipes

use nannou::prelude::*;
use rand::Rng;

/// Random integer in `min..=max`, returned as f32. Bounds are rounded
/// inward to whole numbers first. When no whole number fits between
/// them the result is `min.floor()`.
pub fn rand_between_int<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    let low = min.ceil() as i64;
    let high = max.floor() as i64;
    if high < low {
        return min.floor();
    }
    if high == low {
        return low as f32;
    }
    rng.gen_range(low..=high) as f32
}

/// Uniform stroke width in `min..=max` whole pixels.
pub fn stroke_width<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> f32 {
    rng.gen_range(min..=max.max(min)) as f32
}

/// A whole-pixel start point inside the canvas, picked from the area
/// scaled by `area_scale` about the canvas centre. Canvas space has its
/// origin top-left.
pub fn pipe_start_point<R: Rng + ?Sized>(rng: &mut R, canvas_size: Vec2, area_scale: f32) -> Point2 {
    let area = canvas_size * area_scale;
    let origin = (canvas_size - area) * 0.5;

    pt2(
        rand_between_int(rng, origin.x, origin.x + area.x).floor(),
        rand_between_int(rng, origin.y, origin.y + area.y).floor(),
    )
}
