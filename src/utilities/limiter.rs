// src/utilities/limiter.rs

/// Round down to a multiple, e.g. `round_to_multiple(42.0, 5.0)` is `40.0`.
pub fn round_to_multiple(value: f32, multiple: f32) -> f32 {
    value - (value % multiple)
}

/// Clamp `value` into `floor..=ceiling`, then round it down to a multiple
/// of `multiple`. NaN is treated as below the floor.
///
/// The result stays in range only when both bounds are multiples of
/// `multiple`; `PipeSettings::validate` rejects pipe lengths that are not.
pub fn limiter(value: f32, floor: f32, ceiling: f32, multiple: f32) -> f32 {
    let clamped = if value.is_nan() || value < floor {
        floor
    } else if value > ceiling {
        ceiling
    } else {
        value
    };
    round_to_multiple(clamped, multiple)
}
