pub mod direction;
pub mod pipe;

pub use direction::{Direction, DirectionStep};
pub use pipe::{PipeAnimationState, PipeColor, PipeId, PipeRecord};
