pub mod limiter;
pub mod random;

pub use limiter::{limiter, round_to_multiple};
