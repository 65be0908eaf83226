pub mod lifecycle;
pub mod observer;
pub mod path_builder;
pub mod scheduler;

pub use lifecycle::{Bucket, BucketCounts, PipeLifecycle};
pub use observer::{CompletionReason, CountingObserver, LogObserver, NoopObserver, PipeObserver};
pub use path_builder::{filter_backtracking, DirectionPathBuilder};
pub use scheduler::{AnimationScheduler, TickReport};
