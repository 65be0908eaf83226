// src/services/fetch_worker.rs
//
// Fetches pipe data and builds its geometry off the frame loop.
// Results travel back over a channel and are only picked up when the
// scene collects them at the start of a frame.

use crate::animation::DirectionPathBuilder;
use crate::config::PipeSettings;
use crate::error::FetchError;
use crate::models::{DirectionStep, PipeAnimationState, PipeColor};
use crate::services::{ColorSource, DirectionSource};
use crate::utilities::random::stroke_width;
use log::debug;
use nannou::prelude::*;
use rand::thread_rng;
use std::collections::VecDeque;
use std::sync::{
    mpsc::{channel, Receiver, Sender, TryRecvError},
    Arc,
};

pub type FetchResult = Result<PipeBlueprint, FetchError>;

/// Everything needed to put a new pipe on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeBlueprint {
    pub state: PipeAnimationState,
    pub color: PipeColor,
    pub stroke_width: f32,
}

/// Sources plus the settings that turn their output into a blueprint.
#[derive(Clone)]
pub struct BlueprintRecipe {
    directions: Arc<dyn DirectionSource>,
    colors: Arc<dyn ColorSource>,
    builder: DirectionPathBuilder,
    end_points: usize,
    min_width: u32,
    max_width: u32,
}

impl BlueprintRecipe {
    pub fn new(
        settings: &PipeSettings,
        directions: Arc<dyn DirectionSource>,
        colors: Arc<dyn ColorSource>,
    ) -> Self {
        Self {
            directions,
            colors,
            builder: DirectionPathBuilder::new(settings),
            end_points: settings.pipe_end_points_count,
            min_width: settings.pipe_min_width,
            max_width: settings.pipe_max_width,
        }
    }

    /// Both requests run at the same time on the rayon pool.
    pub fn fetch_concurrent(&self, start: Point2) -> FetchResult {
        let (steps, colors) = rayon::join(
            || self.directions.fetch_directions(self.end_points),
            || self.colors.fetch_colors(1),
        );
        self.assemble(start, steps, colors)
    }

    pub fn fetch_sequential(&self, start: Point2) -> FetchResult {
        let steps = self.directions.fetch_directions(self.end_points);
        let colors = self.colors.fetch_colors(1);
        self.assemble(start, steps, colors)
    }

    fn assemble(
        &self,
        start: Point2,
        steps: Result<Vec<DirectionStep>, FetchError>,
        colors: Result<Vec<PipeColor>, FetchError>,
    ) -> FetchResult {
        let steps = steps?;
        let color = colors?
            .first()
            .copied()
            .ok_or(FetchError::Empty("color"))?;

        Ok(PipeBlueprint {
            state: PipeAnimationState::new(self.builder.build(start, &steps)),
            color,
            stroke_width: stroke_width(&mut thread_rng(), self.min_width, self.max_width),
        })
    }
}

/// Issues fetches and hands back their results at tick boundaries.
pub trait PipeFetcher {
    fn request(&mut self, start: Point2);
    /// Results that arrived since the last call, in arrival order.
    fn try_collect(&mut self) -> Vec<FetchResult>;
    /// Requests issued but not yet collected.
    fn in_flight(&self) -> usize;
    /// Forget every outstanding request.
    fn cancel(&mut self);
}

/// Runs each fetch as a rayon task.
pub struct FetchWorker {
    recipe: Arc<BlueprintRecipe>,
    sender: Sender<FetchResult>,
    receiver: Receiver<FetchResult>,
    in_flight: usize,
}

impl FetchWorker {
    pub fn new(recipe: BlueprintRecipe) -> Self {
        let (sender, receiver) = channel();
        Self {
            recipe: Arc::new(recipe),
            sender,
            receiver,
            in_flight: 0,
        }
    }
}

impl PipeFetcher for FetchWorker {
    fn request(&mut self, start: Point2) {
        let recipe = self.recipe.clone();
        let sender = self.sender.clone();
        self.in_flight += 1;

        rayon::spawn(move || {
            let result = recipe.fetch_concurrent(start);
            if sender.send(result).is_err() {
                debug!("Fetch finished after the worker was cancelled");
            }
        });
    }

    fn try_collect(&mut self) -> Vec<FetchResult> {
        let mut results = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(result) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    results.push(result);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    results.push(Err(FetchError::WorkerGone));
                    break;
                }
            }
        }
        results
    }

    fn in_flight(&self) -> usize {
        self.in_flight
    }

    fn cancel(&mut self) {
        // tasks still running keep the old sender; their sends now fail
        let (sender, receiver) = channel();
        self.sender = sender;
        self.receiver = receiver;
        self.in_flight = 0;
    }
}

/// Fetches on the calling thread. Results still wait for `try_collect`.
pub struct InlineFetcher {
    recipe: BlueprintRecipe,
    ready: VecDeque<FetchResult>,
}

impl InlineFetcher {
    pub fn new(recipe: BlueprintRecipe) -> Self {
        Self {
            recipe,
            ready: VecDeque::new(),
        }
    }
}

impl PipeFetcher for InlineFetcher {
    fn request(&mut self, start: Point2) {
        self.ready.push_back(self.recipe.fetch_sequential(start));
    }

    fn try_collect(&mut self) -> Vec<FetchResult> {
        self.ready.drain(..).collect()
    }

    fn in_flight(&self) -> usize {
        self.ready.len()
    }

    fn cancel(&mut self) {
        self.ready.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Direction;
    use crate::services::PaletteColorSource;
    use std::time::{Duration, Instant};

    struct FixedDirections(Vec<DirectionStep>);

    impl DirectionSource for FixedDirections {
        fn fetch_directions(&self, _count: usize) -> Result<Vec<DirectionStep>, FetchError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenDirections;

    impl DirectionSource for BrokenDirections {
        fn fetch_directions(&self, _count: usize) -> Result<Vec<DirectionStep>, FetchError> {
            Err(FetchError::Status(503))
        }
    }

    fn recipe(directions: Arc<dyn DirectionSource>) -> BlueprintRecipe {
        let red = PipeColor::new(255, 0, 0);
        BlueprintRecipe::new(
            &PipeSettings::classic(),
            directions,
            Arc::new(PaletteColorSource::new(vec![red])),
        )
    }

    fn right_twice() -> Arc<dyn DirectionSource> {
        Arc::new(FixedDirections(vec![
            DirectionStep::new(Direction::Right, 15.0),
            DirectionStep::new(Direction::Right, 15.0),
        ]))
    }

    #[test]
    fn test_recipe_builds_blueprint() {
        let blueprint = recipe(right_twice()).fetch_sequential(pt2(0.0, 0.0)).unwrap();

        assert_eq!(blueprint.state.all_points().len(), 5);
        assert!(blueprint.state.animated_points().is_empty());
        assert_eq!(blueprint.color, PipeColor::new(255, 0, 0));
        assert!((1.0..=10.0).contains(&blueprint.stroke_width));
    }

    #[test]
    fn test_recipe_surfaces_source_errors() {
        let result = recipe(Arc::new(BrokenDirections)).fetch_concurrent(pt2(0.0, 0.0));
        assert_eq!(result, Err(FetchError::Status(503)));
    }

    #[test]
    fn test_inline_fetcher_holds_results_until_collected() {
        let mut fetcher = InlineFetcher::new(recipe(right_twice()));
        fetcher.request(pt2(0.0, 0.0));
        fetcher.request(pt2(5.0, 5.0));
        assert_eq!(fetcher.in_flight(), 2);

        let results = fetcher.try_collect();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].as_ref().unwrap().state.all_points()[0], pt2(5.0, 5.0));
        assert_eq!(fetcher.in_flight(), 0);
    }

    #[test]
    fn test_worker_delivers_over_channel() {
        let mut worker = FetchWorker::new(recipe(right_twice()));
        worker.request(pt2(0.0, 0.0));
        assert_eq!(worker.in_flight(), 1);

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut results = Vec::new();
        while results.is_empty() && Instant::now() < deadline {
            results = worker.try_collect();
            std::thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(results.len(), 1);
        assert!(results[0].is_ok());
        assert_eq!(worker.in_flight(), 0);
    }

    #[test]
    fn test_worker_cancel_drops_outstanding() {
        let mut worker = FetchWorker::new(recipe(right_twice()));
        worker.request(pt2(0.0, 0.0));
        worker.cancel();
        assert_eq!(worker.in_flight(), 0);

        std::thread::sleep(Duration::from_millis(50));
        assert!(worker.try_collect().is_empty());
    }
}
