// src/animation/scheduler.rs
//
// Per-frame driver: fill the animating bucket, then grow every
// animating pipe by one point.

use crate::animation::lifecycle::PipeLifecycle;
use crate::animation::observer::{CompletionReason, PipeObserver};
use crate::models::PipeId;
use crate::render::RenderSurface;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TickReport {
    pub promoted: Vec<PipeId>,
    pub grown: usize,
    pub completed: Vec<(PipeId, CompletionReason)>,
}

#[derive(Debug, Clone)]
pub struct AnimationScheduler {
    max_concurrent: usize,
    end_on_collision: bool,
}

enum Advance {
    Grew,
    Ended(CompletionReason),
}

impl AnimationScheduler {
    pub fn new(max_concurrent: usize, end_on_collision: bool) -> Self {
        Self {
            max_concurrent,
            end_on_collision,
        }
    }

    pub fn end_on_collision(&self) -> bool {
        self.end_on_collision
    }

    pub fn set_end_on_collision(&mut self, enabled: bool) {
        self.end_on_collision = enabled;
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// One frame of growth. Pipes promoted this tick grow this tick;
    /// pipes completed this tick are not visited again.
    pub fn tick<S: RenderSurface>(
        &self,
        lifecycle: &mut PipeLifecycle<S::Handle>,
        surface: &mut S,
        observer: &mut dyn PipeObserver,
    ) -> TickReport {
        let mut report = TickReport {
            promoted: lifecycle.promote(self.max_concurrent),
            ..TickReport::default()
        };
        for id in &report.promoted {
            observer.on_promoted(*id);
        }

        for id in lifecycle.animating_ids() {
            let Some(record) = lifecycle.animating_mut(id) else {
                continue;
            };

            let outcome = match record.state.next_point() {
                None => Advance::Ended(CompletionReason::Finished),
                Some(next) if self.end_on_collision && surface.hit_test(record.handle, next) => {
                    Advance::Ended(CompletionReason::Collision)
                }
                Some(next) => {
                    surface.append_point(record.handle, next);
                    record.state.advance();
                    observer.on_grown(id, next);
                    Advance::Grew
                }
            };

            match outcome {
                Advance::Grew => report.grown += 1,
                Advance::Ended(reason) => {
                    lifecycle.complete(id);
                    observer.on_completed(id, reason);
                    report.completed.push((id, reason));
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::observer::CountingObserver;
    use crate::models::{PipeAnimationState, PipeColor};
    use crate::render::surface::testing::RecordingSurface;
    use crate::render::RenderSurface;
    use nannou::prelude::*;

    fn line(len: usize) -> PipeAnimationState {
        PipeAnimationState::new((0..len).map(|i| pt2(i as f32 * 10.0, 0.0)).collect())
    }

    fn setup(pipes: &[usize]) -> (PipeLifecycle<usize>, RecordingSurface, Vec<PipeId>) {
        let mut lifecycle = PipeLifecycle::new();
        let mut surface = RecordingSurface::default();
        let ids = pipes
            .iter()
            .map(|len| {
                let handle = surface.create_path(PipeColor::new(0, 0, 0), 1.0, 1.0);
                lifecycle.enqueue(handle, line(*len))
            })
            .collect();
        (lifecycle, surface, ids)
    }

    #[test]
    fn test_single_slot_promotes_one() {
        let (mut lifecycle, mut surface, ids) = setup(&[3, 3, 3]);
        let scheduler = AnimationScheduler::new(1, false);
        let mut observer = CountingObserver::default();

        let report = scheduler.tick(&mut lifecycle, &mut surface, &mut observer);

        assert_eq!(report.promoted, vec![ids[0]]);
        assert_eq!(lifecycle.counts().animating, 1);
        assert_eq!(lifecycle.counts().queued, 2);
        // promoted pipes grow on the same tick
        assert_eq!(surface.paths[0], vec![pt2(0.0, 0.0)]);
    }

    #[test]
    fn test_pipe_grows_one_point_per_tick_then_completes() {
        let (mut lifecycle, mut surface, ids) = setup(&[3]);
        let scheduler = AnimationScheduler::new(1, false);
        let mut observer = CountingObserver::default();

        for _ in 0..3 {
            let report = scheduler.tick(&mut lifecycle, &mut surface, &mut observer);
            assert_eq!(report.grown, 1);
        }
        assert_eq!(surface.paths[0].len(), 3);
        assert_eq!(lifecycle.counts().animating, 1);

        let report = scheduler.tick(&mut lifecycle, &mut surface, &mut observer);
        assert_eq!(report.completed, vec![(ids[0], CompletionReason::Finished)]);
        assert_eq!(lifecycle.done_ids(), vec![ids[0]]);
        assert_eq!(observer.grown, 3);
        assert_eq!(observer.finished, 1);
    }

    #[test]
    fn test_next_pipe_waits_for_a_free_slot() {
        let (mut lifecycle, mut surface, ids) = setup(&[2, 2]);
        let scheduler = AnimationScheduler::new(1, false);
        let mut observer = CountingObserver::default();

        scheduler.tick(&mut lifecycle, &mut surface, &mut observer);
        scheduler.tick(&mut lifecycle, &mut surface, &mut observer);
        // completes on the third tick, the slot is refilled on the fourth
        let report = scheduler.tick(&mut lifecycle, &mut surface, &mut observer);
        assert_eq!(report.completed.len(), 1);
        assert_eq!(lifecycle.animating_ids(), Vec::<PipeId>::new());

        let report = scheduler.tick(&mut lifecycle, &mut surface, &mut observer);
        assert_eq!(report.promoted, vec![ids[1]]);
    }

    #[test]
    fn test_empty_path_completes_without_drawing() {
        let (mut lifecycle, mut surface, ids) = setup(&[1, 0]);
        let scheduler = AnimationScheduler::new(2, false);
        let mut observer = CountingObserver::default();

        let report = scheduler.tick(&mut lifecycle, &mut surface, &mut observer);

        assert_eq!(report.grown, 0);
        assert_eq!(report.completed.len(), 2);
        assert_eq!(lifecycle.done_ids(), ids);
        assert!(surface.paths.iter().all(|p| p.is_empty()));
    }

    #[test]
    fn test_collision_ends_pipe_without_drawing_the_hit() {
        let (mut lifecycle, mut surface, ids) = setup(&[5]);
        surface.block(pt2(20.0, 0.0));
        let scheduler = AnimationScheduler::new(1, true);
        let mut observer = CountingObserver::default();

        for _ in 0..3 {
            scheduler.tick(&mut lifecycle, &mut surface, &mut observer);
        }

        assert_eq!(surface.paths[0], vec![pt2(0.0, 0.0), pt2(10.0, 0.0)]);
        assert_eq!(lifecycle.bucket_of(ids[0]), Some(crate::animation::Bucket::Done));
        assert_eq!(observer.collided, 1);
        assert_eq!(
            lifecycle.get(ids[0]).unwrap().state.animated_points().len(),
            2
        );
    }

    #[test]
    fn test_collisions_ignored_when_disabled() {
        let (mut lifecycle, mut surface, _) = setup(&[3]);
        surface.block(pt2(10.0, 0.0));
        let scheduler = AnimationScheduler::new(1, false);
        let mut observer = CountingObserver::default();

        for _ in 0..3 {
            scheduler.tick(&mut lifecycle, &mut surface, &mut observer);
        }
        assert_eq!(surface.paths[0].len(), 3);
        assert_eq!(observer.collided, 0);
    }

    #[test]
    fn test_concurrent_pipes_grow_side_by_side() {
        let (mut lifecycle, mut surface, _) = setup(&[4, 4, 4]);
        let scheduler = AnimationScheduler::new(2, false);
        let mut observer = CountingObserver::default();

        let report = scheduler.tick(&mut lifecycle, &mut surface, &mut observer);
        assert_eq!(report.grown, 2);
        assert_eq!(surface.paths[2].len(), 0);
    }
}
