// src/services/prefetch.rs
//
// Interval task that keeps the queued bucket topped up, and clears the
// canvas once enough pipes have finished.

use crate::animation::{BucketCounts, PipeLifecycle, PipeObserver};
use crate::config::PipeSettings;
use crate::render::RenderSurface;
use crate::services::PipeFetcher;
use log::{info, warn};
use nannou::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefetchAction {
    Reset,
    Fetch,
    Idle,
}

#[derive(Debug, Clone)]
pub struct PrefetchController {
    interval: f32,
    next_fire: Option<f32>,
    cancelled: bool,
    max_pipes_before_clear: usize,
    pre_fetch_count: usize,
    count_in_flight: bool,
    pipe_opacity: f32,
}

impl PrefetchController {
    pub fn new(settings: &PipeSettings) -> Self {
        Self {
            interval: settings.fetch_interval_secs(),
            next_fire: None,
            cancelled: false,
            max_pipes_before_clear: settings.max_pipes_before_clear,
            pre_fetch_count: settings.pipes_pre_fetch_count,
            count_in_flight: settings.count_in_flight_fetches,
            pipe_opacity: settings.pipe_opacity,
        }
    }

    /// Reset wins over fetching. Requests still in flight only count
    /// toward the queue target when `count_in_flight_fetches` is set.
    pub fn decide(&self, counts: BucketCounts, in_flight: usize) -> PrefetchAction {
        let pending = if self.count_in_flight { in_flight } else { 0 };
        if counts.done > self.max_pipes_before_clear {
            PrefetchAction::Reset
        } else if counts.queued + pending < self.pre_fetch_count {
            PrefetchAction::Fetch
        } else {
            PrefetchAction::Idle
        }
    }

    /// True once per elapsed interval. The first call only arms the timer.
    pub fn is_due(&mut self, now: f32) -> bool {
        if self.cancelled {
            return false;
        }
        match self.next_fire {
            None => {
                self.next_fire = Some(now + self.interval);
                false
            }
            Some(next) if now >= next => {
                // fall back to a fresh interval rather than firing a backlog
                let following = next + self.interval;
                self.next_fire = Some(if following <= now {
                    now + self.interval
                } else {
                    following
                });
                true
            }
            Some(_) => false,
        }
    }

    /// Run the interval task if it is due. `None` when it is not.
    pub fn tick<S, F>(
        &mut self,
        now: f32,
        lifecycle: &mut PipeLifecycle<S::Handle>,
        surface: &mut S,
        fetcher: &mut F,
        start_point: impl FnOnce() -> Point2,
        observer: &mut dyn PipeObserver,
    ) -> Option<PrefetchAction>
    where
        S: RenderSurface,
        F: PipeFetcher + ?Sized,
    {
        if !self.is_due(now) {
            return None;
        }

        let action = self.decide(lifecycle.counts(), fetcher.in_flight());
        match action {
            PrefetchAction::Reset => {
                let cleared = lifecycle.reset_all(surface);
                info!("Cleared {} pipes", cleared);
                observer.on_reset(cleared);
            }
            PrefetchAction::Fetch => fetcher.request(start_point()),
            PrefetchAction::Idle => {}
        }
        Some(action)
    }

    /// Enqueue whatever the fetcher has finished. Failures are logged and
    /// dropped; the next due tick asks again.
    pub fn collect<S, F>(
        &mut self,
        fetcher: &mut F,
        lifecycle: &mut PipeLifecycle<S::Handle>,
        surface: &mut S,
        observer: &mut dyn PipeObserver,
    ) -> usize
    where
        S: RenderSurface,
        F: PipeFetcher + ?Sized,
    {
        let mut enqueued = 0;
        for result in fetcher.try_collect() {
            match result {
                Ok(blueprint) => {
                    let handle = surface.create_path(
                        blueprint.color,
                        blueprint.stroke_width,
                        self.pipe_opacity,
                    );
                    let id = lifecycle.enqueue(handle, blueprint.state);
                    observer.on_enqueued(id);
                    enqueued += 1;
                }
                Err(e) => {
                    warn!("Error fetching pipe: {}", e);
                    observer.on_fetch_failed(&e);
                }
            }
        }
        enqueued
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.next_fire = None;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
