// src/animation/observer.rs
//
// Hooks for watching the pipe lifecycle. Injected into the scene, so
// there are no global counters.

use crate::error::FetchError;
use crate::models::PipeId;
use log::{debug, trace};
use nannou::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionReason {
    Finished,
    Collision,
}

pub trait PipeObserver {
    fn on_enqueued(&mut self, _id: PipeId) {}
    fn on_promoted(&mut self, _id: PipeId) {}
    fn on_grown(&mut self, _id: PipeId, _point: Point2) {}
    fn on_completed(&mut self, _id: PipeId, _reason: CompletionReason) {}
    fn on_reset(&mut self, _cleared: usize) {}
    fn on_fetch_failed(&mut self, _error: &FetchError) {}
}

#[derive(Debug, Default)]
pub struct NoopObserver;

impl PipeObserver for NoopObserver {}

/// Writes lifecycle events to the log.
#[derive(Debug, Default)]
pub struct LogObserver;

impl PipeObserver for LogObserver {
    fn on_enqueued(&mut self, id: PipeId) {
        debug!("{} queued", id);
    }

    fn on_promoted(&mut self, id: PipeId) {
        debug!("{} animating", id);
    }

    fn on_grown(&mut self, id: PipeId, point: Point2) {
        trace!("{} grew to ({}, {})", id, point.x, point.y);
    }

    fn on_completed(&mut self, id: PipeId, reason: CompletionReason) {
        debug!("{} done ({:?})", id, reason);
    }

    fn on_reset(&mut self, cleared: usize) {
        debug!("Reset cleared {} pipes", cleared);
    }

    fn on_fetch_failed(&mut self, error: &FetchError) {
        debug!("Fetch failed: {}", error);
    }
}

/// Tallies every event.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CountingObserver {
    pub enqueued: usize,
    pub promoted: usize,
    pub grown: usize,
    pub finished: usize,
    pub collided: usize,
    pub resets: usize,
    pub fetch_failures: usize,
}

impl PipeObserver for CountingObserver {
    fn on_enqueued(&mut self, _id: PipeId) {
        self.enqueued += 1;
    }

    fn on_promoted(&mut self, _id: PipeId) {
        self.promoted += 1;
    }

    fn on_grown(&mut self, _id: PipeId, _point: Point2) {
        self.grown += 1;
    }

    fn on_completed(&mut self, _id: PipeId, reason: CompletionReason) {
        match reason {
            CompletionReason::Finished => self.finished += 1,
            CompletionReason::Collision => self.collided += 1,
        }
    }

    fn on_reset(&mut self, _cleared: usize) {
        self.resets += 1;
    }

    fn on_fetch_failed(&mut self, _error: &FetchError) {
        self.fetch_failures += 1;
    }
}
