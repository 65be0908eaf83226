// src/animation/lifecycle.rs
//
// The three pipe buckets: queued, animating and done.
//
// Records are owned by exactly one bucket and moved between them, so a
// pipe can never be in two buckets at once. `queued` and `animating`
// are FIFO queues; promotion takes from the front of `queued`.

use crate::models::{PipeAnimationState, PipeId, PipeRecord};
use crate::render::RenderSurface;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BucketCounts {
    pub queued: usize,
    pub animating: usize,
    pub done: usize,
}

impl BucketCounts {
    pub fn total(&self) -> usize {
        self.queued + self.animating + self.done
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Queued,
    Animating,
    Done,
}

#[derive(Debug)]
pub struct PipeLifecycle<H> {
    queued: VecDeque<PipeRecord<H>>,
    animating: VecDeque<PipeRecord<H>>,
    done: Vec<PipeRecord<H>>,
    next_id: u64,
}

impl<H> Default for PipeLifecycle<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> PipeLifecycle<H> {
    pub fn new() -> Self {
        Self {
            queued: VecDeque::new(),
            animating: VecDeque::new(),
            done: Vec::new(),
            next_id: 0,
        }
    }

    /// Add a pipe to the back of the queue with nothing drawn yet.
    pub fn enqueue(&mut self, handle: H, mut state: PipeAnimationState) -> PipeId {
        let id = PipeId(self.next_id);
        self.next_id += 1;
        state.rewind();
        self.queued.push_back(PipeRecord { id, handle, state });
        id
    }

    /// Move pipes from the front of the queue until `limit` are animating.
    pub fn promote(&mut self, limit: usize) -> Vec<PipeId> {
        let mut promoted = Vec::new();
        while self.animating.len() < limit {
            let Some(record) = self.queued.pop_front() else {
                break;
            };
            promoted.push(record.id);
            self.animating.push_back(record);
        }
        promoted
    }

    /// Move an animating pipe to `done`. Returns false, and changes
    /// nothing, when the pipe is not animating.
    pub fn complete(&mut self, id: PipeId) -> bool {
        let Some(index) = self.animating.iter().position(|r| r.id == id) else {
            return false;
        };
        match self.animating.remove(index) {
            Some(record) => {
                self.done.push(record);
                true
            }
            None => false,
        }
    }

    /// Drop every pipe and clear the surface. Returns how many pipes went.
    pub fn reset_all<S>(&mut self, surface: &mut S) -> usize
    where
        S: RenderSurface<Handle = H>,
    {
        let cleared = self.counts().total();
        self.queued.clear();
        self.animating.clear();
        self.done.clear();
        surface.remove_all_paths();
        cleared
    }

    pub fn counts(&self) -> BucketCounts {
        BucketCounts {
            queued: self.queued.len(),
            animating: self.animating.len(),
            done: self.done.len(),
        }
    }

    pub fn bucket_of(&self, id: PipeId) -> Option<Bucket> {
        if self.queued.iter().any(|r| r.id == id) {
            Some(Bucket::Queued)
        } else if self.animating.iter().any(|r| r.id == id) {
            Some(Bucket::Animating)
        } else if self.done.iter().any(|r| r.id == id) {
            Some(Bucket::Done)
        } else {
            None
        }
    }

    pub fn queued_ids(&self) -> Vec<PipeId> {
        self.queued.iter().map(|r| r.id).collect()
    }

    pub fn animating_ids(&self) -> Vec<PipeId> {
        self.animating.iter().map(|r| r.id).collect()
    }

    pub fn done_ids(&self) -> Vec<PipeId> {
        self.done.iter().map(|r| r.id).collect()
    }

    pub fn animating_mut(&mut self, id: PipeId) -> Option<&mut PipeRecord<H>> {
        self.animating.iter_mut().find(|r| r.id == id)
    }

    pub fn get(&self, id: PipeId) -> Option<&PipeRecord<H>> {
        self.queued
            .iter()
            .chain(self.animating.iter())
            .chain(self.done.iter())
            .find(|r| r.id == id)
    }
}
