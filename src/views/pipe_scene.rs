// src/views/pipe_scene.rs
//
// PipeScene owns the whole pipe engine: buckets, scheduler, prefetch
// timer, resize debouncer and playback state. The app calls `update`
// once per frame and forwards resize and user events; every bucket
// mutation happens inside those calls, on the app thread.

use crate::animation::{
    AnimationScheduler, BucketCounts, PipeLifecycle, PipeObserver, TickReport,
};
use crate::config::PipeSettings;
use crate::controllers::{DebounceOutcome, PipeCommand, Playback, ResizeDebouncer};
use crate::render::RenderSurface;
use crate::services::{PipeFetcher, PrefetchAction, PrefetchController};
use crate::utilities::random::pipe_start_point;
use log::info;
use nannou::prelude::*;
use rand::rngs::ThreadRng;

/// What happened during one `update`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameEvents {
    pub enqueued: usize,
    pub prefetch: Option<PrefetchAction>,
    pub debounce: Option<DebounceOutcome>,
    pub tick: Option<TickReport>,
}

pub struct PipeScene<S: RenderSurface, F: PipeFetcher> {
    settings: PipeSettings,
    surface: S,
    fetcher: F,
    lifecycle: PipeLifecycle<S::Handle>,
    scheduler: AnimationScheduler,
    prefetch: PrefetchController,
    debouncer: ResizeDebouncer,
    playback: Playback,
    observer: Box<dyn PipeObserver>,
    canvas_size: Vec2,
    random: ThreadRng,
    shut_down: bool,
}

impl<S: RenderSurface, F: PipeFetcher> PipeScene<S, F> {
    pub fn new(
        settings: PipeSettings,
        surface: S,
        fetcher: F,
        observer: Box<dyn PipeObserver>,
        canvas_size: Vec2,
    ) -> Self {
        Self {
            scheduler: AnimationScheduler::new(
                settings.max_concurrent_pipe_animation,
                settings.end_animation_on_collision,
            ),
            prefetch: PrefetchController::new(&settings),
            debouncer: ResizeDebouncer::new(settings.resize_debounce_secs()),
            settings,
            surface,
            fetcher,
            lifecycle: PipeLifecycle::new(),
            playback: Playback::default(),
            observer,
            canvas_size,
            random: rand::thread_rng(),
            shut_down: false,
        }
    }

    /// One pass of the cooperative loop: land finished fetches, fire due
    /// timers, then grow pipes if playing.
    pub fn update(&mut self, now: f32) -> FrameEvents {
        let mut events = FrameEvents::default();
        if self.shut_down {
            return events;
        }

        events.enqueued = self.prefetch.collect(
            &mut self.fetcher,
            &mut self.lifecycle,
            &mut self.surface,
            self.observer.as_mut(),
        );

        events.debounce = self.debouncer.poll(now, &mut self.playback);

        let canvas_size = self.canvas_size;
        let area_scale = self.settings.start_area_scale;
        let random = &mut self.random;
        events.prefetch = self.prefetch.tick(
            now,
            &mut self.lifecycle,
            &mut self.surface,
            &mut self.fetcher,
            || pipe_start_point(random, canvas_size, area_scale),
            self.observer.as_mut(),
        );

        if self.playback.is_playing() {
            events.tick = Some(self.scheduler.tick(
                &mut self.lifecycle,
                &mut self.surface,
                self.observer.as_mut(),
            ));
        }

        events
    }

    /// The window changed size. Pauses growth until resizing settles.
    pub fn on_resize(&mut self, now: f32, canvas_size: Vec2) -> bool {
        self.canvas_size = canvas_size;
        if self.shut_down {
            return false;
        }
        self.debouncer.on_resize(now, &mut self.playback)
    }

    pub fn apply(&mut self, command: PipeCommand) {
        match command {
            PipeCommand::Play => self.playback.play(),
            PipeCommand::Pause => self.playback.pause(),
            PipeCommand::TogglePlaying => {
                self.playback.toggle();
            }
            PipeCommand::Clear => self.clear(),
            PipeCommand::SetCollision(enabled) => self.scheduler.set_end_on_collision(enabled),
            PipeCommand::ToggleCollision => {
                let enabled = !self.scheduler.end_on_collision();
                self.scheduler.set_end_on_collision(enabled);
            }
        }
        info!(
            "{:?}: playing {}, end on collision {}",
            command,
            self.playback.is_playing(),
            self.scheduler.end_on_collision()
        );
    }

    pub fn clear(&mut self) {
        let cleared = self.lifecycle.reset_all(&mut self.surface);
        self.observer.on_reset(cleared);
    }

    /// Stop both timers and forget outstanding fetches.
    pub fn shutdown(&mut self) {
        self.prefetch.cancel();
        self.debouncer.cancel();
        self.fetcher.cancel();
        self.playback.pause();
        self.shut_down = true;
        info!("Pipe scene shut down");
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn end_on_collision(&self) -> bool {
        self.scheduler.end_on_collision()
    }

    pub fn counts(&self) -> BucketCounts {
        self.lifecycle.counts()
    }

    pub fn lifecycle(&self) -> &PipeLifecycle<S::Handle> {
        &self.lifecycle
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn settings(&self) -> &PipeSettings {
        &self.settings
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    pub fn resize_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
