// src/config/config_types.rs
//
// Config types for the app

use crate::error::{PipesError, PipesResult};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub autoplay: bool,
}

fn default_title() -> String {
    "pipevis".to_string()
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Http,
    Local,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub direction_url: String,
    pub color_url: String,
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OscConfig {
    pub enabled: bool,
    pub rx_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StyleConfig {
    pub background: String, // hex, "#rrggbb"
    pub pause_backdrop_opacity: f32,
}

/************************* Pipe engine settings ********************/

/// Everything the pipe engine needs for one session. Lengths and
/// widths are in canvas pixels, times in milliseconds.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PipeSettings {
    // Physical appearance of the pipes
    pub segment_distance: f32,
    pub pipe_min_length: f32,
    pub pipe_max_length: f32,
    pub pipe_min_width: u32,
    pub pipe_max_width: u32,
    pub pipe_end_points_count: usize,
    pub pipe_opacity: f32,

    // Pipes in the done bucket before a full reset
    pub max_pipes_before_clear: usize,
    // Target size of the queued bucket
    pub pipes_pre_fetch_count: usize,
    pub pipes_fetch_frequency_ms: u64,
    pub max_concurrent_pipe_animation: usize,
    // Playback stays paused until resizing has been quiet this long
    pub resize_animation_debounce_time_ms: u64,

    #[serde(default)]
    pub end_animation_on_collision: bool,
    // Count fetches still in flight toward pipes_pre_fetch_count
    #[serde(default)]
    pub count_in_flight_fetches: bool,
    // Fraction of the view, about its centre, that start points are picked from
    #[serde(default = "default_start_area_scale")]
    pub start_area_scale: f32,
}

fn default_start_area_scale() -> f32 {
    0.8
}

impl PipeSettings {
    /// The values the classic screensaver shipped with.
    pub fn classic() -> Self {
        Self {
            segment_distance: 10.0,
            pipe_min_length: 20.0,
            pipe_max_length: 40.0,
            pipe_min_width: 1,
            pipe_max_width: 10,
            pipe_end_points_count: 100,
            pipe_opacity: 1.0,
            max_pipes_before_clear: 75,
            pipes_pre_fetch_count: 3,
            pipes_fetch_frequency_ms: 1000,
            max_concurrent_pipe_animation: 1,
            resize_animation_debounce_time_ms: 500,
            end_animation_on_collision: false,
            count_in_flight_fetches: false,
            start_area_scale: default_start_area_scale(),
        }
    }

    pub fn validate(&self) -> PipesResult<()> {
        if !(self.segment_distance > 0.0) {
            return Err(PipesError::config("segment_distance must be positive"));
        }
        if self.pipe_min_length < 0.0 || self.pipe_min_length > self.pipe_max_length {
            return Err(PipesError::config(
                "pipe_min_length must be within 0..=pipe_max_length",
            ));
        }
        for (name, length) in [
            ("pipe_min_length", self.pipe_min_length),
            ("pipe_max_length", self.pipe_max_length),
        ] {
            if !is_multiple_of(length, self.segment_distance) {
                return Err(PipesError::config(format!(
                    "{} must be a multiple of segment_distance",
                    name
                )));
            }
        }
        if self.pipe_min_width > self.pipe_max_width {
            return Err(PipesError::config(
                "pipe_min_width must not exceed pipe_max_width",
            ));
        }
        if !(0.0..=1.0).contains(&self.pipe_opacity) {
            return Err(PipesError::config("pipe_opacity must be within 0.0..=1.0"));
        }
        if self.max_concurrent_pipe_animation == 0 {
            return Err(PipesError::config(
                "max_concurrent_pipe_animation must be at least 1",
            ));
        }
        if self.pipes_fetch_frequency_ms == 0 {
            return Err(PipesError::config("pipes_fetch_frequency_ms must be positive"));
        }
        if !(self.start_area_scale > 0.0 && self.start_area_scale <= 1.0) {
            return Err(PipesError::config("start_area_scale must be within (0.0, 1.0]"));
        }
        Ok(())
    }

    pub fn fetch_interval_secs(&self) -> f32 {
        self.pipes_fetch_frequency_ms as f32 / 1000.0
    }

    pub fn resize_debounce_secs(&self) -> f32 {
        self.resize_animation_debounce_time_ms as f32 / 1000.0
    }
}

// lengths come from toml floats, so allow for rounding noise
fn is_multiple_of(value: f32, unit: f32) -> bool {
    let rest = (value % unit).abs();
    rest < 1e-3 || (unit - rest).abs() < 1e-3
}
