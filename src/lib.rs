// src/lib.rs
//
// pipevis: right-angled pipes that grow across the window a segment per
// frame and get cleared once too many have finished.

pub mod animation;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod render;
pub mod services;
pub mod utilities;
pub mod views;

pub use error::{FetchError, PipesError, PipesResult};
