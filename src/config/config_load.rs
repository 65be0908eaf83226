// src/config/config_load.rs
//
// loading to config.toml

use crate::config::config_types::{OscConfig, PipeSettings, SourceConfig, StyleConfig, WindowConfig};
use crate::error::{PipesError, PipesResult};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub window: WindowConfig,
    pub pipes: PipeSettings,
    pub sources: SourceConfig,
    pub osc: OscConfig,
    pub style: StyleConfig,
}

impl Config {
    pub fn load() -> PipesResult<Self> {
        // First try to load from the executable's directory
        if let Some(exe_config) = Self::load_from_exe_dir()? {
            return Ok(exe_config);
        }

        // Fallback to loading from the current working directory
        Self::load_from_path("config.toml")
    }

    fn load_from_exe_dir() -> PipesResult<Option<Self>> {
        let Some(config_path) = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|dir| dir.join("config.toml")))
        else {
            return Ok(None);
        };

        if config_path.exists() {
            Self::load_from_path(&config_path).map(Some)
        } else {
            debug!("No config next to executable at {}", config_path.display());
            Ok(None)
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> PipesResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Parse and validate a config document.
    pub fn from_toml_str(content: &str) -> PipesResult<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PipesResult<()> {
        self.pipes.validate()?;
        if !(0.0..=1.0).contains(&self.style.pause_backdrop_opacity) {
            return Err(PipesError::config(
                "pause_backdrop_opacity must be within 0.0..=1.0",
            ));
        }
        Ok(())
    }
}
