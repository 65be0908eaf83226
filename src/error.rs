// src/error.rs
//
// Error types shared across the crate

pub type PipesResult<T> = Result<T, PipesError>;

/// Startup and configuration failures. Nothing in the running engine
/// produces one of these.
#[derive(thiserror::Error, Debug)]
pub enum PipesError {
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("source error: {0}")]
    Source(String),

    #[error("osc error: {0}")]
    Osc(String),
}

impl PipesError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// A failed request to the direction or color source.
/// Always recovered by the prefetch controller.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    Payload(String),

    #[error("empty {0} list")]
    Empty(&'static str),

    #[error("fetch worker disconnected")]
    WorkerGone,
}
