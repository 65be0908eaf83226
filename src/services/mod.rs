pub mod color_source;
pub mod direction_source;
pub mod fetch_worker;
pub mod prefetch;

pub use color_source::{ColorSource, HttpColorSource, PaletteColorSource};
pub use direction_source::{DirectionSource, HttpDirectionSource, RandomDirectionSource};
pub use fetch_worker::{BlueprintRecipe, FetchWorker, InlineFetcher, PipeBlueprint, PipeFetcher};
pub use prefetch::{PrefetchAction, PrefetchController};

use crate::config::{PipeSettings, SourceConfig, SourceKind};
use crate::error::{FetchError, PipesError, PipesResult};
use log::info;
use reqwest::blocking::Client;
use std::sync::Arc;
use std::time::Duration;

/// Build the direction and color sources named in the config.
pub fn build_sources(
    config: &SourceConfig,
    settings: &PipeSettings,
) -> PipesResult<(Arc<dyn DirectionSource>, Arc<dyn ColorSource>)> {
    match config.kind {
        SourceKind::Local => {
            info!("Using local direction and color sources");
            Ok((
                Arc::new(RandomDirectionSource::new(settings.pipe_max_length * 2.0)),
                Arc::new(PaletteColorSource::default()),
            ))
        }
        SourceKind::Http => {
            info!(
                "Using HTTP sources {} and {}",
                config.direction_url, config.color_url
            );
            let client = Client::builder()
                .timeout(Duration::from_millis(config.timeout_ms))
                .build()
                .map_err(|e| PipesError::Source(e.to_string()))?;
            Ok((
                Arc::new(HttpDirectionSource::new(client.clone(), &config.direction_url)),
                Arc::new(HttpColorSource::new(client, &config.color_url)),
            ))
        }
    }
}

pub(crate) fn get_text(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .query(query)
        .send()
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }
    response
        .text()
        .map_err(|e| FetchError::Network(e.to_string()))
}
