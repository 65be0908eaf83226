// src/services/direction_source.rs
//
// Where the raw direction steps of a pipe come from

use crate::error::FetchError;
use crate::models::{Direction, DirectionStep};
use rand::{thread_rng, Rng};
use reqwest::blocking::Client;
use serde::Deserialize;

pub trait DirectionSource: Send + Sync {
    fn fetch_directions(&self, count: usize) -> Result<Vec<DirectionStep>, FetchError>;
}

#[derive(Debug, Deserialize)]
struct DirectionsPayload {
    directions: Vec<DirectionStep>,
}

/// Decode a `{"directions": [{"direction": "up", "distance": 37}, ...]}` body.
pub fn parse_directions(body: &str) -> Result<Vec<DirectionStep>, FetchError> {
    let payload: DirectionsPayload =
        serde_json::from_str(body).map_err(|e| FetchError::Payload(e.to_string()))?;

    if payload.directions.is_empty() {
        return Err(FetchError::Empty("direction"));
    }
    if let Some(bad) = payload.directions.iter().find(|s| !(s.raw_distance >= 0.0)) {
        return Err(FetchError::Payload(format!(
            "negative distance {}",
            bad.raw_distance
        )));
    }
    Ok(payload.directions)
}

/// Asks a directbot-style endpoint for connected directions.
pub struct HttpDirectionSource {
    client: Client,
    url: String,
}

impl HttpDirectionSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl DirectionSource for HttpDirectionSource {
    fn fetch_directions(&self, count: usize) -> Result<Vec<DirectionStep>, FetchError> {
        let count = count.to_string();
        let body = super::get_text(
            &self.client,
            &self.url,
            &[("count", count.as_str()), ("connected", "1")],
        )?;
        parse_directions(&body)
    }
}

/// Generates directions in-process.
#[derive(Debug, Clone)]
pub struct RandomDirectionSource {
    max_distance: f32,
}

impl RandomDirectionSource {
    pub fn new(max_distance: f32) -> Self {
        Self {
            max_distance: max_distance.max(0.0),
        }
    }
}

impl DirectionSource for RandomDirectionSource {
    fn fetch_directions(&self, count: usize) -> Result<Vec<DirectionStep>, FetchError> {
        if count == 0 {
            return Err(FetchError::Empty("direction"));
        }
        let mut rng = thread_rng();
        Ok((0..count)
            .map(|_| {
                let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
                DirectionStep::new(direction, rng.gen_range(0.0..=self.max_distance))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directions() {
        let body = r#"{"directions":[{"direction":"up","distance":37},{"direction":"right","distance":12.5}]}"#;
        let steps = parse_directions(body).unwrap();
        assert_eq!(
            steps,
            vec![
                DirectionStep::new(Direction::Up, 37.0),
                DirectionStep::new(Direction::Right, 12.5),
            ]
        );
    }

    #[test]
    fn test_parse_directions_failures() {
        let tests = vec![
            ("not json", "payload"),
            (r#"{"directions":[]}"#, "empty"),
            (r#"{"directions":[{"direction":"north","distance":3}]}"#, "payload"),
            (r#"{"directions":[{"direction":"up","distance":-3}]}"#, "payload"),
        ];

        for (body, expected) in tests {
            let result = parse_directions(body);
            let matched = match (&result, expected) {
                (Err(FetchError::Payload(_)), "payload") => true,
                (Err(FetchError::Empty(_)), "empty") => true,
                _ => false,
            };
            assert!(matched, "Unexpected {:?} for {}", result, body);
        }
    }

    #[test]
    fn test_random_source() {
        let source = RandomDirectionSource::new(80.0);
        let steps = source.fetch_directions(50).unwrap();
        assert_eq!(steps.len(), 50);
        assert!(steps.iter().all(|s| (0.0..=80.0).contains(&s.raw_distance)));
        assert!(source.fetch_directions(0).is_err());
    }
}
