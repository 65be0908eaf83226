// src/services/color_source.rs
//
// Where pipe colors come from

use crate::error::FetchError;
use crate::models::PipeColor;
use rand::{seq::SliceRandom, thread_rng};
use regex::Regex;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::sync::LazyLock;

pub trait ColorSource: Send + Sync {
    fn fetch_colors(&self, count: usize) -> Result<Vec<PipeColor>, FetchError>;
}

static HEX_COLOR_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^#?([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$").ok()
});

/// Parse `#rrggbb` (the `#` is optional).
pub fn parse_hex_color(hex: &str) -> Option<PipeColor> {
    let re = HEX_COLOR_RE.as_ref()?;
    let caps = re.captures(hex.trim())?;

    let channel = |i: usize| u8::from_str_radix(&caps[i], 16).ok();
    Some(PipeColor::new(channel(1)?, channel(2)?, channel(3)?))
}

#[derive(Debug, Deserialize)]
struct ColorsPayload {
    colors: Vec<ColorEntry>,
}

#[derive(Debug, Deserialize)]
struct ColorEntry {
    value: String,
}

/// Decode a `{"colors": [{"value": "#A1B2C3"}, ...]}` body.
pub fn parse_colors(body: &str) -> Result<Vec<PipeColor>, FetchError> {
    let payload: ColorsPayload =
        serde_json::from_str(body).map_err(|e| FetchError::Payload(e.to_string()))?;

    if payload.colors.is_empty() {
        return Err(FetchError::Empty("color"));
    }
    payload
        .colors
        .iter()
        .map(|c| {
            parse_hex_color(&c.value)
                .ok_or_else(|| FetchError::Payload(format!("bad color {:?}", c.value)))
        })
        .collect()
}

/// Asks a hexbot-style endpoint for colors.
pub struct HttpColorSource {
    client: Client,
    url: String,
}

impl HttpColorSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl ColorSource for HttpColorSource {
    fn fetch_colors(&self, count: usize) -> Result<Vec<PipeColor>, FetchError> {
        let count = count.to_string();
        let body = super::get_text(&self.client, &self.url, &[("count", count.as_str())])?;
        parse_colors(&body)
    }
}

/// Picks from a fixed palette.
#[derive(Debug, Clone)]
pub struct PaletteColorSource {
    palette: Vec<PipeColor>,
}

impl Default for PaletteColorSource {
    fn default() -> Self {
        let palette = [
            "#f44336", "#ff9800", "#ffeb3b", "#2196f3", "#4caf50", "#3f51b5", "#9c27b0",
        ]
        .iter()
        .filter_map(|hex| parse_hex_color(hex))
        .collect();
        Self { palette }
    }
}

impl PaletteColorSource {
    pub fn new(palette: Vec<PipeColor>) -> Self {
        Self { palette }
    }
}

impl ColorSource for PaletteColorSource {
    fn fetch_colors(&self, count: usize) -> Result<Vec<PipeColor>, FetchError> {
        let mut rng = thread_rng();
        let colors: Vec<PipeColor> = (0..count)
            .filter_map(|_| self.palette.choose(&mut rng).copied())
            .collect();
        if colors.is_empty() {
            return Err(FetchError::Empty("color"));
        }
        Ok(colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        let tests = vec![
            ("#f44336", Some(PipeColor::new(0xf4, 0x43, 0x36))),
            ("A1B2C3", Some(PipeColor::new(0xa1, 0xb2, 0xc3))),
            (" #000000 ", Some(PipeColor::new(0, 0, 0))),
            ("#fff", None),
            ("#gg0000", None),
            ("", None),
        ];

        for (hex, expected) in tests {
            assert_eq!(parse_hex_color(hex), expected, "Failed for {:?}", hex);
        }
    }

    #[test]
    fn test_parse_colors() {
        let colors = parse_colors(r##"{"colors":[{"value":"#52A1F7"}]}"##).unwrap();
        assert_eq!(colors, vec![PipeColor::new(0x52, 0xa1, 0xf7)]);

        assert_eq!(
            parse_colors(r#"{"colors":[]}"#),
            Err(FetchError::Empty("color"))
        );
        assert!(matches!(
            parse_colors(r#"{"colors":[{"value":"blue"}]}"#),
            Err(FetchError::Payload(_))
        ));
    }

    #[test]
    fn test_hex_regex_is_shared_across_calls() {
        let compiled = HEX_COLOR_RE.as_ref().map(|re| re as *const Regex);
        assert!(compiled.is_some());

        let body = format!(
            r#"{{"colors":[{}]}}"#,
            vec![r##"{"value":"#102030"}"##; 50].join(",")
        );
        assert_eq!(parse_colors(&body).map(|c| c.len()), Ok(50));
        assert_eq!(HEX_COLOR_RE.as_ref().map(|re| re as *const Regex), compiled);
    }

    #[test]
    fn test_palette_source() {
        let source = PaletteColorSource::default();
        let colors = source.fetch_colors(3).unwrap();
        assert_eq!(colors.len(), 3);

        let empty = PaletteColorSource::new(Vec::new());
        assert_eq!(empty.fetch_colors(1), Err(FetchError::Empty("color")));
    }
}
