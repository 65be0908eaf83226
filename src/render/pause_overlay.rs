// src/render/pause_overlay.rs
//
// Translucent backdrop with a big "PAUSED" label, shown above the pipes
// while playback is stopped

use nannou::prelude::*;

const PAUSE_TEXT: &str = "PAUSED";

#[derive(Debug, Clone)]
pub struct PauseOverlay {
    backdrop: Rgb,
    backdrop_opacity: f32,
    text_color: Rgb,
    bounds: Rect,
    font_size: u32,
}

impl PauseOverlay {
    pub fn new(backdrop: Rgb, backdrop_opacity: f32, bounds: Rect) -> Self {
        let mut overlay = Self {
            backdrop,
            backdrop_opacity,
            text_color: rgb(0.13, 0.13, 0.13),
            bounds,
            font_size: 1,
        };
        overlay.layout(bounds);
        overlay
    }

    /// Fit the backdrop to `bounds`; the label is a quarter of the height.
    pub fn layout(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.font_size = ((bounds.h() / 4.0).floor() as u32).max(1);
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn draw(&self, draw: &Draw) {
        draw.rect()
            .xy(self.bounds.xy())
            .wh(self.bounds.wh())
            .color(rgba(
                self.backdrop.red,
                self.backdrop.green,
                self.backdrop.blue,
                self.backdrop_opacity,
            ));

        draw.text(PAUSE_TEXT)
            .xy(self.bounds.xy())
            .wh(self.bounds.wh())
            .font_size(self.font_size)
            .color(self.text_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_tracks_bounds() {
        let mut overlay = PauseOverlay::new(rgb(1.0, 1.0, 1.0), 0.6, Rect::from_w_h(800.0, 600.0));
        assert_eq!(overlay.font_size(), 150);

        overlay.layout(Rect::from_w_h(400.0, 202.0));
        assert_eq!(overlay.font_size(), 50);
        assert_eq!(overlay.bounds().w(), 400.0);

        overlay.layout(Rect::from_w_h(0.0, 0.0));
        assert_eq!(overlay.font_size(), 1);
    }
}
