//! Zoom slider: display width of the preview images, in pixels.

use serde::Serialize;

pub const MIN_WIDTH: u32 = 100;
pub const MAX_WIDTH: u32 = 1000;
pub const STEP: u32 = 50;
pub const DEFAULT_WIDTH: u32 = 700;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ZoomLevel(u32);

impl Default for ZoomLevel {
    fn default() -> Self {
        ZoomLevel(DEFAULT_WIDTH)
    }
}

impl ZoomLevel {
    /// Accepts only values the slider can produce.
    pub fn new(width: u32) -> Option<Self> {
        ((MIN_WIDTH..=MAX_WIDTH).contains(&width) && (width - MIN_WIDTH) % STEP == 0)
            .then_some(ZoomLevel(width))
    }

    /// Parses a submitted form value; blank means the default.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Some(ZoomLevel::default()),
            Some(s) => s.parse().ok().and_then(ZoomLevel::new),
        }
    }

    pub fn width(self) -> u32 {
        self.0
    }
}
