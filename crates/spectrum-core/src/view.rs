// File: crates/spectrum-core/src/view.rs
// Summary: View state (zoom, size, screen mode, hover frequency, display mode) and its input checks.

use crate::error::{PlotError, PlotResult};
use crate::spectrum::DisplayMode;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub zoom_x: f64,
    pub zoom_y: f64,
    pub width: u32,
    pub height: u32,
    pub full_screen: bool,
    pub mouse_frequency: Option<f64>,
    pub display_mode: DisplayMode,
}

impl ViewState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            zoom_x: 1.0,
            zoom_y: 1.0,
            width,
            height,
            full_screen: false,
            mouse_frequency: None,
            display_mode: DisplayMode::Frequency,
        }
    }

    /// Highest visible frequency for a sample rate at the current X zoom.
    pub fn visible_span_hz(&self, sample_rate: f64) -> f64 {
        sample_rate / 2.0 / self.zoom_x
    }
}

/// Zoom factors must be finite and at least 1.
pub fn check_zoom(zoom: f64, axis: &str) -> PlotResult<f64> {
    if zoom.is_finite() && zoom >= 1.0 {
        Ok(zoom)
    } else {
        Err(PlotError::degenerate(format!("{axis} zoom must be >= 1, got {zoom}")))
    }
}

pub fn check_size(width: u32, height: u32) -> PlotResult<(u32, u32)> {
    if width == 0 || height == 0 {
        return Err(PlotError::degenerate(format!("surface size must be positive, got {width}x{height}")));
    }
    Ok((width, height))
}
