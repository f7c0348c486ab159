// File: crates/spectrum-core/src/scale.rs
// Summary: Coordinate mapping from frequency / magnitude / throttle values to pixels under zoom.

use crate::error::{PlotError, PlotResult};
use crate::types::THROTTLE_BINS;

/// Map `freq` (Hz) to an x offset within a plot of `width` pixels.
///
/// The visible band is the Nyquist frequency divided by `zoom_x`, so the
/// right edge is reached at `sample_rate / 2 / zoom_x`.
pub fn frequency_to_x(freq: f64, sample_rate: f64, width: f64, zoom_x: f64) -> PlotResult<f64> {
    let span = visible_span(sample_rate, zoom_x)?;
    // ratio first: the right edge lands exactly on `width`
    Ok(width * (freq / span))
}

/// Height in pixels of a bar for `value`; magnitudes are nominally 0..100.
pub fn magnitude_to_bar_height(value: f64, height: f64, zoom_y: f64) -> f64 {
    value * height / (zoom_y * 100.0)
}

/// Top edge of throttle bin `bin` in a plot of `height` pixels; bin 0 sits at the bottom.
pub fn throttle_to_y(bin: usize, height: f64) -> f64 {
    let row = (THROTTLE_BINS - 1).saturating_sub(bin);
    height * row as f64 / THROTTLE_BINS as f64
}

fn visible_span(sample_rate: f64, zoom_x: f64) -> PlotResult<f64> {
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(PlotError::degenerate(format!("sample rate must be positive, got {sample_rate}")));
    }
    if !(zoom_x.is_finite() && zoom_x > 0.0) {
        return Err(PlotError::degenerate(format!("zoom must be positive, got {zoom_x}")));
    }
    Ok(sample_rate / 2.0 / zoom_x)
}

/// Validated horizontal scale for one render pass; mapping is infallible once built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrequencyScale {
    pub left_px: f32,
    pub width_px: f32,
    /// Highest visible frequency (zoomed Nyquist), Hz.
    pub span_hz: f64,
}

impl FrequencyScale {
    pub fn new(left_px: f32, width_px: f32, sample_rate: f64, zoom_x: f64) -> PlotResult<Self> {
        Ok(Self { left_px, width_px, span_hz: visible_span(sample_rate, zoom_x)? })
    }

    #[inline]
    pub fn to_px(&self, freq: f64) -> f32 {
        self.left_px + (self.width_px as f64 * (freq / self.span_hz)) as f32
    }

    /// Pixel width covered by `hz`, measured from the plot's left edge.
    #[inline]
    pub fn width_of(&self, hz: f64) -> f32 {
        (self.width_px as f64 * (hz / self.span_hz)) as f32
    }
}
