// File: crates/spectrum-core/src/overlay.rs
// Summary: Filter/noise marker layout (which markers, in what order, at which stacking slot) and marker painting.

use crate::config::{enabled, enabled_band, FilterConfig};
use crate::error::{PlotError, PlotResult};
use crate::geometry::fmt_hz;
use crate::grid::Labeler;
use crate::scale::FrequencyScale;
use crate::surface::{Canvas, StrokeStyle, TextAlign, TextBaseline};
use crate::theme::{Color, Theme};

/// Slots 0 and 1 stay free for the uncached mouse marker, so cached markers never move.
pub const FIRST_SLOT: u32 = 2;
/// Vertical pixels per stacking slot.
pub const SLOT_HEIGHT: f32 = 15.0;
/// Markers start this far above their stacking offset.
pub const MARKER_LEAD: f32 = 10.0;
/// Line width used for the noise and mouse markers.
pub const EMPHASIS_LINE_WIDTH: f32 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarkerShape {
    /// Single vertical line.
    Line { freq: f64 },
    /// Dynamic filter: two lines joined by a bracket at the top.
    Band { min: f64, max: f64 },
    /// Notch: centre line with two diagonals fanning to the cutoff and its mirror.
    Notch { center: f64, cutoff: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub shape: MarkerShape,
    pub label: String,
    pub slot: u32,
    pub color: Color,
    /// Explicit width; values above 5 are a band width in Hz.
    pub line_width: Option<f32>,
}

impl Marker {
    /// Vertical pixel position of the marker's label.
    pub fn offset(&self, margin: f32) -> f32 {
        stack_offset(self.slot, margin)
    }
}

pub fn stack_offset(slot: u32, margin: f32) -> f32 {
    SLOT_HEIGHT * slot as f32 + margin
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldClass {
    Yaw,
    Other,
}

/// Classify the active field; yaw fields get the yaw low-pass instead of the D-term markers.
pub fn classify_field(field_name: Option<&str>) -> PlotResult<FieldClass> {
    let name = field_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| PlotError::MissingFieldMetadata("field name absent or blank".into()))?;
    if name.to_ascii_lowercase().contains("yaw") {
        Ok(FieldClass::Yaw)
    } else {
        Ok(FieldClass::Other)
    }
}

struct Stack {
    markers: Vec<Marker>,
    slot: u32,
}

impl Stack {
    fn push(&mut self, shape: MarkerShape, label: String, color: Color, line_width: Option<f32>) {
        log::trace!("marker '{}' at slot {}", label, self.slot);
        self.markers.push(Marker { shape, label, slot: self.slot, color, line_width });
        self.slot += 1;
    }

    fn gap(&mut self) {
        self.slot += 1;
    }

    fn lowpass(&mut self, name: &str, freq: f64, color: Color) {
        self.push(MarkerShape::Line { freq }, format!("{name} {}Hz", fmt_hz(freq)), color, None);
    }

    fn band(&mut self, name: &str, (min, max): (f64, f64), color: Color) {
        let label = format!("{name} {}-{}Hz", fmt_hz(min), fmt_hz(max));
        self.push(MarkerShape::Band { min, max }, label, color, None);
    }

    fn notch(&mut self, name: &str, center: f64, cutoff: f64, color: Color) {
        let label = format!("{name} center {}Hz, cutoff {}Hz", fmt_hz(center), fmt_hz(cutoff));
        self.push(MarkerShape::Notch { center, cutoff }, label, color, None);
    }
}

/// Ordered marker instructions for bar mode.
pub fn layout_markers(
    config: &FilterConfig,
    field_name: Option<&str>,
    max_noise_hz: Option<f64>,
    theme: &Theme,
) -> Vec<Marker> {
    let mut stack = Stack { markers: Vec::new(), slot: FIRST_SLOT };

    if let Some(band) = enabled_band(config.gyro_lowpass_dyn_hz) {
        stack.band("GYRO LPF Dyn cutoff", band, theme.gyro_lpf);
    } else if let Some(f) = enabled(config.gyro_lowpass_hz) {
        stack.lowpass("GYRO LPF cutoff", f, theme.gyro_lpf);
    }
    if let Some(f) = enabled(config.gyro_lowpass2_hz) {
        stack.lowpass("GYRO LPF2 cutoff", f, theme.gyro_lpf2);
    }
    for n in config.gyro_notches() {
        stack.notch("GYRO notch", n.center, n.cutoff, theme.gyro_notch);
    }

    stack.gap();

    let class = classify_field(field_name).unwrap_or_else(|e| {
        log::warn!("{e}; using non-yaw filter markers");
        FieldClass::Other
    });
    match class {
        FieldClass::Yaw => {
            if let Some(f) = enabled(config.yaw_lpf_hz) {
                stack.lowpass("YAW LPF cutoff", f, theme.marker_default);
            }
        }
        FieldClass::Other => {
            if let Some(band) = enabled_band(config.dterm_lpf_dyn_hz) {
                stack.band("D-TERM LPF Dyn cutoff", band, theme.dterm_lpf);
            } else if let Some(f) = enabled(config.dterm_lpf_hz) {
                stack.lowpass("D-TERM LPF cutoff", f, theme.dterm_lpf);
            }
            if let Some(f) = enabled(config.dterm_lpf2_hz) {
                stack.lowpass("D-TERM LPF2 cutoff", f, theme.dterm_lpf2);
            }
            if let Some(n) = config.dterm_notch() {
                stack.notch("D-TERM notch", n.center, n.cutoff, theme.dterm_notch);
            }
        }
    }

    stack.gap();

    if let Some(f) = max_noise_hz.filter(|f| f.is_finite()) {
        let label = format!("Max motor noise {}Hz", fmt_hz(f));
        stack.push(MarkerShape::Line { freq: f }, label, theme.max_noise, Some(EMPHASIS_LINE_WIDTH));
    }

    stack.markers
}

/// Hover marker; drawn on the live surface at slot 0, never cached.
pub fn mouse_marker(freq: f64, theme: &Theme) -> Marker {
    Marker {
        shape: MarkerShape::Line { freq },
        label: format!("{}Hz", fmt_hz(freq)),
        slot: 0,
        color: theme.mouse,
        line_width: Some(EMPHASIS_LINE_WIDTH),
    }
}

/// Paints markers onto a plot whose frequency axis is `scale` and whose body ends at `bottom`.
pub struct MarkerPainter<'a> {
    pub scale: FrequencyScale,
    pub bottom: f32,
    pub margin: f32,
    pub default_line_width: f32,
    pub labeler: &'a Labeler,
}

impl MarkerPainter<'_> {
    /// Pixel width for a marker line; widths above 5 are a band in Hz.
    pub fn line_width(&self, requested: Option<f32>) -> f32 {
        let mut w = requested.unwrap_or(self.default_line_width);
        if w > 5.0 {
            w = self.scale.width_of(2.0 * w as f64);
        }
        w.max(1.0)
    }

    /// Vertical line from above `offset` to the plot bottom, optional label to its right. Returns x.
    pub fn draw_marker_line(
        &self,
        canvas: &mut impl Canvas,
        freq: f64,
        label: Option<&str>,
        offset: f32,
        color: Color,
        line_width: Option<f32>,
    ) -> f32 {
        let x = self.scale.to_px(freq);
        canvas.begin_path();
        canvas.move_to(x, offset - MARKER_LEAD);
        canvas.line_to(x, self.bottom);
        canvas.stroke(&StrokeStyle { color, width: self.line_width(line_width) });
        if let Some(text) = label {
            self.labeler.draw(canvas, text.trim(), x + 2.0, offset + 1.0, TextAlign::Left, TextBaseline::Alphabetic);
        }
        x
    }

    pub fn draw(&self, canvas: &mut impl Canvas, marker: &Marker) {
        let offset = marker.offset(self.margin);
        let top = offset - MARKER_LEAD;
        let plain_width = marker.line_width.unwrap_or(self.default_line_width);
        match marker.shape {
            MarkerShape::Line { freq } => {
                self.draw_marker_line(canvas, freq, Some(&marker.label), offset, marker.color, marker.line_width);
            }
            MarkerShape::Band { min, max } => {
                let x2 = self.draw_marker_line(canvas, max, None, offset, marker.color, marker.line_width);
                let x1 = self.draw_marker_line(canvas, min, Some(&marker.label), offset, marker.color, marker.line_width);
                canvas.begin_path();
                canvas.move_to(x1, top);
                canvas.line_to(x2, top);
                canvas.stroke(&StrokeStyle { color: marker.color, width: plain_width });
            }
            MarkerShape::Notch { center, cutoff } => {
                let cx = self.scale.to_px(center);
                let cut_x = self.scale.to_px(cutoff);
                canvas.begin_path();
                canvas.move_to(cx, top);
                canvas.line_to(cut_x, self.bottom);
                canvas.move_to(cx, top);
                canvas.line_to(cx * 2.0 - cut_x, self.bottom);
                canvas.stroke(&StrokeStyle { color: marker.color, width: plain_width });
                self.draw_marker_line(canvas, center, Some(&marker.label), offset, marker.color, marker.line_width);
            }
        }
    }
}
