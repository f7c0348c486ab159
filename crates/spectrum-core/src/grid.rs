// File: crates/spectrum-core/src/grid.rs
// Summary: Frequency/throttle gridlines, their tick layout, and the shared axis-label primitive.

use crate::geometry::{fmt_hz, PlotArea};
use crate::surface::{Canvas, StrokeStyle, TextAlign, TextBaseline, TextStyle};
use crate::theme::Color;
use crate::types::{LabelFont, GRID_TICKS};

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Draws text labels in the preset matching the current screen mode.
#[derive(Clone, Copy, Debug)]
pub struct Labeler {
    pub font: LabelFont,
    pub color: Color,
    pub full_screen: bool,
}

impl Labeler {
    pub fn style(&self, align: TextAlign, baseline: TextBaseline) -> TextStyle {
        TextStyle {
            font_face: self.font.face,
            size_pt: self.font.size_for(self.full_screen),
            color: self.color,
            align,
            baseline,
        }
    }

    pub fn draw(&self, canvas: &mut impl Canvas, text: &str, x: f32, y: f32, align: TextAlign, baseline: TextBaseline) {
        canvas.fill_text(text, x, y, &self.style(align, baseline));
    }
}

/// Frequencies (Hz) of the vertical gridlines for a visible band of `span_hz`.
pub fn frequency_ticks(span_hz: f64) -> Vec<f64> {
    linspace(0.0, span_hz, GRID_TICKS + 1)
}

/// Throttle percentages of the horizontal gridlines, top to bottom.
pub fn throttle_ticks() -> Vec<u32> {
    (0..=GRID_TICKS as u32).map(|i| 100 - i * (100 / GRID_TICKS as u32)).collect()
}

fn grid_line(canvas: &mut impl Canvas, from: (f32, f32), to: (f32, f32), color: Color) {
    canvas.begin_path();
    canvas.move_to(from.0, from.1);
    canvas.line_to(to.0, to.1);
    canvas.stroke(&StrokeStyle { color, width: 1.0 });
}

/// Vertical gridlines with Hz labels at `label_y`; first label left-aligned, last right-aligned.
pub fn draw_frequency_grid(
    canvas: &mut impl Canvas,
    area: PlotArea,
    span_hz: f64,
    label_y: f32,
    grid_color: Color,
    labeler: &Labeler,
) {
    let ticks = frequency_ticks(span_hz);
    let last = ticks.len() - 1;
    for (i, freq) in ticks.into_iter().enumerate() {
        let x = area.left + i as f32 * (area.width / GRID_TICKS as f32);
        grid_line(canvas, (x, area.top), (x, area.bottom()), grid_color);
        let align = match i {
            0 => TextAlign::Left,
            i if i == last => TextAlign::Right,
            _ => TextAlign::Center,
        };
        labeler.draw(canvas, &format!("{}Hz", fmt_hz(freq)), x, label_y, align, TextBaseline::Alphabetic);
    }
}

/// Horizontal gridlines labelled 100% (top) down to 0% (bottom), labels right-aligned at the left edge.
pub fn draw_throttle_grid(canvas: &mut impl Canvas, area: PlotArea, grid_color: Color, labeler: &Labeler) {
    let ticks = throttle_ticks();
    let last = ticks.len() - 1;
    for (i, pct) in ticks.into_iter().enumerate() {
        let y = area.top + i as f32 * (area.height / GRID_TICKS as f32);
        grid_line(canvas, (area.left, y), (area.right(), y), grid_color);
        let baseline = match i {
            0 => TextBaseline::Top,
            i if i == last => TextBaseline::Bottom,
            _ => TextBaseline::Middle,
        };
        labeler.draw(canvas, &format!("{pct}%"), area.left, y, TextAlign::Right, baseline);
    }
}
