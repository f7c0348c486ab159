// File: crates/spectrum-core/src/surface.rs
// Summary: Drawing capability traits the engine renders through, plus the paint/text style types.

use crate::error::PlotResult;
use crate::geometry::Rect;
use crate::theme::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    Top,
    Middle,
    Alphabetic,
    Bottom,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font families in preference order.
    pub font_face: &'static str,
    /// Size in points (1pt = 4/3 px).
    pub size_pt: f32,
    pub color: Color,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl TextStyle {
    pub fn size_px(&self) -> f32 { self.size_pt * 4.0 / 3.0 }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
}

/// Linear gradient between two points; stop offsets are in [0, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub start: (f32, f32),
    pub end: (f32, f32),
    pub stops: Vec<(f32, Color)>,
}

impl LinearGradient {
    pub fn new(start: (f32, f32), end: (f32, f32)) -> Self {
        Self { start, end, stops: Vec::new() }
    }

    pub fn add_color_stop(mut self, offset: f32, color: Color) -> Self {
        self.stops.push((offset, color));
        self
    }

    /// Stops ordered by offset; equal offsets keep insertion order.
    pub fn sorted_stops(&self) -> Vec<(f32, Color)> {
        let mut stops = self.stops.clone();
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        stops
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Fill {
    Solid(Color),
    Linear(LinearGradient),
}

/// RGBA8 (straight alpha) pixel buffer produced by the engine, e.g. the heat map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RasterImage {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, pixels: vec![0; width as usize * height as usize * 4] }
    }

    pub fn row_bytes(&self) -> usize { self.width as usize * 4 }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.pixels[i..i + 4];
        Color::from_argb(p[3], p[0], p[1], p[2])
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, c: Color) {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels[i..i + 4].copy_from_slice(&[c.r, c.g, c.b, c.a]);
    }
}

/// Immediate-mode drawing operations, modelled on a 2-D canvas context.
pub trait Canvas {
    fn size(&self) -> (u32, u32);
    /// Clear every pixel to transparent.
    fn clear(&mut self);
    /// Discard the current path and start a new one.
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    /// Stroke the current path.
    fn stroke(&mut self, style: &StrokeStyle);
    fn fill_rect(&mut self, rect: Rect, fill: &Fill);
    /// Draw the `src` region of `image` scaled into `dst`.
    fn draw_image(&mut self, image: &RasterImage, src: Rect, dst: Rect);
    /// Advance width of `text` in pixels.
    fn measure_text(&mut self, text: &str, style: &TextStyle) -> f32;
    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle);
}

/// A live drawing target that can also allocate off-screen layers of its own kind.
pub trait Surface: Canvas + Sized {
    fn resize(&mut self, width: u32, height: u32) -> PlotResult<()>;
    /// Allocate a transparent layer of the same backend.
    fn offscreen(&self, width: u32, height: u32) -> PlotResult<Self>;
    /// Composite a layer previously produced by [`Surface::offscreen`] into `dst`.
    fn draw_layer(&mut self, layer: &mut Self, dst: Rect);
}
