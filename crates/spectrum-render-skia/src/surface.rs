// File: crates/spectrum-render-skia/src/surface.rs
// Summary: CPU raster surface backed by Skia; implements the core Canvas/Surface capability and PNG/RGBA export.

use std::rc::Rc;

use anyhow::Result;
use skia_safe as skia;
use spectrum_core::{Canvas, Color, Fill, LinearGradient, PlotError, PlotResult, RasterImage, Rect, StrokeStyle, Surface, TextStyle};

use crate::text::TextShaper;

pub(crate) fn to_sk_color(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn to_sk_rect(r: Rect) -> skia::Rect {
    skia::Rect::from_ltrb(r.left, r.top, r.right, r.bottom)
}

fn raster(width: u32, height: u32) -> PlotResult<skia::Surface> {
    skia::surfaces::raster_n32_premul((width as i32, height as i32))
        .ok_or_else(|| PlotError::Surface(format!("failed to create {width}x{height} raster surface")))
}

fn gradient_shader(g: &LinearGradient) -> Option<skia::Shader> {
    let stops = g.sorted_stops();
    let colors: Vec<skia::Color> = stops.iter().map(|(_, c)| to_sk_color(*c)).collect();
    let positions: Vec<f32> = stops.iter().map(|(p, _)| *p).collect();
    skia::Shader::linear_gradient(
        (skia::Point::new(g.start.0, g.start.1), skia::Point::new(g.end.0, g.end.1)),
        colors.as_slice(),
        Some(positions.as_slice()),
        skia::TileMode::Clamp,
        None,
        None,
    )
}

/// Skia-backed drawing surface. Off-screen layers share the live surface's font collection.
pub struct SkiaSurface {
    surface: skia::Surface,
    width: u32,
    height: u32,
    path: skia::Path,
    shaper: Rc<TextShaper>,
}

impl SkiaSurface {
    pub fn new(width: u32, height: u32) -> PlotResult<Self> {
        Ok(Self {
            surface: raster(width, height)?,
            width,
            height,
            path: skia::Path::new(),
            shaper: Rc::new(TextShaper::new()),
        })
    }

    /// Encode the current pixels as PNG.
    pub fn to_png_bytes(&mut self) -> Result<Vec<u8>> {
        let image = self.surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    pub fn write_png(&mut self, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.to_png_bytes()?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    /// Unpremultiplied RGBA8 copy of the pixels: (buffer, width, height, stride).
    pub fn to_rgba8(&mut self) -> Result<(Vec<u8>, u32, u32, usize)> {
        let stride = self.width as usize * 4;
        let mut px = vec![0u8; stride * self.height as usize];
        let info = skia::ImageInfo::new(
            (self.width as i32, self.height as i32),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        if !self.surface.read_pixels(&info, &mut px, stride, (0, 0)) {
            anyhow::bail!("read_pixels failed for {}x{} surface", self.width, self.height);
        }
        Ok((px, self.width, self.height, stride))
    }

    fn stroke_paint(style: &StrokeStyle) -> skia::Paint {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Stroke);
        paint.set_stroke_width(style.width);
        paint.set_color(to_sk_color(style.color));
        paint
    }

    fn fill_paint(fill: &Fill) -> skia::Paint {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Fill);
        match fill {
            Fill::Solid(c) => {
                paint.set_color(to_sk_color(*c));
            }
            Fill::Linear(g) => match gradient_shader(g) {
                Some(shader) => {
                    paint.set_shader(shader);
                }
                None => {
                    // fewer than two stops: fall back to the first colour, if any
                    let c = g.stops.first().map_or(Color::TRANSPARENT, |s| s.1);
                    paint.set_color(to_sk_color(c));
                }
            },
        }
        paint
    }
}

impl Canvas for SkiaSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.surface.canvas().clear(skia::Color::TRANSPARENT);
    }

    fn begin_path(&mut self) {
        self.path = skia::Path::new();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to((x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to((x, y));
    }

    fn stroke(&mut self, style: &StrokeStyle) {
        let paint = Self::stroke_paint(style);
        self.surface.canvas().draw_path(&self.path, &paint);
    }

    fn fill_rect(&mut self, rect: Rect, fill: &Fill) {
        let paint = Self::fill_paint(fill);
        self.surface.canvas().draw_rect(to_sk_rect(rect), &paint);
    }

    fn draw_image(&mut self, image: &RasterImage, src: Rect, dst: Rect) {
        let info = skia::ImageInfo::new(
            (image.width as i32, image.height as i32),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let data = skia::Data::new_copy(&image.pixels);
        let Some(sk_image) = skia::images::raster_from_data(&info, data, image.row_bytes()) else {
            log::warn!("could not wrap {}x{} raster image; skipped", image.width, image.height);
            return;
        };
        let sampling = skia::SamplingOptions::new(skia::FilterMode::Linear, skia::MipmapMode::None);
        self.surface.canvas().draw_image_rect_with_sampling_options(
            &sk_image,
            Some((&to_sk_rect(src), skia::canvas::SrcRectConstraint::Fast)),
            to_sk_rect(dst),
            sampling,
            &skia::Paint::default(),
        );
    }

    fn measure_text(&mut self, text: &str, style: &TextStyle) -> f32 {
        self.shaper.measure_width(text, style)
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        let shaper = Rc::clone(&self.shaper);
        shaper.draw(self.surface.canvas(), text, x, y, style);
    }
}

impl Surface for SkiaSurface {
    fn resize(&mut self, width: u32, height: u32) -> PlotResult<()> {
        self.surface = raster(width, height)?;
        self.width = width;
        self.height = height;
        log::debug!("skia surface resized to {width}x{height}");
        Ok(())
    }

    fn offscreen(&self, width: u32, height: u32) -> PlotResult<Self> {
        let mut surface = raster(width, height)?;
        surface.canvas().clear(skia::Color::TRANSPARENT);
        Ok(Self { surface, width, height, path: skia::Path::new(), shaper: Rc::clone(&self.shaper) })
    }

    fn draw_layer(&mut self, layer: &mut Self, dst: Rect) {
        let image = layer.surface.image_snapshot();
        self.surface.canvas().draw_image_rect(&image, None, to_sk_rect(dst), &skia::Paint::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offscreen_starts_transparent() {
        let live = SkiaSurface::new(8, 8).unwrap();
        let mut layer = live.offscreen(4, 4).unwrap();
        let (px, w, h, _) = layer.to_rgba8().unwrap();
        assert_eq!((w, h), (4, 4));
        assert!(px.iter().all(|&b| b == 0));
    }

    #[test]
    fn solid_fill_lands_in_pixels() {
        let mut s = SkiaSurface::new(4, 4).unwrap();
        s.clear();
        s.fill_rect(Rect::from_ltwh(0.0, 0.0, 4.0, 4.0), &Fill::Solid(Color::from_argb(255, 10, 20, 30)));
        let (px, ..) = s.to_rgba8().unwrap();
        assert_eq!(&px[0..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn resize_changes_reported_size() {
        let mut s = SkiaSurface::new(4, 4).unwrap();
        s.resize(10, 6).unwrap();
        assert_eq!(s.size(), (10, 6));
        assert_eq!(s.to_rgba8().unwrap().0.len(), 10 * 6 * 4);
    }
}
