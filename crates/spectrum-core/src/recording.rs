// File: crates/spectrum-core/src/recording.rs
// Summary: In-memory Surface that records draw operations for inspection and comparison.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::{PlotError, PlotResult};
use crate::geometry::Rect;
use crate::surface::{Canvas, Fill, RasterImage, StrokeStyle, Surface, TextStyle};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear,
    BeginPath,
    MoveTo(f32, f32),
    LineTo(f32, f32),
    Stroke(StrokeStyle),
    FillRect(Rect, Fill),
    DrawImage { width: u32, height: u32, checksum: u64, src: Rect, dst: Rect },
    FillText { text: String, x: f32, y: f32, style: TextStyle },
    DrawLayer { ops: Vec<DrawOp>, dst: Rect },
}

/// Records every call; layers it allocates share one allocation counter.
#[derive(Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    ops: Vec<DrawOp>,
    layers_allocated: Rc<Cell<usize>>,
    fail_offscreen: bool,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, ops: Vec::new(), layers_allocated: Rc::new(Cell::new(0)), fail_offscreen: false }
    }

    pub fn ops(&self) -> &[DrawOp] { &self.ops }

    pub fn take_ops(&mut self) -> Vec<DrawOp> { std::mem::take(&mut self.ops) }

    /// Number of layers allocated through `offscreen` by this surface or its layers.
    pub fn layers_allocated(&self) -> usize { self.layers_allocated.get() }

    /// Make subsequent `offscreen` calls fail, to exercise error paths.
    pub fn set_fail_offscreen(&mut self, fail: bool) { self.fail_offscreen = fail; }

    /// All `FillText` strings, including those inside blitted layers, in draw order.
    pub fn texts(&self) -> Vec<String> {
        fn walk(ops: &[DrawOp], out: &mut Vec<String>) {
            for op in ops {
                match op {
                    DrawOp::FillText { text, .. } => out.push(text.clone()),
                    DrawOp::DrawLayer { ops, .. } => walk(ops, out),
                    _ => {}
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.ops, &mut out);
        out
    }
}

/// FNV-1a over the pixel bytes; enough to tell images apart in tests.
pub fn checksum(bytes: &[u8]) -> u64 {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    for &b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x0100_0000_01b3);
    }
    h
}

impl Canvas for RecordingSurface {
    fn size(&self) -> (u32, u32) { (self.width, self.height) }

    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
    }

    fn begin_path(&mut self) { self.ops.push(DrawOp::BeginPath); }
    fn move_to(&mut self, x: f32, y: f32) { self.ops.push(DrawOp::MoveTo(x, y)); }
    fn line_to(&mut self, x: f32, y: f32) { self.ops.push(DrawOp::LineTo(x, y)); }
    fn stroke(&mut self, style: &StrokeStyle) { self.ops.push(DrawOp::Stroke(*style)); }

    fn fill_rect(&mut self, rect: Rect, fill: &Fill) {
        self.ops.push(DrawOp::FillRect(rect, fill.clone()));
    }

    fn draw_image(&mut self, image: &RasterImage, src: Rect, dst: Rect) {
        self.ops.push(DrawOp::DrawImage {
            width: image.width,
            height: image.height,
            checksum: checksum(&image.pixels),
            src,
            dst,
        });
    }

    fn measure_text(&mut self, text: &str, style: &TextStyle) -> f32 {
        // fixed advance: 0.6 em per char
        text.chars().count() as f32 * style.size_px() * 0.6
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        self.ops.push(DrawOp::FillText { text: text.to_string(), x, y, style: style.clone() });
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) -> PlotResult<()> {
        self.width = width;
        self.height = height;
        self.ops.clear();
        Ok(())
    }

    fn offscreen(&self, width: u32, height: u32) -> PlotResult<Self> {
        if self.fail_offscreen {
            return Err(PlotError::Surface("offscreen allocation refused".into()));
        }
        self.layers_allocated.set(self.layers_allocated.get() + 1);
        Ok(Self {
            width,
            height,
            ops: Vec::new(),
            layers_allocated: Rc::clone(&self.layers_allocated),
            fail_offscreen: false,
        })
    }

    fn draw_layer(&mut self, layer: &mut Self, dst: Rect) {
        self.ops.push(DrawOp::DrawLayer { ops: layer.ops.clone(), dst });
    }
}
