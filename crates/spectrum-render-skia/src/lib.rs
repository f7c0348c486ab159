// File: crates/spectrum-render-skia/src/lib.rs
// Summary: Skia renderer crate: raster surfaces implementing the core drawing capability, plus text shaping.

pub mod surface;
pub mod text;

pub use surface::SkiaSurface;
pub use text::TextShaper;
