// File: crates/spectrum-core/src/lib.rs
// Summary: Core library entry point; exports the spectrum plot engine and its drawing capability.

pub mod cache;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod heatmap;
pub mod overlay;
pub mod plot;
pub mod recording;
pub mod scale;
pub mod spectrum;
pub mod surface;
pub mod theme;
pub mod types;
pub mod view;

pub use cache::{HeatmapState, StaticState};
pub use config::{FilterConfig, NotchPair, OneOrMany};
pub use error::{PlotError, PlotResult};
pub use geometry::Rect;
pub use overlay::{layout_markers, Marker, MarkerShape};
pub use plot::{PlotOptions, RenderStats, SpectrumPlot};
pub use recording::{DrawOp, RecordingSurface};
pub use scale::{frequency_to_x, magnitude_to_bar_height, throttle_to_y};
pub use spectrum::{DisplayMode, Magnitudes, SpectrumSample};
pub use surface::{Canvas, Fill, LinearGradient, RasterImage, StrokeStyle, Surface, TextAlign, TextBaseline, TextStyle};
pub use theme::{Color, Theme};
pub use view::ViewState;
