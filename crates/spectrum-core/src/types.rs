// File: crates/spectrum-core/src/types.rs
// Summary: Shared constants (bin counts, tick counts, margins) and plot margins.

/// Number of throttle bins in the frequency-vs-throttle grid.
pub const THROTTLE_BINS: usize = 100;
/// Gridlines per axis, not counting the origin line.
pub const GRID_TICKS: usize = 5;
/// Bar mode draws one bar per this many frequency bins.
pub const BINS_PER_BAR: usize = 10;

/// Default surface width in pixels.
pub const WIDTH: u32 = 1024;
/// Default surface height in pixels.
pub const HEIGHT: u32 = 640;

/// Screen margins, in pixels, used around the plot body.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    /// Gap below the bar plot, hosts the frequency labels.
    pub plot: f32,
    /// Gap below the heat map, hosts the frequency labels.
    pub bottom: f32,
    /// Left gap of the heat map (throttle labels) when windowed.
    pub left: f32,
    /// Left gap of the heat map when full screen.
    pub left_fullscreen: f32,
}

impl Margins {
    pub const fn new(plot: f32, bottom: f32, left: f32, left_fullscreen: f32) -> Self {
        Self { plot, bottom, left, left_fullscreen }
    }

    /// Left inset for the heat map in the given screen mode.
    pub fn left_for(&self, full_screen: bool) -> f32 {
        if full_screen { self.left_fullscreen } else { self.left }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(10.0, 10.0, 25.0, 35.0)
    }
}

/// Label font face and the two size presets (points).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelFont {
    pub face: &'static str,
    pub size_pt: f32,
    pub size_pt_fullscreen: f32,
}

impl LabelFont {
    pub fn size_for(&self, full_screen: bool) -> f32 {
        if full_screen { self.size_pt_fullscreen } else { self.size_pt }
    }
}

impl Default for LabelFont {
    fn default() -> Self {
        Self { face: "Verdana, Arial, sans-serif", size_pt: 6.0, size_pt_fullscreen: 9.0 }
    }
}
