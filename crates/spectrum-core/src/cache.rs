// File: crates/spectrum-core/src/cache.rs
// Summary: Two independently invalidated cache slots: the static layer and the heat-map image.

use crate::surface::RasterImage;

/// One cache slot: either holds a value built from current state, or must be rebuilt.
#[derive(Debug, Default)]
pub enum Slot<T> {
    #[default]
    Invalid,
    Valid(T),
}

impl<T> Slot<T> {
    pub fn is_valid(&self) -> bool { matches!(self, Slot::Valid(_)) }

    pub fn get(&self) -> Option<&T> {
        match self {
            Slot::Valid(v) => Some(v),
            Slot::Invalid => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Slot::Valid(v) => Some(v),
            Slot::Invalid => None,
        }
    }

    /// Drop the held value, if any.
    pub fn invalidate(&mut self) { *self = Slot::Invalid; }

    pub fn store(&mut self, value: T) {
        *self = Slot::Valid(value);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StaticState {
    NoStaticCache,
    StaticCacheValid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeatmapState {
    NoHeatmapCache,
    HeatmapCacheValid,
}

/// Static layer (`L`, a backend surface) and the raw heat map, owned by one plot.
#[derive(Debug)]
pub struct RenderCache<L> {
    pub static_layer: Slot<L>,
    pub heatmap: Slot<RasterImage>,
}

impl<L> Default for RenderCache<L> {
    fn default() -> Self {
        Self { static_layer: Slot::Invalid, heatmap: Slot::Invalid }
    }
}

impl<L> RenderCache<L> {
    pub fn invalidate_static(&mut self) {
        self.static_layer.invalidate();
    }

    pub fn invalidate_heatmap(&mut self) {
        self.heatmap.invalidate();
    }

    pub fn invalidate_all(&mut self) {
        self.invalidate_static();
        self.invalidate_heatmap();
    }

    pub fn state(&self) -> (StaticState, HeatmapState) {
        let s = if self.static_layer.is_valid() { StaticState::StaticCacheValid } else { StaticState::NoStaticCache };
        let h = if self.heatmap.is_valid() { HeatmapState::HeatmapCacheValid } else { HeatmapState::NoHeatmapCache };
        (s, h)
    }
}
