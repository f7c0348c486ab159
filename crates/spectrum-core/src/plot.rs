// File: crates/spectrum-core/src/plot.rs
// Summary: SpectrumPlot: owns view state, data and caches; draws the cached static layer plus the live hover marker.

use crate::cache::{HeatmapState, RenderCache, StaticState};
use crate::config::FilterConfig;
use crate::error::{PlotError, PlotResult};
use crate::geometry::{clamp, PlotArea, Rect};
use crate::grid::{draw_frequency_grid, draw_throttle_grid, Labeler};
use crate::heatmap::{self, HeatmapOptions};
use crate::overlay::{layout_markers, mouse_marker, MarkerPainter};
use crate::scale::{magnitude_to_bar_height, FrequencyScale};
use crate::spectrum::{DisplayMode, SpectrumSample};
use crate::surface::{Canvas, Fill, LinearGradient, RasterImage, Surface, TextAlign, TextBaseline};
use crate::theme::Theme;
use crate::types::{LabelFont, Margins, BINS_PER_BAR};
use crate::view::{check_size, check_zoom, ViewState};

/// Default marker line width, pixels.
pub const DEFAULT_MARK_LINE_WIDTH: f32 = 2.0;
/// Nominal magnitudes of the bar gradient stops.
const BAR_STOP_LEVELS: [f64; 4] = [0.0, 0.15, 0.45, 1.0];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotOptions {
    pub margins: Margins,
    pub font: LabelFont,
    pub theme: Theme,
    pub heatmap: HeatmapOptions,
    pub marker_line_width: f32,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            font: LabelFont::default(),
            theme: Theme::dark(),
            heatmap: HeatmapOptions::default(),
            marker_line_width: DEFAULT_MARK_LINE_WIDTH,
        }
    }
}

/// Counters for cache behaviour; only ever incremented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub static_rebuilds: u64,
    pub heatmap_rebuilds: u64,
    pub draws: u64,
}

/// One plot instance bound to one surface. Independent instances share nothing.
pub struct SpectrumPlot<S: Surface> {
    surface: S,
    config: FilterConfig,
    options: PlotOptions,
    view: ViewState,
    data: Option<SpectrumSample>,
    cache: RenderCache<S>,
    stats: RenderStats,
}

impl<S: Surface> SpectrumPlot<S> {
    /// Bind a surface and filter configuration; caches start empty.
    pub fn initialize(surface: S, config: FilterConfig) -> Self {
        Self::with_options(surface, config, PlotOptions::default())
    }

    pub fn with_options(surface: S, config: FilterConfig, options: PlotOptions) -> Self {
        let (w, h) = surface.size();
        Self {
            surface,
            config,
            options,
            view: ViewState::new(w, h),
            data: None,
            cache: RenderCache::default(),
            stats: RenderStats::default(),
        }
    }

    /// Update zoom. A changed Y zoom also drops the heat map (its colour scale depends on it).
    pub fn set_zoom(&mut self, zoom_x: f64, zoom_y: f64) -> PlotResult<()> {
        let zoom_x = check_zoom(zoom_x, "x")?;
        let zoom_y = check_zoom(zoom_y, "y")?;
        let y_changed = zoom_y != self.view.zoom_y;
        self.view.zoom_x = zoom_x;
        self.view.zoom_y = zoom_y;
        self.cache.invalidate_static();
        if y_changed {
            self.cache.invalidate_heatmap();
        }
        Ok(())
    }

    /// Resize the live surface. The heat map is size independent and survives.
    pub fn set_size(&mut self, width: u32, height: u32) -> PlotResult<()> {
        let (width, height) = check_size(width, height)?;
        self.surface.resize(width, height)?;
        self.view.width = width;
        self.view.height = height;
        self.cache.invalidate_static();
        Ok(())
    }

    pub fn set_full_screen(&mut self, full_screen: bool) {
        self.view.full_screen = full_screen;
        self.cache.invalidate_static();
    }

    /// Replace data and display mode; always drops both caches.
    pub fn set_data(&mut self, sample: SpectrumSample, mode: DisplayMode) {
        self.data = Some(sample);
        self.view.display_mode = mode;
        self.cache.invalidate_all();
    }

    /// Hover frequency (Hz). Drawn uncached, so no cache is touched. Non-finite values clear the hover.
    pub fn set_mouse_frequency(&mut self, freq: Option<f64>) {
        self.view.mouse_frequency = freq.filter(|f| f.is_finite());
    }

    pub fn set_filter_config(&mut self, config: FilterConfig) {
        self.config = config;
        self.cache.invalidate_static();
    }

    /// Render current state to the live surface, rebuilding the static layer only if stale.
    ///
    /// On error the stale cache stays invalid, so the next call retries.
    pub fn draw(&mut self) -> PlotResult<()> {
        if !self.cache.static_layer.is_valid() {
            self.rebuild_static()?;
        }
        let (w, h) = self.surface.size();
        self.surface.clear();
        if let Some(layer) = self.cache.static_layer.get_mut() {
            self.surface.draw_layer(layer, Rect::from_ltwh(0.0, 0.0, w as f32, h as f32));
        }
        self.draw_uncached()?;
        self.stats.draws += 1;
        Ok(())
    }

    pub fn view(&self) -> &ViewState { &self.view }
    pub fn data(&self) -> Option<&SpectrumSample> { self.data.as_ref() }
    pub fn config(&self) -> &FilterConfig { &self.config }
    pub fn options(&self) -> &PlotOptions { &self.options }
    pub fn stats(&self) -> RenderStats { self.stats }
    pub fn cache_state(&self) -> (StaticState, HeatmapState) { self.cache.state() }
    /// The cached heat map, if currently valid.
    pub fn heatmap(&self) -> Option<&RasterImage> { self.cache.heatmap.get() }
    pub fn surface(&self) -> &S { &self.surface }
    pub fn surface_mut(&mut self) -> &mut S { &mut self.surface }
    pub fn into_surface(self) -> S { self.surface }

    fn rebuild_static(&mut self) -> PlotResult<()> {
        let data = self.data.as_ref().ok_or_else(|| PlotError::degenerate("no spectrum data supplied"))?;
        let mode = self.view.display_mode;
        data.validate(mode)?;

        if mode == DisplayMode::FrequencyVsThrottle && !self.cache.heatmap.is_valid() {
            let image = heatmap::generate(data, self.view.zoom_y, &self.options.heatmap)?;
            log::debug!("heat map rebuilt ({}x{}, zoom_y {})", image.width, image.height, self.view.zoom_y);
            self.cache.heatmap.store(image);
            self.stats.heatmap_rebuilds += 1;
        }

        let (w, h) = self.surface.size();
        let mut layer = self.surface.offscreen(w, h)?;
        let painter = StaticPainter {
            view: &self.view,
            data,
            config: &self.config,
            options: &self.options,
            labeler: self.labeler(),
        };
        match mode {
            DisplayMode::Frequency => painter.paint_frequency(&mut layer)?,
            DisplayMode::FrequencyVsThrottle => {
                let image = self
                    .cache
                    .heatmap
                    .get()
                    .ok_or_else(|| PlotError::invalid_data("heat map unavailable"))?;
                painter.paint_frequency_vs_throttle(&mut layer, image)?;
            }
        }

        self.cache.static_layer.store(layer);
        self.stats.static_rebuilds += 1;
        log::debug!("static layer rebuilt ({w}x{h}, {mode:?})");
        Ok(())
    }

    /// Elements that follow the mouse; never cached. Suppressed in heat-map mode.
    fn draw_uncached(&mut self) -> PlotResult<()> {
        let (Some(freq), Some(data)) = (self.view.mouse_frequency, self.data.as_ref()) else {
            return Ok(());
        };
        if self.view.display_mode == DisplayMode::FrequencyVsThrottle {
            return Ok(());
        }
        let (w, h) = self.surface.size();
        let margin = self.options.margins.plot;
        let labeler = self.labeler();
        let painter = MarkerPainter {
            scale: FrequencyScale::new(0.0, w as f32, data.black_box_rate, self.view.zoom_x)?,
            bottom: h as f32 - margin,
            margin,
            default_line_width: self.options.marker_line_width,
            labeler: &labeler,
        };
        painter.draw(&mut self.surface, &mouse_marker(freq, &self.options.theme));
        Ok(())
    }

    fn labeler(&self) -> Labeler {
        Labeler { font: self.options.font, color: self.options.theme.label, full_screen: self.view.full_screen }
    }
}

// ---- static layer painting --------------------------------------------------

struct StaticPainter<'a> {
    view: &'a ViewState,
    data: &'a SpectrumSample,
    config: &'a FilterConfig,
    options: &'a PlotOptions,
    labeler: Labeler,
}

impl StaticPainter<'_> {
    /// Background, bars, field label, frequency grid and filter markers.
    fn paint_frequency(&self, canvas: &mut impl Canvas) -> PlotResult<()> {
        let magnitudes = self.data.flat_magnitudes()?;
        let (w, h) = canvas.size();
        let margin = self.options.margins.plot;
        let area = plot_area(0.0, 0.0, w as f32, h as f32 - margin)?;
        let theme = &self.options.theme;
        let full_screen = self.view.full_screen;

        // background
        let bg_height = area.height + if full_screen { margin } else { 0.0 };
        let (top, bottom) = theme.background_for(full_screen);
        let background = LinearGradient::new((0.0, 0.0), (0.0, bg_height))
            .add_color_stop(1.0, bottom)
            .add_color_stop(0.0, top);
        canvas.fill_rect(Rect::from_ltwh(0.0, 0.0, area.width, bg_height), &Fill::Linear(background));

        // bars, one per BINS_PER_BAR bins of the zoomed range
        let plotted_len = self.data.fft_length as f64 / self.view.zoom_x;
        let bar_width = (area.width as f64 / (plotted_len / BINS_PER_BAR as f64) - 1.0) as f32;
        let mut gradient = LinearGradient::new((0.0, area.height), (0.0, 0.0));
        for (level, color) in BAR_STOP_LEVELS.iter().zip(theme.bar_stops) {
            gradient = gradient.add_color_stop(clamp(level / self.view.zoom_y, 0.0, 1.0) as f32, color);
        }
        let bar_fill = Fill::Linear(gradient);
        let mut x = 0.0f32;
        for value in magnitudes.iter().step_by(BINS_PER_BAR).take(bar_count(plotted_len)) {
            let bar_height = magnitude_to_bar_height(*value, area.height as f64, self.view.zoom_y) as f32;
            canvas.fill_rect(Rect::from_ltwh(x, area.height - bar_height, bar_width, bar_height), &bar_fill);
            x += bar_width + 1.0;
        }

        self.paint_field_label(canvas, area);
        let span = self.view.visible_span_hz(self.data.black_box_rate);
        draw_frequency_grid(canvas, area, span, area.bottom() + margin, theme.grid, &self.labeler);

        let scale = FrequencyScale::new(area.left, area.width, self.data.black_box_rate, self.view.zoom_x)?;
        let painter = MarkerPainter {
            scale,
            bottom: area.bottom(),
            margin,
            default_line_width: self.options.marker_line_width,
            labeler: &self.labeler,
        };
        let markers = layout_markers(self.config, self.data.field_name(), self.data.max_noise_idx, theme);
        for marker in &markers {
            painter.draw(canvas, marker);
        }
        Ok(())
    }

    /// Cropped heat map, field label, frequency and throttle grids. No filter markers.
    fn paint_frequency_vs_throttle(&self, canvas: &mut impl Canvas, image: &RasterImage) -> PlotResult<()> {
        let (w, h) = canvas.size();
        let margins = &self.options.margins;
        let left = margins.left_for(self.view.full_screen);
        let area = plot_area(left, 0.0, w as f32 - left, h as f32 - margins.bottom)?;

        canvas.draw_image(image, heatmap::visible_source(image, self.view.zoom_x), area.rect());

        self.paint_field_label(canvas, area);
        let span = self.view.visible_span_hz(self.data.black_box_rate);
        draw_frequency_grid(canvas, area, span, area.bottom() + margins.bottom, self.options.theme.grid, &self.labeler);
        draw_throttle_grid(canvas, area, self.options.theme.grid, &self.labeler);
        Ok(())
    }

    fn paint_field_label(&self, canvas: &mut impl Canvas, area: PlotArea) {
        if let Some(name) = self.data.field_name() {
            self.labeler.draw(
                canvas,
                name,
                area.right() - 4.0,
                area.bottom() - 6.0,
                TextAlign::Right,
                TextBaseline::Alphabetic,
            );
        }
    }
}

/// Bars for `plotted_len` (possibly fractional) bins: indices 0, 10, 20, ... below it.
fn bar_count(plotted_len: f64) -> usize {
    (plotted_len / BINS_PER_BAR as f64).ceil().max(0.0) as usize
}

fn plot_area(left: f32, top: f32, width: f32, height: f32) -> PlotResult<PlotArea> {
    if width <= 0.0 || height <= 0.0 {
        return Err(PlotError::degenerate(format!("plot area {width}x{height} leaves no room to draw")));
    }
    Ok(PlotArea { left, top, width, height })
}
