// File: crates/spectrum-core/tests/cache.rs
// Purpose: Cache state machine of SpectrumPlot: invalidation triggers, reuse, retry after failure.

use spectrum_core::{
    DisplayMode, FilterConfig, HeatmapState, PlotError, RecordingSurface, SpectrumPlot, SpectrumSample, StaticState,
};

fn bar_sample() -> SpectrumSample {
    let mags = (0..256).map(|i| (i % 37) as f64).collect();
    SpectrumSample::flat("gyroADC[0]", 2000.0, mags).with_max_noise(180.0)
}

fn grid_sample() -> SpectrumSample {
    let rows = (0..100).map(|j| (0..128).map(|i| ((i * j) % 13) as f64 * 0.1).collect()).collect();
    SpectrumSample::grid("gyroADC[0]", 2000.0, rows)
}

fn plot() -> SpectrumPlot<RecordingSurface> {
    SpectrumPlot::initialize(RecordingSurface::new(640, 320), FilterConfig::default())
}

#[test]
fn mouse_only_changes_reuse_static_layer() {
    let mut p = plot();
    p.set_data(bar_sample(), DisplayMode::Frequency);
    p.draw().unwrap();
    assert_eq!(p.stats().static_rebuilds, 1);

    for f in [10.0, 250.0, 999.0] {
        p.set_mouse_frequency(Some(f));
        p.draw().unwrap();
    }
    p.set_mouse_frequency(None);
    p.draw().unwrap();

    assert_eq!(p.stats().static_rebuilds, 1);
    assert_eq!(p.stats().draws, 5);
    assert_eq!(p.surface().layers_allocated(), 1);
}

#[test]
fn mouse_marker_drawn_every_call_on_top() {
    let mut p = plot();
    p.set_data(bar_sample(), DisplayMode::Frequency);
    p.set_mouse_frequency(Some(500.0));
    p.draw().unwrap();
    let first = p.surface().ops().to_vec();
    p.draw().unwrap();
    assert_eq!(p.surface().ops(), &first[..]);
    assert_eq!(p.surface().texts().last().map(String::as_str), Some("500Hz"));
}

#[test]
fn non_finite_hover_frequency_draws_no_marker() {
    let mut p = plot();
    p.set_data(bar_sample(), DisplayMode::Frequency);
    p.draw().unwrap();
    let plain = p.surface().ops().to_vec();

    for f in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        p.set_mouse_frequency(Some(f));
        assert_eq!(p.view().mouse_frequency, None);
        p.draw().unwrap();
        assert_eq!(p.surface().ops(), &plain[..]);
    }
    assert_eq!(p.stats().static_rebuilds, 1);
}

#[test]
fn set_data_invalidates_both_caches() {
    let mut p = plot();
    p.set_data(grid_sample(), DisplayMode::FrequencyVsThrottle);
    p.draw().unwrap();
    assert_eq!(p.cache_state(), (StaticState::StaticCacheValid, HeatmapState::HeatmapCacheValid));

    p.set_data(grid_sample(), DisplayMode::FrequencyVsThrottle);
    assert_eq!(p.cache_state(), (StaticState::NoStaticCache, HeatmapState::NoHeatmapCache));
    p.draw().unwrap();
    assert_eq!(p.stats().heatmap_rebuilds, 2);
    assert_eq!(p.stats().static_rebuilds, 2);
}

#[test]
fn resize_and_fullscreen_keep_heatmap() {
    let mut p = plot();
    p.set_data(grid_sample(), DisplayMode::FrequencyVsThrottle);
    p.draw().unwrap();

    p.set_size(800, 400).unwrap();
    assert_eq!(p.cache_state(), (StaticState::NoStaticCache, HeatmapState::HeatmapCacheValid));
    p.draw().unwrap();
    p.set_full_screen(true);
    p.draw().unwrap();

    assert_eq!(p.stats().heatmap_rebuilds, 1);
    assert_eq!(p.stats().static_rebuilds, 3);
}

#[test]
fn zoom_x_keeps_heatmap_zoom_y_drops_it() {
    let mut p = plot();
    p.set_data(grid_sample(), DisplayMode::FrequencyVsThrottle);
    p.draw().unwrap();

    p.set_zoom(4.0, 1.0).unwrap();
    assert_eq!(p.cache_state(), (StaticState::NoStaticCache, HeatmapState::HeatmapCacheValid));
    p.draw().unwrap();
    assert_eq!(p.stats().heatmap_rebuilds, 1);

    p.set_zoom(4.0, 2.0).unwrap();
    assert_eq!(p.cache_state(), (StaticState::NoStaticCache, HeatmapState::NoHeatmapCache));
    p.draw().unwrap();
    assert_eq!(p.stats().heatmap_rebuilds, 2);
}

#[test]
fn rejected_zoom_leaves_state_untouched() {
    let mut p = plot();
    p.set_data(bar_sample(), DisplayMode::Frequency);
    p.draw().unwrap();
    assert!(matches!(p.set_zoom(0.0, 1.0), Err(PlotError::DegenerateInput(_))));
    assert!(p.set_size(0, 10).is_err());
    assert_eq!(p.cache_state().0, StaticState::StaticCacheValid);
    assert_eq!(p.view().zoom_x, 1.0);
    assert_eq!(p.view().width, 640);
}

#[test]
fn failed_rebuild_leaves_cache_invalid_and_retries() {
    let mut p = plot();
    let mut bad = bar_sample();
    bad.fft_length = 300;
    p.set_data(bad, DisplayMode::Frequency);
    assert!(matches!(p.draw(), Err(PlotError::InvalidSpectrumData(_))));
    assert_eq!(p.cache_state().0, StaticState::NoStaticCache);
    assert_eq!(p.stats().draws, 0);

    p.set_data(bar_sample(), DisplayMode::Frequency);
    p.draw().unwrap();
    assert_eq!(p.cache_state().0, StaticState::StaticCacheValid);
}

#[test]
fn surface_failure_is_retried_on_next_draw() {
    let mut p = plot();
    p.set_data(bar_sample(), DisplayMode::Frequency);
    p.surface_mut().set_fail_offscreen(true);
    assert!(matches!(p.draw(), Err(PlotError::Surface(_))));
    assert_eq!(p.cache_state().0, StaticState::NoStaticCache);

    p.surface_mut().set_fail_offscreen(false);
    p.draw().unwrap();
    assert_eq!(p.stats().static_rebuilds, 1);
}

#[test]
fn draw_without_data_is_degenerate() {
    let mut p = plot();
    assert!(matches!(p.draw(), Err(PlotError::DegenerateInput(_))));
}

#[test]
fn zero_rate_is_degenerate_not_garbage() {
    let mut p = plot();
    p.set_data(SpectrumSample::flat("gyroADC[0]", 0.0, vec![1.0; 64]), DisplayMode::Frequency);
    assert!(matches!(p.draw(), Err(PlotError::DegenerateInput(_))));
    assert!(p.surface().ops().is_empty());
}

#[test]
fn identical_inputs_give_identical_output() {
    let render = || {
        let mut p = plot();
        p.set_zoom(2.0, 1.5).unwrap();
        p.set_data(bar_sample(), DisplayMode::Frequency);
        p.set_mouse_frequency(Some(321.0));
        p.draw().unwrap();
        p.into_surface().take_ops()
    };
    assert_eq!(render(), render());
}

#[test]
fn independent_instances_share_nothing() {
    let mut a = plot();
    let mut b = plot();
    a.set_data(bar_sample(), DisplayMode::Frequency);
    b.set_data(grid_sample(), DisplayMode::FrequencyVsThrottle);
    a.draw().unwrap();
    b.draw().unwrap();
    a.set_zoom(1.0, 3.0).unwrap();
    assert_eq!(b.cache_state(), (StaticState::StaticCacheValid, HeatmapState::HeatmapCacheValid));
    assert_eq!(a.surface().layers_allocated(), 1);
    assert_eq!(b.surface().layers_allocated(), 1);
}
