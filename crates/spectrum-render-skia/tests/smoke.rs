// File: crates/spectrum-render-skia/tests/smoke.rs
// Purpose: End-to-end bar and heat-map renders through Skia, written as PNGs.

use spectrum_core::{DisplayMode, FilterConfig, SpectrumPlot, SpectrumSample};
use spectrum_render_skia::SkiaSurface;

fn config() -> FilterConfig {
    FilterConfig {
        gyro_lowpass_hz: Some(150.0),
        dterm_lpf_hz: Some(90.0),
        ..FilterConfig::default()
    }
}

#[test]
fn render_bar_mode_png() {
    let mags: Vec<f64> = (0..256).map(|i| ((i as f64) * 0.1).sin().abs() * 30.0).collect();
    let mut plot = SpectrumPlot::initialize(SkiaSurface::new(640, 320).expect("surface"), config());
    plot.set_data(SpectrumSample::flat("gyroADC[0]", 2000.0, mags).with_max_noise(240.0), DisplayMode::Frequency);
    plot.set_mouse_frequency(Some(500.0));
    plot.draw().expect("draw should succeed");

    let out = std::path::PathBuf::from("target/test_out/smoke_bars.png");
    plot.surface_mut().write_png(&out).expect("write png");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    let bytes = plot.surface_mut().to_png_bytes().expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn render_heatmap_mode_png() {
    let rows: Vec<Vec<f64>> = (0..100).map(|j| (0..128).map(|i| if i == j { 1.3 } else { 0.1 }).collect()).collect();
    let mut plot = SpectrumPlot::initialize(SkiaSurface::new(480, 240).expect("surface"), config());
    plot.set_data(SpectrumSample::grid("gyroADC[1]", 2000.0, rows), DisplayMode::FrequencyVsThrottle);
    plot.set_zoom(2.0, 1.0).expect("zoom");
    plot.draw().expect("draw should succeed");
    assert_eq!(plot.stats().heatmap_rebuilds, 1);

    let out = std::path::PathBuf::from("target/test_out/smoke_heatmap.png");
    plot.surface_mut().write_png(&out).expect("write png");
    assert!(std::fs::metadata(&out).expect("output exists").len() > 0);
}
