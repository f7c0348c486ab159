// File: crates/demo/src/main.rs
// Summary: Demo loads spectrum CSV (+ optional filter JSON) and renders bar, zoomed, full-screen, hover and heat-map PNGs.

use anyhow::{Context, Result};
use spectrum_core::types::{HEIGHT, THROTTLE_BINS, WIDTH};
use spectrum_core::{DisplayMode, FilterConfig, PlotOptions, SpectrumPlot, SpectrumSample};
use spectrum_render_skia::SkiaSurface;
use std::path::{Path, PathBuf};

/// One CSV record: metadata columns followed by magnitude bins.
struct Row {
    field_name: String,
    black_box_rate: f64,
    max_noise_hz: Option<f64>,
    bins: Vec<f64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Usage: spectrum-demo [spectrum.csv] [filters.json]
    let mut args = std::env::args().skip(1);
    let csv_path = args.next().map(PathBuf::from);
    let json_path = args.next().map(PathBuf::from);

    let rows = match &csv_path {
        Some(p) => load_spectrum_csv(p).with_context(|| format!("failed to load CSV '{}'", p.display()))?,
        None => {
            log::info!("no input given; using a synthetic spectrum");
            synthetic_rows()
        }
    };
    if rows.is_empty() {
        anyhow::bail!("no spectrum rows loaded; check headers/delimiter.");
    }
    log::info!("Loaded {} row(s) of {} bins", rows.len(), rows[0].bins.len());

    let config = match &json_path {
        Some(p) => load_filter_config(p)?,
        None => demo_filter_config(),
    };

    let mut opts = PlotOptions::default();
    if let Ok(name) = std::env::var("SPECTRUM_THEME") {
        opts.theme = spectrum_core::theme::find(&name);
        log::info!("theme: {}", opts.theme.name);
    }

    let stem = csv_path.as_deref().unwrap_or(Path::new("synthetic"));
    let bar_sample = average_sample(&rows);
    let mut plot = SpectrumPlot::with_options(SkiaSurface::new(WIDTH, HEIGHT)?, config, opts);

    // 1) Bars
    plot.set_data(bar_sample, DisplayMode::Frequency);
    plot.draw()?;
    write(&mut plot, stem, "bars")?;

    // 2) Hover marker over the cached frame
    let rate = rows[0].black_box_rate;
    plot.set_mouse_frequency(Some(rate / 8.0));
    plot.draw()?;
    write(&mut plot, stem, "hover")?;
    plot.set_mouse_frequency(None);

    // 3) Zoomed into the low band
    plot.set_zoom(4.0, 2.0)?;
    plot.draw()?;
    write(&mut plot, stem, "zoom")?;
    plot.set_zoom(1.0, 1.0)?;

    // 4) Full screen at a larger size
    plot.set_size(WIDTH * 3 / 2, HEIGHT * 3 / 2)?;
    plot.set_full_screen(true);
    plot.draw()?;
    write(&mut plot, stem, "fullscreen")?;
    plot.set_full_screen(false);
    plot.set_size(WIDTH, HEIGHT)?;

    // 5) Heat map, only when the CSV carries a full throttle grid
    if rows.len() == THROTTLE_BINS {
        plot.set_data(grid_sample(&rows), DisplayMode::FrequencyVsThrottle);
        plot.draw()?;
        write(&mut plot, stem, "heatmap")?;
        plot.set_zoom(2.0, 1.0)?;
        plot.draw()?;
        write(&mut plot, stem, "heatmap_zoom")?;
    } else {
        log::info!("{} row(s) is not a {THROTTLE_BINS}-row throttle grid; heat map skipped", rows.len());
    }

    let stats = plot.stats();
    log::info!(
        "draws {}, static rebuilds {}, heat map rebuilds {}",
        stats.draws,
        stats.static_rebuilds,
        stats.heatmap_rebuilds
    );
    Ok(())
}

fn write(plot: &mut SpectrumPlot<SkiaSurface>, input: &Path, suffix: &str) -> Result<()> {
    let out = out_name_with(input, suffix);
    plot.surface_mut().write_png(&out)?;
    println!("Wrote {}", out.display());
    Ok(())
}

/// Produce output file name like target/out/spectrum_<stem>_<suffix>.png
fn out_name_with(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("spectrum");
    let mut out = PathBuf::from("target/out");
    std::fs::create_dir_all(&out).ok();
    out.push(format!("spectrum_{stem}_{suffix}.png"));
    out
}

/// Load a spectrum CSV with columns `field`, `rate`, `max_noise` (optional) and one column per bin.
fn load_spectrum_csv(path: &Path) -> Result<Vec<Row>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>();
    log::debug!("Headers: {:?}", headers);
    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
    let i_field = idx(&["field", "field_name"]);
    let i_rate = idx(&["rate", "black_box_rate", "sample_rate"]).context("missing rate column")?;
    let i_noise = idx(&["max_noise", "max_noise_hz"]);
    let meta: Vec<usize> = [i_field, Some(i_rate), i_noise].into_iter().flatten().collect();

    let mut out = Vec::new();
    for (n, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let rate = rec
            .get(i_rate)
            .and_then(|s| s.parse::<f64>().ok())
            .with_context(|| format!("row {n}: bad rate"))?;
        let bins = rec
            .iter()
            .enumerate()
            .filter(|(i, _)| !meta.contains(i))
            .map(|(i, s)| s.parse::<f64>().with_context(|| format!("row {n}, column {i}: '{s}'")))
            .collect::<Result<Vec<f64>>>()?;
        out.push(Row {
            field_name: i_field.and_then(|i| rec.get(i)).unwrap_or_default().to_string(),
            black_box_rate: rate,
            max_noise_hz: i_noise.and_then(|i| rec.get(i)).and_then(|s| s.parse().ok()),
            bins,
        });
    }
    Ok(out)
}

fn load_filter_config(path: &Path) -> Result<FilterConfig> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let cfg = serde_json::from_str(&text).with_context(|| format!("parsing filter config {}", path.display()))?;
    log::info!("filter config from {}", path.display());
    Ok(cfg)
}

fn demo_filter_config() -> FilterConfig {
    FilterConfig {
        gyro_lowpass_dyn_hz: Some([200.0, 500.0]),
        gyro_lowpass2_hz: Some(250.0),
        dterm_lpf_hz: Some(100.0),
        dterm_notch_hz: Some(260.0),
        dterm_notch_cutoff: Some(160.0),
        yaw_lpf_hz: Some(100.0),
        ..FilterConfig::default()
    }
}

/// Throttle-averaged magnitudes for bar mode.
fn average_sample(rows: &[Row]) -> SpectrumSample {
    let len = rows.iter().map(|r| r.bins.len()).min().unwrap_or(0);
    let mut avg = vec![0.0; len];
    for r in rows {
        for (a, m) in avg.iter_mut().zip(&r.bins) {
            *a += m / rows.len() as f64;
        }
    }
    let first = &rows[0];
    let sample = SpectrumSample::flat(first.field_name.clone(), first.black_box_rate, avg);
    match first.max_noise_hz {
        Some(hz) => sample.with_max_noise(hz),
        None => sample,
    }
}

fn grid_sample(rows: &[Row]) -> SpectrumSample {
    let first = &rows[0];
    SpectrumSample::grid(first.field_name.clone(), first.black_box_rate, rows.iter().map(|r| r.bins.clone()).collect())
}

/// Motor noise peak that rises with throttle over a decaying floor.
fn synthetic_rows() -> Vec<Row> {
    let bins = 1024usize;
    (0..THROTTLE_BINS)
        .map(|j| {
            let peak = 40 + j * 3;
            let bins = (0..bins)
                .map(|i| {
                    let floor = 0.4 / (1.0 + i as f64 * 0.02);
                    let d = i as f64 - peak as f64;
                    floor + 1.2 * (-(d * d) / 40.0).exp()
                })
                .collect();
            Row { field_name: "gyroADC[0]".into(), black_box_rate: 4000.0, max_noise_hz: Some(212.0), bins }
        })
        .collect()
}
