// File: crates/spectrum-core/src/heatmap.rs
// Summary: Builds the frequency-vs-throttle magnitude image at data resolution, plus its blur pass.

use crate::error::PlotResult;
use crate::geometry::{clamp, Rect};
use crate::scale::throttle_to_y;
use crate::spectrum::SpectrumSample;
use crate::surface::RasterImage;
use crate::theme::Color;
use crate::types::THROTTLE_BINS;

/// Magnitude that maps to full lightness at zoom 1. Tuned by eye so the default
/// heat map matches the bar chart's dynamic range; not derived from anything.
pub const SCALE_HEATMAP: f64 = 1.3;
/// Blur standard deviation in pixels.
pub const BLUR_FILTER_PIXEL: f32 = 1.0;
/// Heat-map hue (red), degrees.
const HUE: f32 = 360.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeatmapOptions {
    pub scale: f64,
    pub blur_px: f32,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self { scale: SCALE_HEATMAP, blur_px: BLUR_FILTER_PIXEL }
    }
}

/// Lightness percentage (0..=100) for a magnitude at the given Y zoom.
pub fn lightness_percent(magnitude: f64, zoom_y: f64, scale: f64) -> u8 {
    let v = (magnitude * 100.0 / (zoom_y * scale)).round();
    if v.is_nan() { 0 } else { clamp(v, 0.0, 100.0) as u8 }
}

/// Render the sample's throttle grid into a `fft_length` x 100 image.
///
/// Fails without producing anything when the grid is absent or ragged.
pub fn generate(sample: &SpectrumSample, zoom_y: f64, opts: &HeatmapOptions) -> PlotResult<RasterImage> {
    let rows = sample.grid_magnitudes()?;
    let width = sample.fft_length as u32;
    let mut image = RasterImage::new(width, THROTTLE_BINS as u32);

    // 101 possible lightness levels; resolve each colour once
    let palette: Vec<Color> = (0..=100).map(|l| Color::from_hsl(HUE, 1.0, l as f32 / 100.0)).collect();

    for (j, row) in rows.iter().enumerate() {
        let y = throttle_to_y(j, THROTTLE_BINS as f64) as u32;
        for (i, &m) in row.iter().enumerate() {
            let l = lightness_percent(m, zoom_y, opts.scale);
            image.set_pixel(i as u32, y, palette[l as usize]);
        }
    }

    gaussian_blur(&mut image, opts.blur_px);
    Ok(image)
}

/// Source rectangle of the cached image visible at `zoom_x`: the left `width / zoom_x` columns.
pub fn visible_source(image: &RasterImage, zoom_x: f64) -> Rect {
    Rect::from_ltwh(0.0, 0.0, (image.width as f64 / zoom_x) as f32, image.height as f32)
}

fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (sigma * 3.0).ceil() as i32;
    let denom = 2.0 * sigma * sigma;
    let mut k: Vec<f32> = (-radius..=radius).map(|i| (-((i * i) as f32) / denom).exp()).collect();
    let sum: f32 = k.iter().sum();
    k.iter_mut().for_each(|w| *w /= sum);
    k
}

/// Separable Gaussian over RGB with clamp-to-edge sampling; alpha is untouched.
pub fn gaussian_blur(image: &mut RasterImage, sigma: f32) {
    if sigma.is_nan() || sigma <= 0.0 || image.width == 0 || image.height == 0 {
        return;
    }
    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as i64;
    let (w, h) = (image.width as i64, image.height as i64);

    let src: Vec<f32> = image.pixels.iter().map(|&b| b as f32).collect();
    let mut tmp = src.clone();
    let at = |x: i64, y: i64| ((y * w + x) * 4) as usize;

    // horizontal pass
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f32; 3];
            for (k, wgt) in kernel.iter().enumerate() {
                let sx = clamp(x + k as i64 - radius, 0, w - 1);
                let i = at(sx, y);
                for c in 0..3 {
                    acc[c] += src[i + c] * wgt;
                }
            }
            tmp[at(x, y)..at(x, y) + 3].copy_from_slice(&acc);
        }
    }
    // vertical pass
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f32; 3];
            for (k, wgt) in kernel.iter().enumerate() {
                let sy = clamp(y + k as i64 - radius, 0, h - 1);
                let i = at(x, sy);
                for c in 0..3 {
                    acc[c] += tmp[i + c] * wgt;
                }
            }
            let o = at(x, y);
            for c in 0..3 {
                image.pixels[o + c] = clamp(acc[c].round(), 0.0, 255.0) as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlotError;

    fn grid(fill: impl Fn(usize, usize) -> f64, bins: usize) -> SpectrumSample {
        let rows = (0..THROTTLE_BINS).map(|j| (0..bins).map(|i| fill(j, i)).collect()).collect();
        SpectrumSample::grid("gyroADC[0]", 4000.0, rows)
    }

    #[test]
    fn lightness_clamps_and_rounds() {
        assert_eq!(lightness_percent(0.0, 1.0, SCALE_HEATMAP), 0);
        assert_eq!(lightness_percent(1.3, 1.0, SCALE_HEATMAP), 100);
        assert_eq!(lightness_percent(50.0, 1.0, SCALE_HEATMAP), 100);
        assert_eq!(lightness_percent(0.65, 1.0, SCALE_HEATMAP), 50);
        assert_eq!(lightness_percent(0.65, 2.0, SCALE_HEATMAP), 25);
        assert_eq!(lightness_percent(-4.0, 1.0, SCALE_HEATMAP), 0);
        assert_eq!(lightness_percent(f64::NAN, 1.0, SCALE_HEATMAP), 0);
    }

    #[test]
    fn image_has_data_resolution_and_is_opaque() {
        let img = generate(&grid(|_, _| 0.3, 64), 1.0, &HeatmapOptions::default()).unwrap();
        assert_eq!((img.width, img.height), (64, 100));
        assert!(img.pixels.chunks(4).all(|p| p[3] == 255));
    }

    #[test]
    fn throttle_zero_lands_on_bottom_row() {
        let opts = HeatmapOptions { blur_px: 0.0, ..HeatmapOptions::default() };
        let img = generate(&grid(|j, _| if j == 0 { 1.3 } else { 0.0 }, 8), 1.0, &opts).unwrap();
        assert_eq!(img.pixel(3, 99), Color::from_argb(255, 255, 255, 255));
        assert_eq!(img.pixel(3, 0), Color::from_argb(255, 0, 0, 0));
    }

    #[test]
    fn blur_spreads_a_single_hot_pixel() {
        let opts = HeatmapOptions::default();
        let img = generate(&grid(|j, i| if j == 50 && i == 4 { 1.3 } else { 0.0 }, 9), 1.0, &opts).unwrap();
        let centre = img.pixel(4, 49);
        let neighbour = img.pixel(5, 49);
        assert!(centre.r > neighbour.r && neighbour.r > 0);
        assert_eq!(img.pixel(0, 0).r, 0);
    }

    #[test]
    fn uniform_image_is_blur_invariant() {
        let mut img = RasterImage::new(5, 5);
        for y in 0..5 { for x in 0..5 { img.set_pixel(x, y, Color::from_argb(255, 200, 10, 10)); } }
        let before = img.clone();
        gaussian_blur(&mut img, 1.0);
        assert_eq!(img, before);
    }

    #[test]
    fn nan_blur_radius_leaves_image_untouched() {
        let opts = HeatmapOptions { blur_px: f32::NAN, ..HeatmapOptions::default() };
        let img = generate(&grid(|_, _| 1.3, 8), 1.0, &opts).unwrap();
        // full intensity is L = 100%, i.e. white
        assert_eq!(img.pixel(3, 50), Color::from_argb(255, 255, 255, 255));
    }

    #[test]
    fn ragged_grid_is_rejected() {
        let mut s = grid(|_, _| 0.0, 16);
        if let crate::spectrum::Magnitudes::Grid(rows) = &mut s.magnitudes { rows[3].truncate(2); }
        assert!(matches!(generate(&s, 1.0, &HeatmapOptions::default()), Err(PlotError::InvalidSpectrumData(_))));
    }

    #[test]
    fn visible_source_crops_by_zoom() {
        let img = RasterImage::new(256, 100);
        assert_eq!(visible_source(&img, 4.0), Rect::from_ltwh(0.0, 0.0, 64.0, 100.0));
    }
}
