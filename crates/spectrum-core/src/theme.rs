// File: crates/spectrum-core/src/theme.rs
// Summary: Backend-neutral colours and the named colour presets for plot rendering.

use crate::geometry::clamp;

/// Straight (non-premultiplied) RGBA colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::from_argb(0, 0, 0, 0);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }

    /// CSS-style `rgba()` with a fractional alpha in [0, 1].
    pub fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        let a = (clamp(alpha, 0.0, 1.0) * 255.0).round() as u8;
        Self { r, g, b, a }
    }

    /// Opaque colour from hue (degrees), saturation and lightness (both in [0, 1]).
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let s = clamp(saturation, 0.0, 1.0);
        let l = clamp(lightness, 0.0, 1.0);
        let h = hue.rem_euclid(360.0) / 60.0;
        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r1, g1, b1) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        let to_u8 = |v: f32| (clamp(v + m, 0.0, 1.0) * 255.0).round() as u8;
        Self { r: to_u8(r1), g: to_u8(g1), b: to_u8(b1), a: 255 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    /// Background gradient (top, bottom) when windowed.
    pub background: (Color, Color),
    /// Background gradient (top, bottom) when full screen.
    pub background_fullscreen: (Color, Color),
    /// Bar gradient stops at nominal magnitude 0, 15, 45 and 100.
    pub bar_stops: [Color; 4],
    pub grid: Color,
    pub label: Color,
    /// Fallback marker colour (also used by the yaw low-pass marker).
    pub marker_default: Color,
    pub gyro_lpf: Color,
    pub gyro_lpf2: Color,
    pub gyro_notch: Color,
    pub dterm_lpf: Color,
    pub dterm_lpf2: Color,
    pub dterm_notch: Color,
    pub max_noise: Color,
    pub mouse: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: (Color::rgba(255, 255, 255, 0.0), Color::rgba(255, 255, 255, 0.25)),
            background_fullscreen: (Color::rgba(0, 0, 0, 0.7), Color::rgba(0, 0, 0, 0.9)),
            bar_stops: [
                Color::rgba(0, 255, 0, 0.2),
                Color::rgba(128, 255, 0, 0.2),
                Color::rgba(255, 0, 0, 0.5),
                Color::rgba(255, 128, 128, 1.0),
            ],
            grid: Color::rgba(255, 255, 255, 0.25),
            label: Color::rgba(255, 255, 255, 0.9),
            marker_default: Color::rgba(128, 128, 255, 0.5),
            gyro_lpf: Color::rgba(94, 194, 98, 0.5),
            gyro_lpf2: Color::rgba(0, 172, 122, 0.5),
            gyro_notch: Color::rgba(0, 148, 134, 0.5),
            dterm_lpf: Color::rgba(0, 123, 132, 0.5),
            dterm_lpf2: Color::rgba(16, 97, 116, 0.5),
            dterm_notch: Color::rgba(47, 72, 88, 0.5),
            max_noise: Color::rgba(255, 0, 0, 0.5),
            mouse: Color::rgba(0, 255, 0, 0.5),
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: (Color::rgba(0, 0, 0, 0.8), Color::rgba(0, 0, 0, 1.0)),
            background_fullscreen: (Color::rgba(0, 0, 0, 1.0), Color::rgba(0, 0, 0, 1.0)),
            grid: Color::rgba(255, 255, 255, 0.5),
            label: Color::from_argb(255, 0xff, 0xff, 0xff),
            marker_default: Color::rgba(128, 128, 255, 0.9),
            gyro_lpf: Color::rgba(94, 194, 98, 0.9),
            gyro_lpf2: Color::rgba(0, 172, 122, 0.9),
            gyro_notch: Color::rgba(0, 148, 134, 0.9),
            dterm_lpf: Color::rgba(0, 123, 132, 0.9),
            dterm_lpf2: Color::rgba(16, 97, 116, 0.9),
            dterm_notch: Color::rgba(120, 150, 170, 0.9),
            max_noise: Color::rgba(255, 0, 0, 0.9),
            mouse: Color::rgba(0, 255, 0, 0.9),
            ..Self::dark()
        }
    }

    /// Background gradient endpoints for the given screen mode.
    pub fn background_for(&self, full_screen: bool) -> (Color, Color) {
        if full_screen { self.background_fullscreen } else { self.background }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::dark() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::high_contrast_dark()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::dark()
}
