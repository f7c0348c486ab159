// File: crates/spectrum-render-skia/src/text.rs
// Summary: Text shaper using Skia textlayout; places labels by canvas-style align/baseline.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle as SkTextStyle};
use spectrum_core::{TextAlign, TextBaseline, TextStyle};

use crate::surface::to_sk_color;

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    /// Families from a CSS-like face list, e.g. "Verdana, Arial, sans-serif".
    fn families(face: &str) -> Vec<&str> {
        face.split(',').map(str::trim).filter(|f| !f.is_empty()).collect()
    }

    fn make_style(style: &TextStyle) -> SkTextStyle {
        let mut ts = SkTextStyle::new();
        ts.set_font_size(style.size_px().max(1.0));
        ts.set_color(to_sk_color(style.color));
        ts.set_font_families(Self::families(style.font_face).as_slice());
        ts
    }

    pub fn layout(&self, text: &str, style: &TextStyle) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(style));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, style: &TextStyle) -> f32 {
        // width of the longest line
        self.layout(text, style).longest_line()
    }

    /// Draw `text` anchored at (x, y) the way a 2-D canvas context would.
    pub fn draw(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, style: &TextStyle) {
        let mut p = self.layout(text, style);
        let (dx, dy) = anchor_offset(p.longest_line(), p.height(), p.alphabetic_baseline(), style);
        // Paragraph paints from its top-left corner
        p.paint(canvas, (x + dx, y + dy));
    }
}

/// Offset from the anchor point to the paragraph's top-left corner.
fn anchor_offset(width: f32, height: f32, baseline: f32, style: &TextStyle) -> (f32, f32) {
    let dx = match style.align {
        TextAlign::Left => 0.0,
        TextAlign::Center => -width / 2.0,
        TextAlign::Right => -width,
    };
    let dy = match style.baseline {
        TextBaseline::Top => 0.0,
        TextBaseline::Middle => -height / 2.0,
        TextBaseline::Alphabetic => -baseline,
        TextBaseline::Bottom => -height,
    };
    (dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spectrum_core::Color;

    fn style(align: TextAlign, baseline: TextBaseline) -> TextStyle {
        TextStyle {
            font_face: "Verdana, Arial, sans-serif",
            size_pt: 6.0,
            color: Color::from_argb(255, 255, 255, 255),
            align,
            baseline,
        }
    }

    #[test]
    fn face_list_splits_into_families() {
        assert_eq!(TextShaper::families("Verdana, Arial, sans-serif"), vec!["Verdana", "Arial", "sans-serif"]);
        assert_eq!(TextShaper::families(" mono ,"), vec!["mono"]);
    }

    #[test]
    fn anchors_follow_canvas_conventions() {
        assert_eq!(anchor_offset(40.0, 10.0, 8.0, &style(TextAlign::Right, TextBaseline::Alphabetic)), (-40.0, -8.0));
        assert_eq!(anchor_offset(40.0, 10.0, 8.0, &style(TextAlign::Center, TextBaseline::Middle)), (-20.0, -5.0));
        assert_eq!(anchor_offset(40.0, 10.0, 8.0, &style(TextAlign::Left, TextBaseline::Top)), (0.0, 0.0));
        assert_eq!(anchor_offset(40.0, 10.0, 8.0, &style(TextAlign::Left, TextBaseline::Bottom)), (0.0, -10.0));
    }
}
