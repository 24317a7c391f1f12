//! Cylindrical text rasterization.
//!
//! Every glyph of the label is placed along a shallow arc and tilted with it,
//! which reads as text printed on a cylinder seen from the front. The same
//! function feeds both the 2D composite and the 3D mesh texture.

use std::f32::consts::PI;
use std::sync::Arc;

use image::RgbaImage;
use tiny_skia::{FillRule, Paint, Pixmap, Transform};

use super::font::GlyphSource;
use super::style::CurveStyle;

/// Where one character of a label is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPlacement {
    pub ch: char,
    /// Anchor x in canvas pixels
    pub x: f32,
    /// Anchor y in canvas pixels (y down)
    pub y: f32,
    /// Rotation of the glyph's local frame, radians
    pub rotation: f32,
}

/// Lay out `text` along the arc described by `style`.
///
/// For `n` characters, character `i` sits at angle
/// `(i - n/2) * (PI / n) * curvature_factor`, offset by
/// `(sin(angle) * radius, cos(angle) * vertical_bend)` from the canvas center
/// and rotated by `angle * rotation_damping`. A single character uses angle 0.
pub fn layout_curved_glyphs(text: &str, style: &CurveStyle) -> Vec<GlyphPlacement> {
    let chars: Vec<char> = text.chars().collect();
    let (cx, cy) = style.center();

    let place = |ch: char, angle: f32| GlyphPlacement {
        ch,
        x: cx + angle.sin() * style.radius,
        y: cy + angle.cos() * style.vertical_bend,
        rotation: angle * style.rotation_damping,
    };

    match chars.as_slice() {
        [] => Vec::new(),
        [ch] => vec![place(*ch, 0.0)],
        _ => {
            let n = chars.len() as f32;
            let angle_step = PI / n * style.curvature_factor;
            chars
                .iter()
                .enumerate()
                .map(|(i, &ch)| place(ch, (i as f32 - n / 2.0) * angle_step))
                .collect()
        }
    }
}

/// An immutable rasterized label.
///
/// Cloning is cheap; the pixels are shared and never mutated. A new label
/// text always produces a new `LabelImage`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelImage {
    text: Arc<str>,
    image: Arc<RgbaImage>,
}

impl LabelImage {
    /// Fully transparent label of the given size.
    pub fn blank(text: &str, width: u32, height: u32) -> Self {
        Self::from_image(text, RgbaImage::new(width, height))
    }

    /// Wrap already rendered pixels.
    pub fn from_image(text: &str, image: RgbaImage) -> Self {
        Self {
            text: Arc::from(text),
            image: Arc::new(image),
        }
    }

    fn from_pixmap(text: &str, pixmap: &Pixmap) -> Self {
        Self::from_image(text, pixmap_to_rgba(pixmap))
    }

    /// The text this label was rendered from.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The rendered pixels (straight alpha RGBA8).
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Raw RGBA8 bytes, row major.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Whether no pixel has any coverage.
    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|p| p.0[3] == 0)
    }
}

/// Straight-alpha copy of a premultiplied tiny-skia pixmap.
pub(crate) fn pixmap_to_rgba(pixmap: &Pixmap) -> RgbaImage {
    let mut raw = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        raw.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), raw)
        .unwrap_or_else(|| RgbaImage::new(pixmap.width(), pixmap.height()))
}

/// Rasterize `text` with the cylindrical curvature effect.
///
/// Empty text yields a blank canvas. Characters without an outline advance
/// their slot on the arc but draw nothing. Identical inputs always produce
/// identical pixels.
pub fn render_curved_label(text: &str, style: &CurveStyle, glyphs: &dyn GlyphSource) -> LabelImage {
    let (width, height) = style.canvas_size();

    let placements = layout_curved_glyphs(text, style);
    if placements.is_empty() {
        return LabelImage::blank(text, width, height);
    }

    let Some(mut pixmap) = Pixmap::new(width, height) else {
        log::warn!("Cannot allocate {}x{} label canvas", width, height);
        return LabelImage::blank(text, width, height);
    };

    let mut paint = Paint::default();
    let [r, g, b, a] = style.color;
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;

    for placement in &placements {
        let Some(path) = glyphs.glyph_path(placement.ch, style.font_size) else {
            continue;
        };
        // Fresh transform per glyph: rotate about the anchor, then move there
        let transform = Transform::from_rotate(placement.rotation.to_degrees())
            .post_translate(placement.x, placement.y);
        pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
    }

    log::trace!("Rasterized label {:?} ({} glyphs)", text, placements.len());
    LabelImage::from_pixmap(text, &pixmap)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tiny_skia::{PathBuilder, Rect};

    /// Draws every non-space character as a solid box 0.5em wide, 1em tall.
    pub(crate) struct BlockGlyphs;

    impl GlyphSource for BlockGlyphs {
        fn glyph_path(&self, ch: char, px_size: f32) -> Option<tiny_skia::Path> {
            if ch.is_whitespace() {
                return None;
            }
            let w = px_size * 0.5;
            let rect = Rect::from_xywh(-w / 2.0, -px_size / 2.0, w, px_size)?;
            Some(PathBuilder::from_rect(rect))
        }
    }

    fn small_style() -> CurveStyle {
        CurveStyle {
            canvas_width: 256,
            canvas_height: 96,
            radius: 80.0,
            vertical_bend: 10.0,
            font_size: 20.0,
            ..CurveStyle::default()
        }
    }

    /// Bounding box `(min_x, min_y, max_x, max_y)` of pixels with alpha > 127.
    fn opaque_bounds(label: &LabelImage) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (x, y, p) in label.image().enumerate_pixels() {
            if p.0[3] > 127 {
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
        bounds
    }

    #[test]
    fn test_layout_empty_text() {
        assert!(layout_curved_glyphs("", &CurveStyle::default()).is_empty());
    }

    #[test]
    fn test_layout_single_char_is_centered_and_upright() {
        let style = CurveStyle::default();
        let (cx, cy) = style.center();
        let layout = layout_curved_glyphs("A", &style);
        assert_eq!(
            layout,
            vec![GlyphPlacement {
                ch: 'A',
                x: cx,
                y: cy + style.vertical_bend,
                rotation: 0.0,
            }]
        );
    }

    #[test]
    fn test_layout_follows_arc_formula() {
        let style = CurveStyle::default();
        let (cx, cy) = style.center();
        let layout = layout_curved_glyphs("abcd", &style);
        assert_eq!(layout.len(), 4);

        let step = PI / 4.0 * style.curvature_factor;
        for (i, p) in layout.iter().enumerate() {
            let angle = (i as f32 - 2.0) * step;
            assert!((p.x - (cx + angle.sin() * style.radius)).abs() < 1e-4);
            assert!((p.y - (cy + angle.cos() * style.vertical_bend)).abs() < 1e-4);
            assert!((p.rotation - angle * style.rotation_damping).abs() < 1e-6);
        }

        // Character at i == n/2 sits at the apex, unrotated
        assert_eq!(layout[2].rotation, 0.0);
        assert_eq!(layout[2].x, cx);
        // Left of center tilts the other way from right of center
        assert!(layout[0].rotation < 0.0 && layout[3].rotation > 0.0);
        assert!(layout[0].x < layout[1].x && layout[1].x < layout[2].x);
    }

    #[test]
    fn test_layout_counts_chars_not_bytes() {
        let layout = layout_curved_glyphs("Zoë", &CurveStyle::default());
        let chars: String = layout.iter().map(|p| p.ch).collect();
        assert_eq!(chars, "Zoë");
    }

    #[test]
    fn test_layout_long_text_stays_finite() {
        let text = "x".repeat(500);
        assert!(layout_curved_glyphs(&text, &CurveStyle::default())
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite() && p.rotation.is_finite()));
    }

    #[test]
    fn test_render_empty_text_is_blank() {
        let style = small_style();
        let label = render_curved_label("", &style, &BlockGlyphs);
        assert!(label.is_blank());
        assert_eq!((label.width(), label.height()), (256, 96));
        assert_eq!(label.text(), "");
    }

    #[test]
    fn test_render_whitespace_only_is_blank() {
        let label = render_curved_label("   ", &small_style(), &BlockGlyphs);
        assert!(label.is_blank());
    }

    #[test]
    fn test_render_single_glyph_centered_without_rotation() {
        let style = small_style();
        let label = render_curved_label("A", &style, &BlockGlyphs);
        let (x0, y0, x1, y1) = opaque_bounds(&label).expect("glyph drawn");

        let (cx, cy) = style.center();
        let mid_x = (x0 + x1 + 1) as f32 / 2.0;
        let mid_y = (y0 + y1 + 1) as f32 / 2.0;
        assert!((mid_x - cx).abs() <= 1.0, "mid_x {}", mid_x);
        assert!((mid_y - (cy + style.vertical_bend)).abs() <= 1.0, "mid_y {}", mid_y);

        // An unrotated 10x20 box keeps its size; a rotated one would grow
        assert!(((x1 - x0 + 1) as f32 - 10.0).abs() <= 1.0);
        assert!(((y1 - y0 + 1) as f32 - 20.0).abs() <= 1.0);
    }

    #[test]
    fn test_render_is_deterministic() {
        let style = small_style();
        let a = render_curved_label("Jane Smith", &style, &BlockGlyphs);
        let b = render_curved_label("Jane Smith", &style, &BlockGlyphs);
        assert_eq!(a.as_raw(), b.as_raw());
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_different_text_differs() {
        let style = small_style();
        let a = render_curved_label("ab", &style, &BlockGlyphs);
        let b = render_curved_label("abc", &style, &BlockGlyphs);
        assert_ne!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_render_uses_style_color() {
        let style = CurveStyle {
            color: [255, 0, 0, 255],
            ..small_style()
        };
        let label = render_curved_label("A", &style, &BlockGlyphs);
        let (cx, cy) = style.center();
        let pixel = label
            .image()
            .get_pixel(cx as u32, (cy + style.vertical_bend) as u32);
        assert_eq!(pixel.0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_zero_sized_canvas_is_clamped() {
        let style = CurveStyle {
            canvas_width: 0,
            canvas_height: 0,
            ..CurveStyle::default()
        };
        let label = render_curved_label("abc", &style, &BlockGlyphs);
        assert_eq!((label.width(), label.height()), (1, 1));
    }
}
