//! Record markers drawn into the backdrop so there is something to hover.

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::raster::pixmap_to_rgba;
use crate::coords::map_to_pixel;
use crate::model::NameRecord;

/// Look of the record markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    /// Radius as a percentage of the image's shorter side; 0 hides markers
    pub radius_percent: f32,
    /// Fill of an idle marker (RGBA)
    pub color: [u8; 4],
    /// Fill of the hovered record's marker (RGBA)
    pub active_color: [u8; 4],
    /// Ring around every marker (RGBA)
    pub outline_color: [u8; 4],
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius_percent: 0.8,
            color: [255, 255, 255, 200],
            active_color: [255, 196, 0, 255],
            outline_color: [0, 0, 0, 160],
        }
    }
}

impl MarkerStyle {
    /// Marker radius in pixels on an image of the given size.
    pub fn radius_px(&self, width: u32, height: u32) -> f32 {
        width.min(height) as f32 * self.radius_percent / 100.0
    }
}

/// Copy `base` with a dot at every record; the `active` one drawn last in
/// its own color.
pub fn draw_markers(
    base: &RgbaImage,
    records: &[NameRecord],
    active: Option<usize>,
    style: &MarkerStyle,
) -> RgbaImage {
    let mut out = base.clone();
    let radius = style.radius_px(base.width(), base.height());
    if records.is_empty() || radius <= 0.0 {
        return out;
    }
    let Some(mut pixmap) = Pixmap::new(base.width(), base.height()) else {
        log::warn!("Cannot allocate {}x{} marker layer", base.width(), base.height());
        return out;
    };

    let mut fill = Paint::default();
    fill.anti_alias = true;
    let mut ring = Paint::default();
    ring.anti_alias = true;
    let [r, g, b, a] = style.outline_color;
    ring.set_color_rgba8(r, g, b, a);
    let stroke = Stroke {
        width: (radius * 0.25).max(1.0),
        ..Stroke::default()
    };

    let active_record = active.and_then(|index| records.get(index).map(|r| (index, r)));
    let ordered = records
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != active)
        .chain(active_record);

    let (width, height) = (base.width() as f32, base.height() as f32);
    for (index, record) in ordered {
        let (px, py) = map_to_pixel(record.x, record.y, width, height);
        let Some(circle) = PathBuilder::from_circle(px, py, radius) else {
            continue;
        };
        let [r, g, b, a] = if Some(index) == active {
            style.active_color
        } else {
            style.color
        };
        fill.set_color_rgba8(r, g, b, a);
        pixmap.fill_path(&circle, &fill, FillRule::Winding, Transform::identity(), None);
        pixmap.stroke_path(&circle, &ring, &stroke, Transform::identity(), None);
    }

    image::imageops::overlay(&mut out, &pixmap_to_rgba(&pixmap), 0, 0);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn opaque(color: [u8; 3]) -> MarkerStyle {
        MarkerStyle {
            radius_percent: 5.0,
            color: [color[0], color[1], color[2], 255],
            active_color: [255, 0, 0, 255],
            outline_color: [0, 0, 0, 0],
        }
    }

    #[test]
    fn test_marker_drawn_at_record() {
        let base = RgbaImage::from_pixel(200, 100, Rgba([0, 0, 0, 255]));
        let records = [NameRecord::new("a", 25.0, 50.0)];
        let out = draw_markers(&base, &records, None, &opaque([0, 255, 0]));

        assert_eq!(out.get_pixel(50, 50).0, [0, 255, 0, 255]);
        assert_eq!(out.get_pixel(150, 50).0, [0, 0, 0, 255]);
        assert_eq!(base.get_pixel(50, 50).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_active_marker_uses_active_color() {
        let base = RgbaImage::from_pixel(200, 200, Rgba([0, 0, 0, 255]));
        let records = [
            NameRecord::new("a", 25.0, 25.0),
            NameRecord::new("b", 75.0, 75.0),
        ];
        let out = draw_markers(&base, &records, Some(1), &opaque([0, 255, 0]));
        assert_eq!(out.get_pixel(50, 50).0, [0, 255, 0, 255]);
        assert_eq!(out.get_pixel(150, 150).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_active_marker_drawn_on_top() {
        let base = RgbaImage::from_pixel(100, 100, Rgba([0, 0, 0, 255]));
        // Same spot twice: the active one must win
        let records = [
            NameRecord::new("a", 50.0, 50.0),
            NameRecord::new("b", 50.0, 50.0),
        ];
        let out = draw_markers(&base, &records, Some(0), &opaque([0, 255, 0]));
        assert_eq!(out.get_pixel(50, 50).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_zero_radius_or_no_records_is_unchanged() {
        let base = RgbaImage::from_pixel(40, 40, Rgba([9, 9, 9, 255]));
        let records = [NameRecord::new("a", 50.0, 50.0)];
        let hidden = MarkerStyle {
            radius_percent: 0.0,
            ..MarkerStyle::default()
        };
        assert_eq!(draw_markers(&base, &records, None, &hidden), base);
        assert_eq!(draw_markers(&base, &[], None, &MarkerStyle::default()), base);
    }
}
