//! 2D canvas backend: the curved label drawn straight onto the image.

use image::RgbaImage;

use super::raster::LabelImage;
use crate::coords::map_to_pixel;
use crate::model::NameRecord;

/// Copy `background` and blend `label` over it, centered on the record's
/// position.
pub fn composite_label(background: &RgbaImage, record: &NameRecord, label: &LabelImage) -> RgbaImage {
    let mut out = background.clone();
    let (px, py) = map_to_pixel(
        record.x,
        record.y,
        background.width() as f32,
        background.height() as f32,
    );
    let left = px.round() as i64 - i64::from(label.width() / 2);
    let top = py.round() as i64 - i64::from(label.height() / 2);
    image::imageops::overlay(&mut out, label.image(), left, top);
    out
}
