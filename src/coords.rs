//! Coordinate mapping between record percentages, window pixels and the
//! 3D label scene.
//!
//! Nothing here is cached: callers pass the current rendered size every time
//! so that results follow window resizes.

use glam::{Vec3, Vec4Swizzles};

use crate::model::{NameRecord, PERCENT_MAX};
use crate::scene::Camera;

/// Map a percentage coordinate onto a box of `width` x `height` pixels.
pub fn map_to_pixel(x: f32, y: f32, width: f32, height: f32) -> (f32, f32) {
    (x / PERCENT_MAX * width, y / PERCENT_MAX * height)
}

/// Pixel rectangle the background image occupies inside the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a viewport from its top-left corner and size.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Fit an image inside an area, keeping its aspect ratio and centering it.
    ///
    /// `padding` is removed from every side of the area first.
    pub fn fit(image_size: (u32, u32), area_size: (f32, f32), padding: f32) -> Self {
        let avail_w = (area_size.0 - 2.0 * padding).max(0.0);
        let avail_h = (area_size.1 - 2.0 * padding).max(0.0);
        let (img_w, img_h) = (image_size.0 as f32, image_size.1 as f32);

        if img_w <= 0.0 || img_h <= 0.0 {
            return Self::new(padding, padding, avail_w, avail_h);
        }

        let scale = (avail_w / img_w).min(avail_h / img_h);
        let width = img_w * scale;
        let height = img_h * scale;
        Self::new(
            padding + (avail_w - width) * 0.5,
            padding + (avail_h - height) * 0.5,
            width,
            height,
        )
    }

    /// Window pixel position of a percentage coordinate.
    pub fn map(&self, x: f32, y: f32) -> (f32, f32) {
        let (px, py) = map_to_pixel(x, y, self.width, self.height);
        (self.x + px, self.y + py)
    }

    /// Window pixel position of a record.
    pub fn map_record(&self, record: &NameRecord) -> (f32, f32) {
        self.map(record.x, record.y)
    }

    /// Percentage coordinate under a window pixel, if it lies on the image.
    pub fn to_percent(&self, px: f32, py: f32) -> Option<(f32, f32)> {
        if !self.contains(px, py) || self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        Some((
            (px - self.x) / self.width * PERCENT_MAX,
            (py - self.y) / self.height * PERCENT_MAX,
        ))
    }

    /// Whether a window pixel lies inside the viewport.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    /// `(x, y, width, height)` tuple.
    pub fn as_rect(&self) -> (f32, f32, f32, f32) {
        (self.x, self.y, self.width, self.height)
    }
}

/// Index of the record nearest to `cursor`, if within `radius` pixels.
pub fn hit_test(
    records: &[NameRecord],
    viewport: &Viewport,
    cursor: (f32, f32),
    radius: f32,
) -> Option<usize> {
    let radius_sq = radius * radius;
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let (px, py) = viewport.map_record(record);
            let dist_sq = (px - cursor.0).powi(2) + (py - cursor.1).powi(2);
            (dist_sq <= radius_sq).then_some((index, dist_sq))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

/// World position on the plane `z = plane_z` that the camera sees at a
/// percentage coordinate of the screen.
///
/// Returns `None` when the view ray runs parallel to the plane.
pub fn map_to_scene(x: f32, y: f32, camera: &Camera, aspect: f32, plane_z: f32) -> Option<Vec3> {
    let ndc_x = x / PERCENT_MAX * 2.0 - 1.0;
    let ndc_y = 1.0 - y / PERCENT_MAX * 2.0;

    let inverse = camera.view_proj(aspect).inverse();
    let near = inverse * glam::Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
    let far = inverse * glam::Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let near = near.xyz() / near.w;
    let far = far.xyz() / far.w;

    let dir = far - near;
    if dir.z.abs() < f32::EPSILON {
        return None;
    }
    let t = (plane_z - near.z) / dir.z;
    Some(near + dir * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_map_to_pixel_corners() {
        assert_eq!(map_to_pixel(0.0, 0.0, 640.0, 480.0), (0.0, 0.0));
        assert_eq!(map_to_pixel(100.0, 100.0, 640.0, 480.0), (640.0, 480.0));
        assert_eq!(map_to_pixel(50.0, 25.0, 640.0, 480.0), (320.0, 120.0));
    }

    #[test]
    fn test_map_to_pixel_is_linear() {
        let (w, h) = (813.0, 377.0);
        let (ax, ay) = map_to_pixel(10.0, 20.0, w, h);
        let (bx, by) = map_to_pixel(30.0, 60.0, w, h);
        assert!(approx(bx, ax * 3.0));
        assert!(approx(by, ay * 3.0));
    }

    #[test]
    fn test_map_follows_resize() {
        let small = Viewport::new(0.0, 0.0, 100.0, 100.0);
        let large = Viewport::new(0.0, 0.0, 400.0, 200.0);
        assert_eq!(small.map(30.0, 40.0), (30.0, 40.0));
        assert_eq!(large.map(30.0, 40.0), (120.0, 80.0));
    }

    #[test]
    fn test_fit_preserves_aspect_and_centers() {
        // Wide window, square image
        let vp = Viewport::fit((500, 500), (1000.0, 600.0), 0.0);
        assert!(approx(vp.x, 200.0) && approx(vp.y, 0.0));
        assert!(approx(vp.width, 600.0) && approx(vp.height, 600.0));

        // Tall window, wide image, with padding
        let vp = Viewport::fit((200, 100), (420.0, 1000.0), 10.0);
        assert!(approx(vp.width, 400.0));
        assert!(approx(vp.height, 200.0));
        assert!(approx(vp.x, 10.0));
        assert!(approx(vp.y, 400.0));
    }

    #[test]
    fn test_fit_degenerate_image_fills_area() {
        let vp = Viewport::fit((0, 0), (300.0, 200.0), 10.0);
        assert_eq!(vp, Viewport::new(10.0, 10.0, 280.0, 180.0));
    }

    #[test]
    fn test_to_percent_inverts_map() {
        let vp = Viewport::new(50.0, 20.0, 200.0, 100.0);
        let (px, py) = vp.map(25.0, 75.0);
        let (x, y) = vp.to_percent(px, py).expect("inside");
        assert!(approx(x, 25.0) && approx(y, 75.0));
        assert!(vp.to_percent(10.0, 10.0).is_none());
    }

    #[test]
    fn test_hit_test_picks_nearest_within_radius() {
        let vp = Viewport::new(0.0, 0.0, 100.0, 100.0);
        let records = vec![
            NameRecord::new("a", 10.0, 10.0),
            NameRecord::new("b", 14.0, 10.0),
            NameRecord::new("c", 90.0, 90.0),
        ];
        assert_eq!(hit_test(&records, &vp, (13.0, 10.0), 5.0), Some(1));
        assert_eq!(hit_test(&records, &vp, (10.5, 10.0), 5.0), Some(0));
        assert_eq!(hit_test(&records, &vp, (50.0, 50.0), 5.0), None);
        assert_eq!(hit_test(&[], &vp, (50.0, 50.0), 5.0), None);
    }

    #[test]
    fn test_map_to_scene_center_hits_target() {
        let camera = Camera::default();
        let p = map_to_scene(50.0, 50.0, &camera, 1.5, 0.0).expect("ray hits plane");
        assert!(approx(p.x, 0.0) && approx(p.y, 0.0) && approx(p.z, 0.0));
    }

    #[test]
    fn test_map_to_scene_edges_match_frustum() {
        let camera = Camera::default();
        let aspect = 2.0;
        let half_h = camera.distance() * (camera.fov_y_degrees.to_radians() * 0.5).tan();
        let half_w = half_h * aspect;

        let right = map_to_scene(100.0, 50.0, &camera, aspect, 0.0).expect("hit");
        assert!(approx(right.x, half_w) && approx(right.y, 0.0));

        // Percent y grows downwards, world y grows upwards
        let top = map_to_scene(50.0, 0.0, &camera, aspect, 0.0).expect("hit");
        assert!(approx(top.y, half_h) && approx(top.x, 0.0));
    }

    #[test]
    fn test_map_to_scene_respects_plane_depth() {
        let camera = Camera::default();
        let p = map_to_scene(75.0, 50.0, &camera, 1.0, 1.0).expect("hit");
        assert!(approx(p.z, 1.0));
        let q = map_to_scene(75.0, 50.0, &camera, 1.0, 0.0).expect("hit");
        // Closer plane, smaller footprint
        assert!(p.x < q.x);
    }
}
