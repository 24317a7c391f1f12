//! Open cylinder geometry for the label surface.

use nameviz_gpu::MeshVertex;

use crate::constants::{MAX_RADIAL_SEGMENTS, MIN_RADIAL_SEGMENTS};

/// Thin open tube: one height segment, no caps.
///
/// Vertices are laid out in two rows (top then bottom) of
/// `radial_segments + 1` columns; the seam column is duplicated so the
/// texture wraps with `u` running 0 to 1 along the arc.
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderGeometry {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    radial_segments: u32,
}

impl CylinderGeometry {
    /// Build an open cylinder centered on the origin along the Y axis.
    ///
    /// `theta_start` and `theta_length` select the arc in radians; angle 0
    /// points at +Z (towards the default camera) and angles grow towards +X.
    pub fn open(
        radius: f32,
        height: f32,
        radial_segments: u32,
        theta_start: f32,
        theta_length: f32,
    ) -> Self {
        let segments = radial_segments.clamp(MIN_RADIAL_SEGMENTS, MAX_RADIAL_SEGMENTS);
        let half_height = height / 2.0;
        let columns = segments + 1;

        let mut vertices = Vec::with_capacity(2 * columns as usize);
        for row in 0..2u32 {
            let v = row as f32;
            let y = half_height - v * height;
            for column in 0..columns {
                let u = column as f32 / segments as f32;
                let theta = theta_start + u * theta_length;
                let (sin, cos) = theta.sin_cos();
                vertices.push(MeshVertex {
                    position: [radius * sin, y, radius * cos],
                    normal: [sin, 0.0, cos],
                    uv: [u, 1.0 - v],
                });
            }
        }

        let mut indices = Vec::with_capacity(6 * segments as usize);
        for column in 0..segments {
            let a = column;
            let b = column + columns;
            let c = b + 1;
            let d = a + 1;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }

        Self {
            vertices,
            indices,
            radial_segments: segments,
        }
    }

    /// Segment count after clamping.
    pub fn radial_segments(&self) -> u32 {
        self.radial_segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_counts() {
        let geometry = CylinderGeometry::open(1.0, 0.5, 8, 0.0, PI);
        assert_eq!(geometry.vertices.len(), 2 * 9);
        assert_eq!(geometry.indices.len(), 6 * 8);
        let max = geometry.indices.iter().copied().max().unwrap_or(0);
        assert!((max as usize) < geometry.vertices.len());
    }

    #[test]
    fn test_segments_are_clamped() {
        assert_eq!(CylinderGeometry::open(1.0, 1.0, 0, 0.0, PI).radial_segments(), 3);
        assert_eq!(
            CylinderGeometry::open(1.0, 1.0, 100_000, 0.0, PI).radial_segments(),
            MAX_RADIAL_SEGMENTS
        );
    }

    #[test]
    fn test_every_vertex_on_radius() {
        let geometry = CylinderGeometry::open(2.5, 1.0, 64, -PI / 2.0, PI);
        for vertex in &geometry.vertices {
            let [x, _, z] = vertex.position;
            assert!(((x * x + z * z).sqrt() - 2.5).abs() < 1e-4);
            let [nx, ny, nz] = vertex.normal;
            assert!(((nx * nx + ny * ny + nz * nz).sqrt() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_uv_range_and_rows() {
        let geometry = CylinderGeometry::open(1.0, 2.0, 16, 0.0, 2.0 * PI);
        for vertex in &geometry.vertices {
            let [u, v] = vertex.uv;
            assert!((0.0..=1.0).contains(&u));
            assert!(v == 0.0 || v == 1.0);
            // Top row carries v = 1
            assert_eq!(vertex.position[1] > 0.0, v == 1.0);
        }
        assert_eq!(geometry.vertices[0].uv, [0.0, 1.0]);
        assert_eq!(geometry.vertices[16].uv, [1.0, 1.0]);
    }

    #[test]
    fn test_front_arc_faces_positive_z() {
        let geometry = CylinderGeometry::open(1.0, 1.0, 4, -PI / 2.0, PI);
        // Middle column sits at theta = 0
        let middle = geometry.vertices[2].position;
        assert!(middle[0].abs() < 1e-6);
        assert!((middle[2] - 1.0).abs() < 1e-6);
        // Arc runs left to right as seen from +Z
        assert!(geometry.vertices[0].position[0] < geometry.vertices[4].position[0]);
    }
}
