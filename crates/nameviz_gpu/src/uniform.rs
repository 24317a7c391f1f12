//! Shared uniform types for GPU rendering pipelines.

use bytemuck::{Pod, Zeroable};

/// 4x4 transform placing the unit background quad inside the surface.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TransformUniform {
    pub matrix: [[f32; 4]; 4],
}

impl TransformUniform {
    pub fn new() -> Self {
        Self {
            matrix: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Transform mapping the [-1, 1] quad onto a pixel rectangle of the surface.
    ///
    /// `rect` is `(x, y, width, height)` in pixels with a y-down origin at the
    /// surface's top-left corner.
    pub fn from_pixel_rect(rect: (f32, f32, f32, f32), surface_width: f32, surface_height: f32) -> Self {
        let (x, y, w, h) = rect;
        let sx = w / surface_width;
        let sy = h / surface_height;
        let cx = (x + w * 0.5) / surface_width * 2.0 - 1.0;
        let cy = 1.0 - (y + h * 0.5) / surface_height * 2.0;
        Self {
            matrix: [
                [sx, 0.0, 0.0, 0.0],
                [0.0, sy, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [cx, cy, 0.0, 1.0],
            ],
        }
    }
}

impl Default for TransformUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-frame parameters of the label cylinder.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LabelUniform {
    /// Camera view-projection matrix (column major).
    pub view_proj: [[f32; 4]; 4],
    /// Mesh model matrix (column major).
    pub model: [[f32; 4]; 4],
    /// Flat ambient light color; alpha scales the label opacity.
    pub ambient: [f32; 4],
}

impl LabelUniform {
    pub fn new(view_proj: [[f32; 4]; 4], model: [[f32; 4]; 4], ambient: [f32; 4]) -> Self {
        Self {
            view_proj,
            model,
            ambient,
        }
    }
}

impl Default for LabelUniform {
    fn default() -> Self {
        let identity = TransformUniform::new().matrix;
        Self::new(identity, identity, [1.0, 1.0, 1.0, 1.0])
    }
}
