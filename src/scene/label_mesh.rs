//! The textured label cylinder and where it sits in the scene.

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::{Camera, CylinderGeometry};
use crate::constants::DEFAULT_RADIAL_SEGMENTS;
use crate::coords::map_to_scene;
use crate::model::NameRecord;

/// Position, rotation and scale of the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pose {
    pub position: [f32; 3],
    /// Euler angles in radians, applied in X, Y, Z order
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: [0.0, -0.2, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }
}

impl Pose {
    /// Model-to-world matrix.
    pub fn model(&self) -> Mat4 {
        let [rx, ry, rz] = self.rotation;
        Mat4::from_scale_rotation_translation(
            Vec3::from(self.scale),
            Quat::from_euler(EulerRot::XYZ, rx, ry, rz),
            Vec3::from(self.position),
        )
    }
}

/// Where the label cylinder is placed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Placement {
    /// Always at the configured pose
    #[default]
    Fixed,
    /// Moved to the active record, projected onto the plane `z = plane_z`
    FromRecord { plane_z: f32 },
}

/// Shape and resting pose of the label cylinder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshSettings {
    pub radius: f32,
    pub height: f32,
    pub radial_segments: u32,
    /// Arc start in radians, 0 faces the camera
    pub theta_start: f32,
    /// Arc length in radians
    pub theta_length: f32,
    pub pose: Pose,
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            radius: 1.0,
            height: 0.8,
            radial_segments: DEFAULT_RADIAL_SEGMENTS,
            theta_start: -std::f32::consts::FRAC_PI_2,
            theta_length: std::f32::consts::PI,
            pose: Pose::default(),
        }
    }
}

/// Label cylinder: geometry built once, pose resolved per frame.
#[derive(Debug, Clone)]
pub struct LabelMesh {
    settings: MeshSettings,
    placement: Placement,
    geometry: CylinderGeometry,
}

impl LabelMesh {
    pub fn new(settings: MeshSettings, placement: Placement) -> Self {
        let geometry = CylinderGeometry::open(
            settings.radius,
            settings.height,
            settings.radial_segments,
            settings.theta_start,
            settings.theta_length,
        );
        log::debug!(
            "Label mesh: {} vertices, {} indices, placement {:?}",
            geometry.vertices.len(),
            geometry.indices.len(),
            placement
        );
        Self {
            settings,
            placement,
            geometry,
        }
    }

    pub fn geometry(&self) -> &CylinderGeometry {
        &self.geometry
    }

    /// Pose for the given active record.
    ///
    /// Fixed placement ignores the record. Record placement falls back to
    /// the configured pose when there is no record or the projection fails.
    pub fn pose_for(&self, record: Option<&NameRecord>, camera: &Camera, aspect: f32) -> Pose {
        let base = self.settings.pose;
        match (self.placement, record) {
            (Placement::FromRecord { plane_z }, Some(record)) => {
                match map_to_scene(record.x, record.y, camera, aspect, plane_z) {
                    Some(position) => Pose {
                        position: position.to_array(),
                        ..base
                    },
                    None => base,
                }
            }
            _ => base,
        }
    }

    /// Uniform block for the label pipeline.
    pub fn uniform(
        &self,
        record: Option<&NameRecord>,
        camera: &Camera,
        aspect: f32,
        ambient: [f32; 4],
    ) -> nameviz_gpu::LabelUniform {
        let model = self.pose_for(record, camera, aspect).model();
        nameviz_gpu::LabelUniform::new(
            camera.view_proj(aspect).to_cols_array_2d(),
            model.to_cols_array_2d(),
            ambient,
        )
    }
}
