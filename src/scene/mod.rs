//! 3D scene for the label: camera, cylinder geometry and mesh pose.

mod camera;
mod cylinder;
mod label_mesh;

pub use camera::Camera;
pub use cylinder::CylinderGeometry;
pub use label_mesh::{LabelMesh, MeshSettings, Placement, Pose};
