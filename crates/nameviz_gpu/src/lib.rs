//! GPU layer for the name visualizer: wgpu context, textures and the two
//! render pipelines (background image quad and label cylinder).

pub mod bindings;
pub mod config;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod texture;
pub mod uniform;
pub mod vertex;

pub use config::{ClearColor, GpuConfig, RenderConfig, TextureConfig};
pub use context::GpuContext;
pub use error::{GpuError, Result};
pub use pipeline::{BackgroundPipeline, LabelPipeline, Pipeline};
pub use texture::Texture;
pub use uniform::{LabelUniform, TransformUniform};
pub use vertex::{MeshVertex, QuadVertex};
