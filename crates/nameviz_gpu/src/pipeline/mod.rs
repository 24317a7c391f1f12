//! Render pipelines.
//!
//! The background pipeline draws the flat image; the label pipeline draws
//! the textured cylinder above it.

pub mod background;
pub mod label;
mod textured;

pub use background::BackgroundPipeline;
pub use label::LabelPipeline;

/// Common trait for render pipelines.
pub trait Pipeline {
    /// Layout that texture bind groups for this pipeline must use.
    fn texture_bind_group_layout(&self) -> &wgpu::BindGroupLayout;

    /// Create a bind group for a texture usable with this pipeline.
    fn create_texture_bind_group(
        &self,
        device: &wgpu::Device,
        texture: &crate::Texture,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Texture Bind Group"),
            layout: self.texture_bind_group_layout(),
            entries: &[
                wgpu::BindGroupEntry {
                    binding: crate::bindings::background::TEXTURE_BINDING,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: crate::bindings::background::SAMPLER_BINDING,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        })
    }
}
