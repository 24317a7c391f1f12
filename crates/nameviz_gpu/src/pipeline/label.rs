//! Label cylinder pipeline.
//!
//! Draws the open cylinder mesh carrying the rasterized label. Both faces are
//! drawn and the output is alpha blended over whatever the background pass
//! left in the target.

use wgpu::util::DeviceExt;

use super::textured::{texture_layout, TexturedPass, UniformSlot};
use super::Pipeline;
use crate::bindings::label::*;
use crate::context::GpuContext;
use crate::error::{GpuError, Result};
use crate::uniform::LabelUniform;
use crate::vertex::MeshVertex;

/// Render pipeline and GPU buffers for the label mesh.
pub struct LabelPipeline {
    pub render_pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
    uniform: UniformSlot,
    pub texture_bind_group_layout: wgpu::BindGroupLayout,
}

impl LabelPipeline {
    /// Fails when the mesh has no triangles to draw.
    pub fn new(ctx: &GpuContext, vertices: &[MeshVertex], indices: &[u32]) -> Result<Self> {
        if indices.len() < 3 || vertices.is_empty() {
            return Err(GpuError::Pipeline(format!(
                "label mesh has {} vertices and {} indices",
                vertices.len(),
                indices.len()
            )));
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Label Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/label.wgsl").into()),
        });

        let uniform = UniformSlot::new(
            &ctx.device,
            "Label",
            LabelUniform::default(),
            UNIFORM_LABEL_BINDING,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        );
        let texture_bind_group_layout = texture_layout(&ctx.device, "Label");

        // No culling: the camera may see the inside of the tube
        let render_pipeline = TexturedPass {
            name: "Label",
            shader: &shader,
            vertex_layout: MeshVertex::desc(),
            uniform_layout: &uniform.layout,
            texture_layout: &texture_bind_group_layout,
            cull_mode: None,
        }
        .build(&ctx.device, ctx.surface_config.format);

        let (vertex_buffer, index_buffer) = Self::create_mesh_buffers(ctx, vertices, indices);

        Ok(Self {
            render_pipeline,
            vertex_buffer,
            index_buffer,
            num_indices: indices.len() as u32,
            uniform,
            texture_bind_group_layout,
        })
    }

    fn create_mesh_buffers(
        ctx: &GpuContext,
        vertices: &[MeshVertex],
        indices: &[u32],
    ) -> (wgpu::Buffer, wgpu::Buffer) {
        let vertex_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Label Vertex Buffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Label Index Buffer"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        (vertex_buffer, index_buffer)
    }

    /// Update camera, model and ambient light.
    pub fn update_uniform(&self, ctx: &GpuContext, uniform: LabelUniform) {
        self.uniform.write(&ctx.queue, uniform);
    }

    /// Draw the label mesh on top of the existing target contents.
    ///
    /// `viewport` is the pixel rectangle `(x, y, width, height)` that clip
    /// space maps onto, normally the rectangle of the background image.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        texture_bind_group: &wgpu::BindGroup,
        viewport: (f32, f32, f32, f32),
    ) {
        let (x, y, width, height) = viewport;
        if self.num_indices == 0 || width < 1.0 || height < 1.0 {
            return;
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Label Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        render_pass.set_viewport(x, y, width, height, 0.0, 1.0);
        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(UNIFORM_GROUP, &self.uniform.bind_group, &[]);
        render_pass.set_bind_group(TEXTURE_GROUP, texture_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.num_indices, 0, 0..1);
    }
}

impl Pipeline for LabelPipeline {
    fn texture_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_bind_group_layout
    }
}
