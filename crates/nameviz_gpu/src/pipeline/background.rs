//! Background image pipeline.

use wgpu::util::DeviceExt;

use super::textured::{texture_layout, TexturedPass, UniformSlot};
use super::Pipeline;
use crate::bindings::background::*;
use crate::config::RenderConfig;
use crate::context::GpuContext;
use crate::uniform::TransformUniform;
use crate::vertex::QuadVertex;

/// Draws the flat background image as a textured quad.
pub struct BackgroundPipeline {
    pub render_pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
    uniform: UniformSlot,
    pub texture_bind_group_layout: wgpu::BindGroupLayout,
    pub render_config: RenderConfig,
}

impl BackgroundPipeline {
    pub fn new(ctx: &GpuContext, render_config: RenderConfig) -> Self {
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Background Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/background.wgsl").into()),
        });

        let uniform = UniformSlot::new(
            &ctx.device,
            "Background",
            TransformUniform::new(),
            UNIFORM_TRANSFORM_BINDING,
            wgpu::ShaderStages::VERTEX,
        );
        let texture_bind_group_layout = texture_layout(&ctx.device, "Background");

        let render_pipeline = TexturedPass {
            name: "Background",
            shader: &shader,
            vertex_layout: QuadVertex::desc(),
            uniform_layout: &uniform.layout,
            texture_layout: &texture_bind_group_layout,
            cull_mode: Some(wgpu::Face::Back),
        }
        .build(&ctx.device, ctx.surface_config.format);

        let vertices = [
            QuadVertex { position: [-1.0, -1.0], tex_coords: [0.0, 1.0] }, // Bottom-left
            QuadVertex { position: [1.0, -1.0], tex_coords: [1.0, 1.0] },  // Bottom-right
            QuadVertex { position: [1.0, 1.0], tex_coords: [1.0, 0.0] },   // Top-right
            QuadVertex { position: [-1.0, 1.0], tex_coords: [0.0, 0.0] },  // Top-left
        ];

        let indices: [u16; 6] = [0, 1, 2, 0, 2, 3];

        let vertex_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Background Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Background Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            render_pipeline,
            vertex_buffer,
            index_buffer,
            num_indices: indices.len() as u32,
            uniform,
            texture_bind_group_layout,
            render_config,
        }
    }

    /// Place the quad: see [`TransformUniform::from_pixel_rect`].
    pub fn update_transform(&self, ctx: &GpuContext, transform: TransformUniform) {
        self.uniform.write(&ctx.queue, transform);
    }

    /// Clear the target and draw the background image, if one is bound.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        texture_bind_group: Option<&wgpu::BindGroup>,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Background Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.render_config.clear_color.into()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        let Some(texture_bind_group) = texture_bind_group else {
            return;
        };

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(UNIFORM_GROUP, &self.uniform.bind_group, &[]);
        render_pass.set_bind_group(TEXTURE_GROUP, texture_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..self.num_indices, 0, 0..1);
    }
}

impl Pipeline for BackgroundPipeline {
    fn texture_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_bind_group_layout
    }
}
