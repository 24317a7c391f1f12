//! Shared shape of the two passes: one uniform block in group 0, one
//! sampled texture in group 1, a single vertex stream and alpha blending.

use wgpu::util::DeviceExt;

use crate::bindings::background::{SAMPLER_BINDING, TEXTURE_BINDING};

/// Uniform buffer plus the bind group exposing it at group 0.
pub(crate) struct UniformSlot {
    pub buffer: wgpu::Buffer,
    pub layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
}

impl UniformSlot {
    /// Upload `initial` and bind it at `binding` for the given stages.
    pub fn new<T: bytemuck::Pod>(
        device: &wgpu::Device,
        name: &str,
        initial: T,
        binding: u32,
        visibility: wgpu::ShaderStages,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name} Uniform Buffer")),
            contents: bytemuck::cast_slice(&[initial]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{name} Uniform Layout")),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding,
                visibility,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{name} Uniform Bind Group")),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            layout,
            bind_group,
        }
    }

    pub fn write<T: bytemuck::Pod>(&self, queue: &wgpu::Queue, value: T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[value]));
    }
}

/// Group 1 layout: a filterable 2D texture and its sampler, fragment only.
///
/// Both passes bind their image the same way, so a texture bind group made
/// for one layout is also valid for the other.
pub(crate) fn texture_layout(device: &wgpu::Device, name: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(&format!("{name} Texture Layout")),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: TEXTURE_BINDING,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: SAMPLER_BINDING,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

/// Description of an alpha-blended triangle-list pass over the surface.
///
/// `cull_mode` is the only thing the two passes disagree on: the flat quad
/// culls back faces, the cylinder is seen from both sides.
pub(crate) struct TexturedPass<'a> {
    pub name: &'a str,
    pub shader: &'a wgpu::ShaderModule,
    pub vertex_layout: wgpu::VertexBufferLayout<'a>,
    pub uniform_layout: &'a wgpu::BindGroupLayout,
    pub texture_layout: &'a wgpu::BindGroupLayout,
    pub cull_mode: Option<wgpu::Face>,
}

impl TexturedPass<'_> {
    pub fn build(self, device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{} Pipeline Layout", self.name)),
            bind_group_layouts: &[self.uniform_layout, self.texture_layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{} Render Pipeline", self.name)),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: self.shader,
                entry_point: Some("vs_main"),
                buffers: &[self.vertex_layout],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: self.shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                cull_mode: self.cull_mode,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }
}
