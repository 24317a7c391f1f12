//! wgpu side of the viewer: label texture uploads and frame drawing.

use std::sync::Arc;

use image::RgbaImage;
use nameviz_gpu::{
    BackgroundPipeline, ClearColor, GpuContext, GpuError, LabelPipeline, LabelUniform, Pipeline,
    RenderConfig, Texture, TextureConfig, TransformUniform,
};
use winit::window::Window;

use crate::config::AppConfig;
use crate::constants::IMAGE_PADDING;
use crate::coords::Viewport;
use crate::label::LabelImage;
use crate::scene::LabelMesh;
use crate::texture_cache::TextureBackend;

/// A label texture and the bind group that samples it.
pub struct LabelTexture {
    texture: Texture,
    pub bind_group: wgpu::BindGroup,
}

/// Uploads label images as GPU textures for the label pipeline.
pub struct GpuLabelTextures {
    device: wgpu::Device,
    queue: wgpu::Queue,
    layout: wgpu::BindGroupLayout,
    live: usize,
}

impl GpuLabelTextures {
    pub fn new(ctx: &GpuContext, pipeline: &LabelPipeline) -> Self {
        Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            layout: pipeline.texture_bind_group_layout().clone(),
            live: 0,
        }
    }
}

impl Pipeline for GpuLabelTextures {
    fn texture_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }
}

impl TextureBackend for GpuLabelTextures {
    type Handle = LabelTexture;
    type Error = GpuError;

    fn upload(&mut self, label: &LabelImage) -> Result<LabelTexture, GpuError> {
        let texture = Texture::create(
            &self.device,
            &self.queue,
            "Label Texture",
            label.as_raw(),
            label.width(),
            label.height(),
            TextureConfig::label(),
        )?;
        let bind_group = self.create_texture_bind_group(&self.device, &texture);
        self.live += 1;
        log::debug!(
            "Uploaded label texture {:?} ({}x{}, {} live)",
            label.text(),
            label.width(),
            label.height(),
            self.live
        );
        Ok(LabelTexture {
            texture,
            bind_group,
        })
    }

    fn release(&mut self, handle: LabelTexture) {
        handle.texture.destroy();
        self.live = self.live.saturating_sub(1);
        log::trace!("Released label texture ({} live)", self.live);
    }
}

struct BackgroundTexture {
    texture: Texture,
    bind_group: wgpu::BindGroup,
}

/// GPU state for drawing one frame: the background quad then the label mesh.
pub struct Renderer {
    pub ctx: GpuContext,
    background: BackgroundPipeline,
    label: LabelPipeline,
    background_texture: Option<BackgroundTexture>,
}

impl Renderer {
    pub async fn new(
        window: Arc<Window>,
        config: &AppConfig,
        mesh: &LabelMesh,
    ) -> Result<Self, GpuError> {
        let ctx = GpuContext::with_config(window, config.gpu_config()).await?;

        let [r, g, b] = config.window.clear_color;
        let render_config = RenderConfig::default().with_clear_color(ClearColor::rgb(
            f64::from(r),
            f64::from(g),
            f64::from(b),
        ));
        let background = BackgroundPipeline::new(&ctx, render_config);

        let geometry = mesh.geometry();
        let label = LabelPipeline::new(&ctx, &geometry.vertices, &geometry.indices)?;

        Ok(Self {
            ctx,
            background,
            label,
            background_texture: None,
        })
    }

    /// Texture backend sharing this renderer's device.
    pub fn label_textures(&self) -> GpuLabelTextures {
        GpuLabelTextures::new(&self.ctx, &self.label)
    }

    /// Upload a new background image, freeing the previous one.
    pub fn set_background(&mut self, image: &RgbaImage) -> Result<(), GpuError> {
        let texture = Texture::from_rgba8_with_config(
            &self.ctx,
            "Background Texture",
            image.as_raw(),
            image.width(),
            image.height(),
            TextureConfig::default(),
        )?;
        let bind_group = self
            .background
            .create_texture_bind_group(&self.ctx.device, &texture);

        if let Some(old) = self.background_texture.replace(BackgroundTexture {
            texture,
            bind_group,
        }) {
            old.texture.destroy();
        }
        Ok(())
    }

    /// Rectangle the background occupies; the whole window without one.
    pub fn viewport(&self) -> Viewport {
        let area = (self.ctx.width() as f32, self.ctx.height() as f32);
        match &self.background_texture {
            Some(bg) => Viewport::fit((bg.texture.width, bg.texture.height), area, IMAGE_PADDING),
            None => Viewport::new(0.0, 0.0, area.0, area.1),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.ctx.resize(width, height);
    }

    /// Draw the background and, if given, the label mesh with its texture.
    pub fn render(
        &self,
        label: Option<(LabelUniform, &wgpu::BindGroup)>,
    ) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let viewport = self.viewport();
        self.background.update_transform(
            &self.ctx,
            TransformUniform::from_pixel_rect(
                viewport.as_rect(),
                self.ctx.width() as f32,
                self.ctx.height() as f32,
            ),
        );

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.background.render(
            &mut encoder,
            &view,
            self.background_texture.as_ref().map(|bg| &bg.bind_group),
        );

        if let Some((uniform, bind_group)) = label {
            self.label.update_uniform(&self.ctx, uniform);
            self.label
                .render(&mut encoder, &view, bind_group, viewport.as_rect());
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
