//! Native viewer: window, input handling and the per-frame draw.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{Rgba, RgbaImage};
use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::config::{AppConfig, ConfigError, ConfigSource};
use crate::format::{LoadError, NAMES_EXTENSION, SAMPLE_JSON};
use crate::label::{composite_label, draw_markers, FontError, LabelFont};
use crate::overlay::{LabelOverlay, RenderBackend};
use crate::render::{GpuLabelTextures, Renderer};
use crate::scene::LabelMesh;
use crate::selection::SelectionEvent;
use nameviz_gpu::GpuError;

/// Errors that stop the viewer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),

    #[error("Font error: {0}")]
    Font(#[from] FontError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Window error: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

/// Everything that exists once the window and GPU are up.
struct ViewerState {
    window: Arc<Window>,
    renderer: Renderer,
    overlay: LabelOverlay<GpuLabelTextures>,
    mesh: LabelMesh,
    /// Background as loaded, before markers or a label are composited in
    background: Option<RgbaImage>,
    cursor: Option<(f32, f32)>,
}

impl ViewerState {
    async fn new(window: Arc<Window>, config: &AppConfig) -> Result<Self, AppError> {
        let font = LabelFont::discover(config.font_path.as_deref())?;
        let mesh = LabelMesh::new(config.mesh, config.placement);
        let mut renderer = Renderer::new(window.clone(), config, &mesh).await?;

        let background = match &config.background_path {
            Some(path) => match load_background(path) {
                Ok(image) => {
                    renderer.set_background(&image)?;
                    Some(image)
                }
                Err(e) => {
                    log::warn!("Failed to load background {:?}: {}", path, e);
                    None
                }
            },
            None => None,
        };

        let overlay = LabelOverlay::new(
            renderer.label_textures(),
            Box::new(font),
            config.label.clone(),
            config.render_backend,
        );

        Ok(Self {
            window,
            renderer,
            overlay,
            mesh,
            background,
            cursor: None,
        })
    }

    fn load_names(&mut self, path: &Path, config: &AppConfig) {
        let start = Instant::now();
        match self.overlay.load_file(path) {
            Ok(count) => {
                log::info!(
                    "Loaded {} names from {:?} in {:.1}ms",
                    count,
                    path,
                    start.elapsed().as_secs_f64() * 1000.0
                );
                if let Some(raw) = self.overlay.session().raw_json() {
                    log::debug!("Session holds {} bytes of JSON", raw.len());
                }
            }
            Err(e) => {
                log::error!("Failed to load {:?}: {}", path, e);
                if e.is_content_error() || matches!(e, LoadError::EmptyOrMissingData) {
                    log::info!("Expected a file like:\n{}", SAMPLE_JSON);
                }
            }
        }
        self.show_status(config);
        self.update_hover(config.hover_radius);
    }

    /// Put the record count, or why there is nothing to show, in the title.
    fn show_status(&self, config: &AppConfig) {
        let title = match self.overlay.require_data() {
            Ok(data) => format!("{} ({} names)", config.window.title, data.len()),
            Err(e) => {
                log::info!("{}: drop a names file onto the window or press O", e);
                format!("{} ({}: drop a names file or press O)", config.window.title, e)
            }
        };
        self.window.set_title(&title);
    }

    fn update_hover(&mut self, hover_radius: f32) -> bool {
        match self.cursor {
            Some(cursor) => {
                let viewport = self.renderer.viewport();
                self.overlay.hover_at(&viewport, cursor, hover_radius)
            }
            None => self.overlay.handle(SelectionEvent::HoverLeave),
        }
    }

    fn pick_names_file(&mut self, config: &AppConfig) {
        let picked = rfd::FileDialog::new()
            .set_title("Open names file")
            .add_filter("Names", &[NAMES_EXTENSION])
            .pick_file();
        if let Some(path) = picked {
            self.load_names(&path, config);
        }
    }

    /// Log where the cursor is in record coordinates, for writing names files.
    fn report_cursor(&self) {
        let Some((px, py)) = self.cursor else {
            return;
        };
        match self.renderer.viewport().to_percent(px, py) {
            Some((x, y)) => log::info!(r#"Cursor at "x": {:.1}, "y": {:.1}"#, x, y),
            None => log::debug!("Cursor is outside the image"),
        }
    }

    /// Draw a frame. Returns `true` when another frame is needed to finish
    /// a change that could not be applied this time.
    fn redraw(&mut self, config: &AppConfig) -> Result<bool, wgpu::SurfaceError> {
        let viewport = self.renderer.viewport();
        let aspect = viewport.width / viewport.height.max(1.0);
        let backend = self.overlay.render_backend();
        let frame = self.overlay.prepare_frame();

        let mut backdrop_failed = false;
        if frame.backdrop_changed {
            let blank;
            let base = match &self.background {
                Some(image) => image,
                None => {
                    blank = blank_canvas(
                        self.renderer.ctx.width(),
                        self.renderer.ctx.height(),
                        config.window.clear_color,
                    );
                    &blank
                }
            };
            let mut image = draw_markers(base, frame.records, frame.active, &config.markers);
            if let (RenderBackend::Canvas2d, Some(record), Some(label)) =
                (backend, frame.record, frame.label)
            {
                image = composite_label(&image, record, label);
            }
            if let Err(e) = self.renderer.set_background(&image) {
                log::warn!("Failed to update background: {}", e);
                backdrop_failed = true;
            }
        }

        let pending = frame.texture_pending;
        let label = frame.texture.map(|texture| {
            let uniform = self
                .mesh
                .uniform(frame.record, &config.camera, aspect, config.ambient);
            (uniform, &texture.bind_group)
        });
        let result = self.renderer.render(label);

        if backdrop_failed {
            self.overlay.invalidate_backdrop();
        }
        result.map(|()| pending || backdrop_failed)
    }
}

fn load_background(path: &Path) -> Result<RgbaImage, image::ImageError> {
    let start = Instant::now();
    let image = image::open(path)?.to_rgba8();
    log::info!(
        "Loaded background {:?} ({}x{}) in {:.1}ms",
        path,
        image.width(),
        image.height(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(image)
}

fn blank_canvas(width: u32, height: u32, color: [f32; 3]) -> RgbaImage {
    let [r, g, b] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    RgbaImage::from_pixel(width.max(1), height.max(1), Rgba([r, g, b, 255]))
}

/// winit application driving the viewer.
pub struct NameVizApp {
    config: AppConfig,
    /// Explicit config file from the command line, reread on `R`
    config_path: Option<PathBuf>,
    initial_names: Option<PathBuf>,
    state: Option<ViewerState>,
    error: Option<AppError>,
}

impl NameVizApp {
    pub fn new(
        config: AppConfig,
        initial_names: Option<PathBuf>,
        config_path: Option<PathBuf>,
    ) -> Self {
        Self {
            config,
            config_path,
            initial_names,
            state: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let attrs = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let mut state = pollster::block_on(ViewerState::new(window.clone(), &self.config))?;
        match self.initial_names.take() {
            Some(path) => state.load_names(&path, &self.config),
            None => state.show_status(&self.config),
        }

        window.request_redraw();
        self.state = Some(state);
        Ok(())
    }
}

/// Reread the config file and apply the settings that can change while
/// running: label style and backend, markers, camera, light and hover radius.
///
/// Window, font, background and mesh settings take effect on restart.
fn reload_config(config: &mut AppConfig, state: &mut ViewerState, path: Option<&Path>) {
    let (fresh, source) = AppConfig::load_or_default(path);
    source.report();
    if let ConfigSource::Rejected { .. } = source {
        return;
    }

    state.overlay.set_style(fresh.label.clone());
    state.overlay.set_render_backend(fresh.render_backend);
    state.overlay.invalidate_backdrop();

    config.label = fresh.label;
    config.render_backend = fresh.render_backend;
    config.markers = fresh.markers;
    config.camera = fresh.camera;
    config.ambient = fresh.ambient;
    config.hover_radius = fresh.hover_radius;
    state.update_hover(config.hover_radius);
}

impl ApplicationHandler for NameVizApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("Failed to start viewer: {}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };
        let hover_radius = self.config.hover_radius;

        let needs_redraw = match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                event_loop.exit();
                false
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Backspace => {
                    state.overlay.teardown();
                    state.show_status(&self.config);
                    true
                }
                KeyCode::KeyO => {
                    state.pick_names_file(&self.config);
                    true
                }
                KeyCode::KeyB => {
                    let backend = state.overlay.render_backend().toggled();
                    state.overlay.set_render_backend(backend);
                    self.config.render_backend = backend;
                    true
                }
                KeyCode::KeyR => {
                    reload_config(&mut self.config, state, self.config_path.as_deref());
                    true
                }
                _ => false,
            },
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                state.report_cursor();
                false
            }
            WindowEvent::Resized(size) => {
                state.renderer.resize(size.width, size.height);
                if state.background.is_none() {
                    // The blank canvas follows the window size
                    state.overlay.invalidate_backdrop();
                }
                state.update_hover(hover_radius);
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                state.cursor = Some((position.x as f32, position.y as f32));
                state.update_hover(hover_radius)
            }
            WindowEvent::CursorLeft { .. } => {
                state.cursor = None;
                state.update_hover(hover_radius)
            }
            WindowEvent::DroppedFile(path) => {
                state.load_names(&path, &self.config);
                true
            }
            WindowEvent::RedrawRequested => match state.redraw(&self.config) {
                Ok(again) => again,
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (width, height) = (state.renderer.ctx.width(), state.renderer.ctx.height());
                    state.renderer.resize(width, height);
                    true
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("GPU out of memory");
                    event_loop.exit();
                    false
                }
                Err(e) => {
                    log::warn!("Render error: {:?}", e);
                    false
                }
            },
            _ => false,
        };

        if needs_redraw {
            state.window.request_redraw();
        }
    }
}

/// Open the window and run until it closes.
pub fn run(
    config: AppConfig,
    initial_names: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = NameVizApp::new(config, initial_names, config_path);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
