//! Glue between the loaded names, the hover selection and the label
//! rendering.
//!
//! The host feeds events in and asks for a [`LabelFrame`] once per redraw.
//! Preparing a frame is idempotent: the label is rasterized only when the
//! active text changes, and the texture is only re-uploaded then.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::coords::{hit_test, Viewport};
use crate::format::LoadError;
use crate::label::{render_curved_label, CurveStyle, GlyphSource, LabelImage};
use crate::model::{NameDataFile, NameRecord};
use crate::selection::{SelectionController, SelectionEvent};
use crate::session::Session;
use crate::texture_cache::{LabelTextureCache, TextureBackend};

/// How the active label reaches the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderBackend {
    /// Textured cylinder mesh drawn over the background
    #[default]
    Mesh3d,
    /// Label composited into the background image on the CPU
    Canvas2d,
}

impl RenderBackend {
    /// The other backend.
    pub fn toggled(self) -> Self {
        match self {
            RenderBackend::Mesh3d => RenderBackend::Canvas2d,
            RenderBackend::Canvas2d => RenderBackend::Mesh3d,
        }
    }
}

/// Everything the composited background depends on.
///
/// The label part is only set for the canvas backend and carries the
/// record's position, so two records sharing a name still differ.
#[derive(Debug, Clone, PartialEq)]
struct BackdropKey {
    revision: u64,
    active: Option<usize>,
    label: Option<(String, f32, f32)>,
}

/// What to draw this frame.
#[derive(Debug)]
pub struct LabelFrame<'a, H> {
    /// All loaded records, for the markers
    pub records: &'a [NameRecord],
    /// Index of the active record
    pub active: Option<usize>,
    /// Active record, if any
    pub record: Option<&'a NameRecord>,
    /// Rasterized label of the active record
    pub label: Option<&'a LabelImage>,
    /// Bound label texture (mesh backend only)
    pub texture: Option<&'a H>,
    /// The background must be composited again: markers or the canvas label
    /// changed since the last frame
    pub backdrop_changed: bool,
    /// A texture change failed to upload and is waiting for another frame
    pub texture_pending: bool,
}

/// Owns the session, the selection and the label texture slot.
pub struct LabelOverlay<B: TextureBackend> {
    session: Session,
    selection: SelectionController,
    style: CurveStyle,
    glyphs: Box<dyn GlyphSource>,
    backend: RenderBackend,
    label: Option<LabelImage>,
    textures: LabelTextureCache<B>,
    /// Bumped whenever the records or the label style change
    revision: u64,
    backdrop: Option<BackdropKey>,
    rasterizations: u64,
}

impl<B: TextureBackend> LabelOverlay<B> {
    pub fn new(
        textures: B,
        glyphs: Box<dyn GlyphSource>,
        style: CurveStyle,
        backend: RenderBackend,
    ) -> Self {
        Self {
            session: Session::new(),
            selection: SelectionController::new(),
            style,
            glyphs,
            backend,
            label: None,
            textures: LabelTextureCache::new(textures),
            revision: 0,
            backdrop: None,
            rasterizations: 0,
        }
    }

    /// Replace the names with uploaded JSON text.
    ///
    /// The selection returns to idle first, whether or not the text is
    /// accepted. A file without records is refused like a broken one and
    /// leaves the viewer waiting for another upload. Returns the number of
    /// loaded records.
    pub fn load_json(&mut self, text: &str) -> Result<usize, LoadError> {
        self.begin_load();
        self.session.upload(text)?;
        self.enter_visualization()
    }

    /// Replace the names with the contents of a file.
    pub fn load_file(&mut self, path: &Path) -> Result<usize, LoadError> {
        self.begin_load();
        self.session.upload_file(path)?;
        self.enter_visualization()
    }

    fn begin_load(&mut self) {
        self.selection.apply(SelectionEvent::DataReloaded, 0);
        self.revision += 1;
    }

    fn enter_visualization(&mut self) -> Result<usize, LoadError> {
        let count = self.session.require_data().map(NameDataFile::len);
        if count.is_err() {
            self.teardown();
        }
        count
    }

    /// Data to visualize, or [`LoadError::EmptyOrMissingData`] when the
    /// viewer is back at the upload step.
    pub fn require_data(&self) -> Result<&NameDataFile, LoadError> {
        self.session.require_data()
    }

    /// Drop the loaded names and the label texture.
    pub fn teardown(&mut self) {
        self.selection.apply(SelectionEvent::DataReloaded, 0);
        self.session.teardown();
        self.revision += 1;
        self.label = None;
        self.textures.clear();
    }

    /// Feed a selection event. Returns `true` if the active record changed.
    pub fn handle(&mut self, event: SelectionEvent) -> bool {
        let count = self.session.data().map_or(0, |data| data.len());
        self.selection.apply(event, count)
    }

    /// Hit-test the cursor against the records and update the selection.
    pub fn hover_at(&mut self, viewport: &Viewport, cursor: (f32, f32), radius: f32) -> bool {
        let hovered = self
            .session
            .data()
            .and_then(|data| hit_test(&data.names, viewport, cursor, radius));
        self.handle(SelectionEvent::from(hovered))
    }

    /// The record the selection points at.
    pub fn active_record(&self) -> Option<&NameRecord> {
        let index = self.selection.active()?;
        self.session.data()?.get(index)
    }

    /// Change the curve style; the label is redrawn on the next frame.
    pub fn set_style(&mut self, style: CurveStyle) {
        if style != self.style {
            self.style = style;
            self.revision += 1;
            self.label = None;
            self.textures.clear();
        }
    }

    /// Switch between the mesh and canvas backends.
    pub fn set_render_backend(&mut self, backend: RenderBackend) {
        if backend != self.backend {
            log::info!("Label backend: {:?}", backend);
            self.backend = backend;
        }
    }

    /// Forget the last composited background so the next frame rebuilds it.
    pub fn invalidate_backdrop(&mut self) {
        self.backdrop = None;
    }

    /// Bring the label and its texture up to date with the selection.
    ///
    /// A failed texture upload is logged and the previous texture stays in
    /// the frame.
    pub fn prepare_frame(&mut self) -> LabelFrame<'_, B::Handle> {
        let wanted = self.active_record().map(|record| record.name.clone());
        match wanted {
            Some(text) => {
                let current = self.label.as_ref().map(LabelImage::text);
                if current != Some(text.as_str()) {
                    self.label = Some(render_curved_label(&text, &self.style, self.glyphs.as_ref()));
                    self.rasterizations += 1;
                    log::debug!("Rasterized label {:?} (#{})", text, self.rasterizations);
                }
            }
            None => self.label = None,
        }

        let staged = match self.backend {
            RenderBackend::Mesh3d => self.label.clone(),
            RenderBackend::Canvas2d => None,
        };
        self.textures.stage(staged);
        if let Err(err) = self.textures.flush() {
            log::warn!("Label texture upload failed, keeping previous: {}", err);
        }

        let active = self.active_record().and(self.selection.active());
        let key = BackdropKey {
            revision: self.revision,
            active,
            label: match (self.backend, self.active_record(), &self.label) {
                (RenderBackend::Canvas2d, Some(record), Some(_)) => {
                    Some((record.name.clone(), record.x, record.y))
                }
                _ => None,
            },
        };
        let backdrop_changed = self.backdrop.as_ref() != Some(&key);
        self.backdrop = Some(key);

        LabelFrame {
            records: self
                .session
                .data()
                .map(|data| data.names.as_slice())
                .unwrap_or_default(),
            active,
            record: self.active_record(),
            label: self.label.as_ref(),
            texture: self.textures.bound(),
            backdrop_changed,
            texture_pending: self.textures.is_dirty(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn render_backend(&self) -> RenderBackend {
        self.backend
    }

    /// How many times a label has been rasterized.
    #[cfg(test)]
    pub fn rasterizations(&self) -> u64 {
        self.rasterizations
    }
}
