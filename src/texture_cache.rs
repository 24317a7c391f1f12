//! Single-slot texture cache for the active label.
//!
//! Exactly one label texture is live at a time. Replacing it uploads the new
//! one first and only then releases the old one, so a failed upload leaves
//! the previous texture bound and nothing half-built is ever visible. Every
//! handle handed out by the backend is released exactly once: on
//! replacement, on [`LabelTextureCache::clear`], or when the cache drops.

use crate::label::LabelImage;

/// Creates and frees GPU-side label textures.
pub trait TextureBackend {
    /// Bindable texture resource.
    type Handle;
    /// Upload failure.
    type Error: std::fmt::Display;

    /// Create a texture holding the label's pixels.
    fn upload(&mut self, label: &LabelImage) -> Result<Self::Handle, Self::Error>;

    /// Free a texture previously returned by [`TextureBackend::upload`].
    fn release(&mut self, handle: Self::Handle);
}

struct Bound<H> {
    label: LabelImage,
    handle: H,
}

/// Owns the backend and the one bound label texture.
pub struct LabelTextureCache<B: TextureBackend> {
    backend: B,
    bound: Option<Bound<B::Handle>>,
    staged: Option<LabelImage>,
    dirty: bool,
}

impl<B: TextureBackend> LabelTextureCache<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            bound: None,
            staged: None,
            dirty: false,
        }
    }

    /// Text of the label the slot will hold after the next flush.
    fn target_key(&self) -> Option<&str> {
        if self.dirty {
            self.staged.as_ref().map(LabelImage::text)
        } else {
            self.bound_label().map(LabelImage::text)
        }
    }

    /// Request `label` (or nothing) for the slot.
    ///
    /// Marks the slot dirty only if the label text differs from what is
    /// bound or already staged.
    pub fn stage(&mut self, label: Option<LabelImage>) {
        let new_key = label.as_ref().map(LabelImage::text);
        if new_key == self.target_key() {
            return;
        }
        log::trace!("Label texture staged: {:?}", new_key);
        self.staged = label;
        self.dirty = true;
    }

    /// Apply the staged change, if any, and return the bound texture.
    ///
    /// On upload failure the previous texture stays bound and the change
    /// stays staged for the next attempt.
    pub fn flush(&mut self) -> Result<Option<&B::Handle>, B::Error> {
        if self.dirty {
            let replacement = match &self.staged {
                Some(label) => {
                    let handle = self.backend.upload(label)?;
                    Some(Bound {
                        label: label.clone(),
                        handle,
                    })
                }
                None => None,
            };

            if let Some(old) = std::mem::replace(&mut self.bound, replacement) {
                self.backend.release(old.handle);
            }
            self.staged = None;
            self.dirty = false;
        }
        Ok(self.bound())
    }

    /// Currently bound texture.
    pub fn bound(&self) -> Option<&B::Handle> {
        self.bound.as_ref().map(|b| &b.handle)
    }

    /// Label the bound texture was created from.
    fn bound_label(&self) -> Option<&LabelImage> {
        self.bound.as_ref().map(|b| &b.label)
    }

    /// Whether a staged change awaits [`LabelTextureCache::flush`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Release the bound texture and drop anything staged.
    pub fn clear(&mut self) {
        self.staged = None;
        self.dirty = false;
        if let Some(old) = self.bound.take() {
            self.backend.release(old.handle);
        }
    }
}

impl<B: TextureBackend> Drop for LabelTextureCache<B> {
    fn drop(&mut self) {
        self.clear();
    }
}
