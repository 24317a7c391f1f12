//! Name visualizer
//!
//! Loads a JSON list of named points on an image and shows the hovered name
//! as text wrapped around a 3D cylinder (or composited flat into the image).

pub mod config;
pub mod constants;
pub mod coords;
pub mod format;
pub mod label;
pub mod model;
pub mod overlay;
pub mod scene;
pub mod selection;
pub mod session;
pub mod texture_cache;

#[cfg(not(target_arch = "wasm32"))]
pub mod app;
#[cfg(not(target_arch = "wasm32"))]
pub mod cli;
#[cfg(not(target_arch = "wasm32"))]
pub mod render;

pub use config::AppConfig;
pub use overlay::{LabelFrame, LabelOverlay, RenderBackend};
