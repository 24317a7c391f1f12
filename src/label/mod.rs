//! Label rendering: curved text rasterization, record markers and the 2D
//! composite backend.

mod composite;
mod font;
mod markers;
mod raster;
mod style;

pub use composite::composite_label;
pub use font::{FontError, GlyphSource, LabelFont};
pub use markers::{draw_markers, MarkerStyle};
pub use raster::{layout_curved_glyphs, render_curved_label, GlyphPlacement, LabelImage};
pub use style::CurveStyle;

#[cfg(test)]
pub(crate) use raster::tests::BlockGlyphs;
