//! Glyph outlines for the label rasterizer.
//!
//! The rasterizer only needs one thing from a font: the outline of a single
//! character, centered on its anchor point. [`GlyphSource`] is that seam;
//! [`LabelFont`] implements it with `ab_glyph`.

use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontArc, OutlineCurve, Point, ScaleFont};
use thiserror::Error;
use tiny_skia::PathBuilder;

use crate::constants::FONT_ENV_VAR;

/// Well-known font locations searched when no font is configured.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation2/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Errors that can occur while loading a label font.
#[derive(Error, Debug)]
pub enum FontError {
    /// The font file could not be read
    #[error("IO error reading font {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a usable font
    #[error("Invalid font data: {0}")]
    Invalid(String),

    /// No configured font and none of the well-known locations exist
    #[error("No usable font found; set {} or font_path in the config", FONT_ENV_VAR)]
    NotFound,
}

/// Source of per-character outlines.
pub trait GlyphSource {
    /// Outline of `ch` at `px_size` pixels.
    ///
    /// The path is in a y-down pixel frame whose origin is the glyph's
    /// anchor: horizontally the middle of its advance, vertically the middle
    /// between ascent and descent. Returns `None` for characters with nothing
    /// to draw (whitespace, glyphs missing from the font).
    fn glyph_path(&self, ch: char, px_size: f32) -> Option<tiny_skia::Path>;
}

/// An `ab_glyph` font used to draw labels.
#[derive(Clone)]
pub struct LabelFont {
    font: FontArc,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFont")
            .field("glyph_count", &self.font.glyph_count())
            .finish()
    }
}

impl LabelFont {
    /// Parse a font from TTF/OTF bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, FontError> {
        let font = FontArc::try_from_vec(data).map_err(|e| FontError::Invalid(e.to_string()))?;
        Ok(Self { font })
    }

    /// Read a font file.
    pub fn from_path(path: &Path) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(data)
    }

    /// Load the configured font, or discover one.
    ///
    /// Order: `explicit`, then the path in the font environment variable, then
    /// the well-known system locations. An explicit path that fails to load is
    /// an error; discovery failures fall through to the next candidate.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, FontError> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }

        if let Ok(custom_path) = std::env::var(FONT_ENV_VAR) {
            match Self::from_path(Path::new(&custom_path)) {
                Ok(font) => return Ok(font),
                Err(e) => log::warn!("Ignoring {}: {}", FONT_ENV_VAR, e),
            }
        }

        for &candidate in FONT_CANDIDATES {
            if let Ok(font) = Self::from_path(Path::new(candidate)) {
                log::info!("Using label font {}", candidate);
                return Ok(font);
            }
        }

        Err(FontError::NotFound)
    }
}

impl GlyphSource for LabelFont {
    fn glyph_path(&self, ch: char, px_size: f32) -> Option<tiny_skia::Path> {
        let id = self.font.glyph_id(ch);
        if id.0 == 0 {
            // .notdef: character not in the font
            return None;
        }

        let outline = self.font.outline(id)?;
        let scaled = self.font.as_scaled(px_size);
        let sx = scaled.h_scale_factor();
        let sy = scaled.v_scale_factor();
        let half_advance = scaled.h_advance(id) * 0.5;
        // Font units are y-up with the baseline at 0; descent is negative
        let middle = (scaled.ascent() + scaled.descent()) * 0.5;

        let map = |p: Point| (p.x * sx - half_advance, middle - p.y * sy);
        build_path(&outline.curves, map)
    }
}

/// Convert outline curves into a path, starting a new contour whenever a
/// curve does not continue from the previous end point.
fn build_path(
    curves: &[OutlineCurve],
    map: impl Fn(Point) -> (f32, f32),
) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    let mut last: Option<Point> = None;

    for curve in curves {
        let (start, end) = match curve {
            OutlineCurve::Line(a, b) => (*a, *b),
            OutlineCurve::Quad(a, _, b) => (*a, *b),
            OutlineCurve::Cubic(a, _, _, b) => (*a, *b),
        };

        if last != Some(start) {
            if last.is_some() {
                builder.close();
            }
            let (x, y) = map(start);
            builder.move_to(x, y);
        }

        match curve {
            OutlineCurve::Line(_, b) => {
                let (x, y) = map(*b);
                builder.line_to(x, y);
            }
            OutlineCurve::Quad(_, c, b) => {
                let (cx, cy) = map(*c);
                let (x, y) = map(*b);
                builder.quad_to(cx, cy, x, y);
            }
            OutlineCurve::Cubic(_, c1, c2, b) => {
                let (c1x, c1y) = map(*c1);
                let (c2x, c2y) = map(*c2);
                let (x, y) = map(*b);
                builder.cubic_to(c1x, c1y, c2x, c2y, x, y);
            }
        }
        last = Some(end);
    }

    if last.is_some() {
        builder.close();
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ab_glyph::point;

    #[test]
    fn test_invalid_bytes_are_rejected() {
        let err = LabelFont::from_bytes(vec![0, 1, 2, 3]).unwrap_err();
        assert!(matches!(err, FontError::Invalid(_)));
    }

    #[test]
    fn test_missing_explicit_path_is_io_error() {
        let path = std::env::temp_dir().join("nameviz-no-such-font.ttf");
        let err = LabelFont::discover(Some(&path)).unwrap_err();
        assert!(matches!(err, FontError::Io { .. }));
    }

    #[test]
    fn test_build_path_from_square_contour() {
        let corners = [point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0), point(0.0, 10.0)];
        let curves: Vec<OutlineCurve> = (0..4)
            .map(|i| OutlineCurve::Line(corners[i], corners[(i + 1) % 4]))
            .collect();

        let path = build_path(&curves, |p| (p.x, -p.y)).expect("non-empty path");
        let bounds = path.bounds();
        assert_eq!(bounds.left(), 0.0);
        assert_eq!(bounds.right(), 10.0);
        assert_eq!(bounds.top(), -10.0);
        assert_eq!(bounds.bottom(), 0.0);
    }

    #[test]
    fn test_build_path_handles_curves_and_multiple_contours() {
        let curves = vec![
            OutlineCurve::Quad(point(0.0, 0.0), point(5.0, 10.0), point(10.0, 0.0)),
            OutlineCurve::Line(point(10.0, 0.0), point(0.0, 0.0)),
            // Second contour, disjoint from the first
            OutlineCurve::Cubic(
                point(20.0, 0.0),
                point(22.0, 4.0),
                point(28.0, 4.0),
                point(30.0, 0.0),
            ),
            OutlineCurve::Line(point(30.0, 0.0), point(20.0, 0.0)),
        ];

        let path = build_path(&curves, |p| (p.x, p.y)).expect("non-empty path");
        assert_eq!(path.bounds().left(), 0.0);
        assert_eq!(path.bounds().right(), 30.0);
    }

    #[test]
    fn test_build_path_empty_outline() {
        assert!(build_path(&[], |p| (p.x, p.y)).is_none());
    }
}
