//! Tunables of the cylindrical text effect.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_LABEL_CANVAS;

/// Parameters controlling how strongly a label appears wrapped around a
/// cylinder, plus the font size, color and canvas it is drawn on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveStyle {
    /// Horizontal reach of the arc in pixels (`dx = sin(angle) * radius`)
    pub radius: f32,
    /// Vertical sag of the arc in pixels (`dy = cos(angle) * vertical_bend`)
    pub vertical_bend: f32,
    /// Fraction of a half turn the whole string spans
    pub curvature_factor: f32,
    /// Scales each glyph's rotation; below 1 so letters don't over-rotate
    pub rotation_damping: f32,
    /// Font size in pixels
    pub font_size: f32,
    /// Fill color (RGBA)
    pub color: [u8; 4],
    /// Width of the label canvas in pixels
    pub canvas_width: u32,
    /// Height of the label canvas in pixels
    pub canvas_height: u32,
}

impl Default for CurveStyle {
    fn default() -> Self {
        Self {
            radius: 150.0,
            vertical_bend: 20.0,
            curvature_factor: 0.7,
            rotation_damping: 0.5,
            font_size: 32.0,
            color: [255, 255, 255, 255],
            canvas_width: 512,
            canvas_height: 128,
        }
    }
}

impl CurveStyle {
    /// Canvas size, clamped to `1..=MAX_LABEL_CANVAS` in each direction.
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.canvas_width.clamp(1, MAX_LABEL_CANVAS),
            self.canvas_height.clamp(1, MAX_LABEL_CANVAS),
        )
    }

    /// Point the arc is laid out around: the middle of the canvas.
    pub fn center(&self) -> (f32, f32) {
        let (w, h) = self.canvas_size();
        (w as f32 * 0.5, h as f32 * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_size_is_clamped() {
        let tiny = CurveStyle {
            canvas_width: 0,
            canvas_height: 0,
            ..CurveStyle::default()
        };
        assert_eq!(tiny.canvas_size(), (1, 1));

        let huge = CurveStyle {
            canvas_width: u32::MAX,
            canvas_height: 200_000,
            ..CurveStyle::default()
        };
        assert_eq!(huge.canvas_size(), (MAX_LABEL_CANVAS, MAX_LABEL_CANVAS));
        assert_eq!(huge.center(), (2048.0, 2048.0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let style: CurveStyle = serde_json::from_str(r#"{"font_size": 18.0}"#).expect("parse");
        assert_eq!(style.font_size, 18.0);
        assert_eq!(style.canvas_size(), (512, 128));
    }
}
