//! Named points placed on the background image.

use serde::{Deserialize, Serialize};

/// Upper bound of a percentage coordinate.
pub const PERCENT_MAX: f32 = 100.0;

/// A name anchored at a point on the image.
///
/// `x` and `y` are percentages of the image's rendered bounding box, so the
/// same record lands on the same spot regardless of image resolution or
/// display size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameRecord {
    /// Display name (non-empty)
    pub name: String,
    /// Horizontal position, 0..=100 percent of the image width
    pub x: f32,
    /// Vertical position, 0..=100 percent of the image height
    pub y: f32,
}

impl NameRecord {
    /// Create a new record.
    pub fn new(name: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }
}

/// The uploaded file: an ordered list of named points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameDataFile {
    pub names: Vec<NameRecord>,
}

impl NameDataFile {
    /// Create a data file from records.
    pub fn new(names: Vec<NameRecord>) -> Self {
        Self { names }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the file holds no records.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Record at `index`, if in bounds.
    pub fn get(&self, index: usize) -> Option<&NameRecord> {
        self.names.get(index)
    }
}
