//! Global constants for the name visualizer

/// Default window size (logical pixels)
pub const DEFAULT_WINDOW_SIZE: (u32, u32) = (1280, 800);

/// Padding around the background image inside the window, in pixels
pub const IMAGE_PADDING: f32 = 16.0;

/// Cursor distance (pixels) within which a record counts as hovered
pub const DEFAULT_HOVER_RADIUS: f32 = 24.0;

/// Default angular segment count of the label cylinder
pub const DEFAULT_RADIAL_SEGMENTS: u32 = 192;

/// Fewest angular segments a cylinder can have
pub const MIN_RADIAL_SEGMENTS: u32 = 3;

/// Most angular segments a cylinder can have
pub const MAX_RADIAL_SEGMENTS: u32 = 1024;

/// Largest label canvas side, in pixels
pub const MAX_LABEL_CANVAS: u32 = 4096;

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "NAMEVIZ_CONFIG";

/// Environment variable naming an explicit label font file
pub const FONT_ENV_VAR: &str = "NAMEVIZ_FONT";
