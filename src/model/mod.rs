//! Data models for the name visualizer.

mod record;

pub use record::{NameDataFile, NameRecord, PERCENT_MAX};
