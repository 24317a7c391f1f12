//! Name data file loading and validation.
//!
//! The upload boundary: text or a file path goes in, a validated
//! [`NameDataFile`](crate::model::NameDataFile) comes out, or the whole file
//! is rejected. No partially valid data is ever admitted.
//!
//! ## Format
//!
//! ```json
//! { "names": [ { "name": "John Doe", "x": 30, "y": 40 } ] }
//! ```

mod error;
mod names_json;

#[cfg(test)]
mod tests;

pub use error::LoadError;
pub use names_json::{
    is_names_file, load_names_file, parse_names_json, NAMES_EXTENSION, SAMPLE_JSON,
};
