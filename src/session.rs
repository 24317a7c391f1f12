//! Ephemeral session store for uploaded name data.
//!
//! Holds the last successfully uploaded file for as long as the viewer runs.
//! The store is an explicit value passed to whoever needs it; there is no
//! global state.

use std::path::Path;

use crate::format::{load_names_file, parse_names_json, LoadError};
use crate::model::NameDataFile;

/// Raw and parsed form of an accepted upload.
#[derive(Debug, Clone)]
struct StoredData {
    raw_json: String,
    data: NameDataFile,
}

/// Session context owning the current name data.
#[derive(Debug, Default)]
pub struct Session {
    stored: Option<StoredData>,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store uploaded JSON text.
    ///
    /// A rejected upload clears any previously stored data so that no stale
    /// file outlives a failed load.
    pub fn upload(&mut self, text: &str) -> Result<&NameDataFile, LoadError> {
        match parse_names_json(text) {
            Ok(data) => Ok(self.store(text.to_string(), data)),
            Err(err) => {
                self.teardown();
                Err(err)
            }
        }
    }

    /// Validate and store a names file from disk.
    pub fn upload_file(&mut self, path: &Path) -> Result<&NameDataFile, LoadError> {
        match load_names_file(path) {
            Ok((text, data)) => Ok(self.store(text, data)),
            Err(err) => {
                self.teardown();
                Err(err)
            }
        }
    }

    fn store(&mut self, raw_json: String, data: NameDataFile) -> &NameDataFile {
        log::info!("Session holds {} names", data.len());
        &self.stored.insert(StoredData { raw_json, data }).data
    }

    /// Drop the stored data.
    pub fn teardown(&mut self) {
        if self.stored.take().is_some() {
            log::debug!("Session data cleared");
        }
    }

    /// Current data, if any.
    pub fn data(&self) -> Option<&NameDataFile> {
        self.stored.as_ref().map(|s| &s.data)
    }

    /// The JSON text the current data was parsed from.
    pub fn raw_json(&self) -> Option<&str> {
        self.stored.as_ref().map(|s| s.raw_json.as_str())
    }

    /// Current data for the visualization view.
    ///
    /// Fails with [`LoadError::EmptyOrMissingData`] when nothing is stored or
    /// the stored file has no records.
    pub fn require_data(&self) -> Result<&NameDataFile, LoadError> {
        self.data()
            .filter(|data| !data.is_empty())
            .ok_or(LoadError::EmptyOrMissingData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{"names":[{"name":"Jane Smith","x":70,"y":60}]}"#;

    #[test]
    fn test_new_session_has_no_data() {
        let session = Session::new();
        assert!(session.data().is_none());
        assert!(matches!(
            session.require_data(),
            Err(LoadError::EmptyOrMissingData)
        ));
    }

    #[test]
    fn test_upload_stores_data_and_text() {
        let mut session = Session::new();
        let data = session.upload(VALID).expect("valid upload");
        assert_eq!(data.names[0].name, "Jane Smith");
        assert_eq!(session.raw_json(), Some(VALID));
        assert_eq!(session.require_data().map(|d| d.len()).ok(), Some(1));
    }

    #[test]
    fn test_rejected_upload_clears_previous_data() {
        let mut session = Session::new();
        session.upload(VALID).expect("valid upload");

        let err = session
            .upload(r#"{"names":[{"name":"Jane","x":"70","y":60}]}"#)
            .unwrap_err();
        assert!(matches!(err, LoadError::SchemaViolation { .. }));
        assert!(session.data().is_none());
        assert!(session.raw_json().is_none());
    }

    #[test]
    fn test_replacing_upload_swaps_data() {
        let mut session = Session::new();
        session.upload(VALID).expect("first upload");
        session
            .upload(r#"{"names":[{"name":"A","x":1,"y":2},{"name":"B","x":3,"y":4}]}"#)
            .expect("second upload");
        assert_eq!(session.data().map(NameDataFile::len), Some(2));
    }

    #[test]
    fn test_empty_list_counts_as_missing_data() {
        let mut session = Session::new();
        session.upload(r#"{"names":[]}"#).expect("well formed");
        assert!(session.data().is_some());
        assert!(matches!(
            session.require_data(),
            Err(LoadError::EmptyOrMissingData)
        ));
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let mut session = Session::new();
        session.upload(VALID).expect("valid upload");
        session.teardown();
        session.teardown();
        assert!(session.data().is_none());
    }
}
