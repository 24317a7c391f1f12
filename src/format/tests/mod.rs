//! Unit tests for the names file format.
//!
//! These cover acceptance of well-formed uploads and rejection of every kind
//! of malformed or mis-shaped input.

mod names_json_tests;
