//! Tests for the `{"names": [...]}` JSON format.

use std::path::PathBuf;

use crate::format::{is_names_file, load_names_file, parse_names_json, LoadError, SAMPLE_JSON};
use crate::model::NameRecord;

/// Write `contents` to a file unique to this test process.
fn write_temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("nameviz-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).expect("write temp file");
    path
}

fn schema_message(err: LoadError) -> String {
    match err {
        LoadError::SchemaViolation { message } => message,
        other => panic!("expected SchemaViolation, got {:?}", other),
    }
}

#[test]
fn test_accepts_single_record() {
    let data = parse_names_json(r#"{"names":[{"name":"Jane Smith","x":70,"y":60}]}"#)
        .expect("valid upload");
    assert_eq!(data.names, vec![NameRecord::new("Jane Smith", 70.0, 60.0)]);
}

#[test]
fn test_accepts_sample_and_keeps_order() {
    let data = parse_names_json(SAMPLE_JSON).expect("sample must be valid");
    let names: Vec<&str> = data.names.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["John Doe", "Jane Smith"]);
    assert_eq!(data.names[0].x, 30.0);
    assert_eq!(data.names[0].y, 40.0);
}

#[test]
fn test_accepts_fractional_and_boundary_coordinates() {
    let data = parse_names_json(
        r#"{"names":[{"name":"a","x":0,"y":100},{"name":"b","x":12.5,"y":99.75}]}"#,
    )
    .expect("boundaries are inclusive");
    assert_eq!(data.names[0].y, 100.0);
    assert_eq!(data.names[1].x, 12.5);
}

#[test]
fn test_ignores_extra_fields() {
    let data = parse_names_json(
        r#"{"version":2,"names":[{"name":"a","x":1,"y":2,"color":"red"}]}"#,
    )
    .expect("extra fields are allowed");
    assert_eq!(data.len(), 1);
}

#[test]
fn test_accepts_empty_list() {
    let data = parse_names_json(r#"{"names":[]}"#).expect("empty list is well formed");
    assert!(data.is_empty());
}

#[test]
fn test_rejects_string_coordinate() {
    let err = parse_names_json(r#"{"names":[{"name":"Jane",  "x":"70","y":60}]}"#).unwrap_err();
    let message = schema_message(err);
    assert!(message.contains("names[0].x"), "message was {:?}", message);
}

#[test]
fn test_rejects_malformed_json() {
    let err = parse_names_json(r#"{"names":[{"name":"Jane""#).unwrap_err();
    assert!(matches!(err, LoadError::MalformedJson(_)));
    assert!(err.is_content_error());
}

#[test]
fn test_rejects_missing_names_array() {
    for text in [r#"{}"#, r#"{"names":{"name":"a"}}"#, r#"[1,2,3]"#, r#""names""#] {
        let err = parse_names_json(text).unwrap_err();
        assert!(schema_message(err).contains("names"), "input {}", text);
    }
}

#[test]
fn test_rejects_whole_file_on_single_bad_entry() {
    let err = parse_names_json(
        r#"{"names":[{"name":"ok","x":1,"y":1},{"name":"bad","x":1}]}"#,
    )
    .unwrap_err();
    assert_eq!(schema_message(err), "names[1].y must be a number");
}

#[test]
fn test_rejects_non_string_and_empty_names() {
    let err = parse_names_json(r#"{"names":[{"name":42,"x":1,"y":1}]}"#).unwrap_err();
    assert_eq!(schema_message(err), "names[0].name must be a string");

    let err = parse_names_json(r#"{"names":[{"name":"","x":1,"y":1}]}"#).unwrap_err();
    assert_eq!(schema_message(err), "names[0].name must not be empty");
}

#[test]
fn test_accepts_whitespace_name_verbatim() {
    let data = parse_names_json(r#"{"names":[{"name":"  ","x":1,"y":1}]}"#)
        .expect("whitespace is still a non-empty string");
    assert_eq!(data.names, vec![NameRecord::new("  ", 1.0, 1.0)]);
}

#[test]
fn test_rejects_non_object_entry() {
    let err = parse_names_json(r#"{"names":["Jane"]}"#).unwrap_err();
    assert_eq!(schema_message(err), "names[0] must be an object");
}

#[test]
fn test_rejects_out_of_range_coordinate() {
    let err = parse_names_json(r#"{"names":[{"name":"a","x":101,"y":1}]}"#).unwrap_err();
    assert!(schema_message(err).starts_with("names[0].x must be between 0 and 100"));

    let err = parse_names_json(r#"{"names":[{"name":"a","x":1,"y":-0.5}]}"#).unwrap_err();
    assert!(schema_message(err).starts_with("names[0].y must be between 0 and 100"));
}

#[test]
fn test_is_names_file() {
    assert!(is_names_file(&PathBuf::from("people.json")));
    assert!(is_names_file(&PathBuf::from("dir/PEOPLE.JSON")));
    assert!(!is_names_file(&PathBuf::from("people.txt")));
    assert!(!is_names_file(&PathBuf::from("json")));
}

#[test]
fn test_load_names_file_reads_and_validates() {
    let path = write_temp_file("load-ok.json", SAMPLE_JSON);
    let (text, data) = load_names_file(&path).expect("sample file loads");
    assert_eq!(text, SAMPLE_JSON);
    assert_eq!(data.len(), 2);
    let _ = std::fs::remove_file(path);
}

#[test]
fn test_load_names_file_rejects_other_extensions() {
    let path = write_temp_file("load-wrong.txt", SAMPLE_JSON);
    let err = load_names_file(&path).unwrap_err();
    assert!(matches!(err, LoadError::UnsupportedFileType { .. }));
    assert!(!err.is_content_error());
    let _ = std::fs::remove_file(path);
}

#[test]
fn test_load_names_file_missing_file_is_io_error() {
    let path = std::env::temp_dir().join("nameviz-definitely-missing-file.json");
    let err = load_names_file(&path).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}
