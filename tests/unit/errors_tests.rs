/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;

use cdlidb::errors::{LoadError, RecordError};

#[test]
fn test_loadError_unsupportedShape_shouldDisplayPath() {
    let error = LoadError::UnsupportedShape {
        path: PathBuf::from("dump.json"),
    };
    let display = format!("{}", error);
    assert!(display.contains("dump.json"));
    assert!(display.contains("object or array"));
}

#[test]
fn test_loadError_io_shouldExposeSource() {
    let error = LoadError::Io {
        path: PathBuf::from("dump.json"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    };
    assert!(std::error::Error::source(&error).is_some());
    assert!(format!("{}", error).contains("gone"));
}

#[test]
fn test_recordError_isSilent_shouldOnlyHoldForMissingId() {
    assert!(RecordError::MissingId.is_silent());
    assert!(!RecordError::NotAnObject.is_silent());
}

#[test]
fn test_recordError_malformed_shouldDisplayId() {
    let source = serde_json::from_str::<i64>("\"x\"").unwrap_err();
    let error = RecordError::Malformed {
        id: "\"P1\"".to_string(),
        source,
    };
    assert!(format!("{}", error).contains("\"P1\""));
}
