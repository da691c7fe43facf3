/*!
 * Error types for the cdlidb application.
 *
 * The ATF core never fails; these cover loading export files and
 * turning raw JSON values into artifact records, using the thiserror
 * crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading a CDLI export file
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read
    #[error("Failed to read {path:?}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file holds a JSON scalar instead of an object or array
    #[error("JSON in {path:?} must contain an object or array of objects")]
    UnsupportedShape {
        /// File being read
        path: PathBuf,
    },

    /// Neither whole-file nor line-by-line parsing found any object
    #[error("No valid JSON objects found in {path:?}")]
    NoRecords {
        /// File being read
        path: PathBuf,
    },
}

/// Errors that can occur when converting a JSON value into an artifact record
#[derive(Error, Debug)]
pub enum RecordError {
    /// The value is not a JSON object
    #[error("Record is not a JSON object")]
    NotAnObject,

    /// The record has no `id` field
    #[error("Record has no id")]
    MissingId,

    /// A field has an unexpected type
    #[error("Malformed record {id}: {source}")]
    Malformed {
        /// Raw `id` value, as found in the record
        id: String,
        /// Deserialization error
        #[source]
        source: serde_json::Error,
    },
}

impl RecordError {
    /// Whether the record should be skipped silently rather than reported
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::MissingId)
    }
}
