/*!
 * # cdlidb - CDLI artifact importer
 *
 * A Rust library for loading CDLI (Cuneiform Digital Library Initiative)
 * JSON exports into SQLite, deriving a cleaned transliteration and an
 * aligned translation from each inscription's ATF text.
 *
 * ## Features
 *
 * - ATF digraph normalization (`sz` → `š`, `s,` → `ṣ`, `t,` → `ṭ`, `h` → `ḫ`)
 * - Logogram spans (`_e2_`) rendered in upper case
 * - Translation lines aligned with the line numbers they translate
 * - JSON, JSON array and JSON-lines exports
 * - Re-imports refresh derived fields without touching personal translations
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `atf`: Pure ATF processing:
 *   - `atf::normalizer`: Character normalization
 *   - `atf::line`: Line splitting and classification
 *   - `atf::extractor`: Cleaned transliteration and existing translation
 * - `records`: Artifact records as found in exports
 * - `file_utils`: Export file discovery and loading
 * - `database`: SQLite persistence
 * - `importer`: Bulk import with progress reporting
 * - `app_config`: Configuration management
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod atf;
pub mod database;
pub mod errors;
pub mod file_utils;
pub mod importer;
pub mod records;

// Re-export main types for easier usage
pub use app_config::Config;
pub use atf::{extract_cleaned_transliteration, extract_existing_translation, normalize_line};
pub use errors::{LoadError, RecordError};
pub use importer::{ImportSummary, Importer};
pub use records::{ArtifactRecord, InscriptionData};
