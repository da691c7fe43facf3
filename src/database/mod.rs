/*!
 * Database module for persistent storage of CDLI artifacts.
 *
 * This module provides SQLite-based persistence for:
 * - Artifact identification rows
 * - Inscriptions with their raw ATF and derived text fields
 * - Import run bookkeeping
 */

pub mod schema;
pub mod connection;
pub mod repository;
pub mod models;

// Re-export main types
pub use connection::{DatabaseConnection, DatabaseStats};
pub use models::{ArtifactRow, ImportRunRecord, ImportStatus, InscriptionRecord};
pub use repository::{Repository, StoredRecord, UpsertOutcome};
