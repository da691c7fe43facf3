/*!
 * Database entity models.
 *
 * These structures map directly to database tables and provide
 * type-safe access to persisted data.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::atf::{extract_atf, AtfExtraction};
use crate::records::ArtifactRecord;

/// Import run status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStatus {
    /// Records are being written
    InProgress,
    /// Every record was processed (some may have been skipped)
    Completed,
    /// The file could not be imported at all
    Failed,
}

impl fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportStatus::InProgress => write!(f, "in_progress"),
            ImportStatus::Completed => write!(f, "completed"),
            ImportStatus::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for ImportStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_progress" => Ok(ImportStatus::InProgress),
            "completed" => Ok(ImportStatus::Completed),
            "failed" => Ok(ImportStatus::Failed),
            _ => Err(anyhow::anyhow!("Invalid import status: {}", s)),
        }
    }
}

/// Artifact identification record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactRow {
    /// CDLI artifact identifier
    pub root_id: i64,
    pub designation: Option<String>,
    pub composite_no: Option<String>,
    pub artifact_type_comments: Option<String>,
    pub excavation_no: Option<String>,
    pub museum_no: Option<String>,
    pub findspot_comments: Option<String>,
    pub findspot_square: Option<String>,
    pub thickness: Option<String>,
    pub height: Option<String>,
    pub width: Option<String>,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
}

impl From<&ArtifactRecord> for ArtifactRow {
    fn from(record: &ArtifactRecord) -> Self {
        Self {
            root_id: record.id,
            designation: record.designation.clone(),
            composite_no: record.composite_no.clone(),
            artifact_type_comments: record.artifact_type_comments.clone(),
            excavation_no: record.excavation_no.clone(),
            museum_no: record.museum_no.clone(),
            findspot_comments: record.findspot_comments.clone(),
            findspot_square: record.findspot_square.clone(),
            thickness: record.thickness.clone(),
            height: record.height.clone(),
            width: record.width.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Inscription record with its derived text fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InscriptionRecord {
    /// CDLI inscription identifier
    pub inscription_id: i64,
    /// Artifact this inscription belongs to
    pub artifact_id: i64,
    /// ATF text exactly as exported
    pub raw_atf: Option<String>,
    /// Normalized content lines
    pub cleaned_transliteration: Option<String>,
    /// Translation lines prefixed with their line numbers
    pub existing_translation: Option<String>,
    /// User-edited translation, never written by imports
    pub personal_translation: Option<String>,
    /// Last update timestamp (ISO 8601)
    pub updated_at: String,
}

impl InscriptionRecord {
    /// Create a new inscription record, deriving both text fields from the raw ATF
    pub fn new(inscription_id: i64, artifact_id: i64, raw_atf: Option<String>) -> Self {
        let AtfExtraction {
            cleaned_transliteration,
            existing_translation,
        } = extract_atf(raw_atf.as_deref());

        Self {
            inscription_id,
            artifact_id,
            raw_atf,
            cleaned_transliteration,
            existing_translation,
            personal_translation: None,
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Replace the raw ATF and recompute the derived fields
    pub fn set_raw_atf(&mut self, raw_atf: Option<String>) {
        let extraction = extract_atf(raw_atf.as_deref());
        self.raw_atf = raw_atf;
        self.cleaned_transliteration = extraction.cleaned_transliteration;
        self.existing_translation = extraction.existing_translation;
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

/// One imported export file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRunRecord {
    /// Unique run identifier (UUID)
    pub id: String,
    /// Path of the imported file
    pub source_path: String,
    /// SHA256 hash of the imported file
    pub source_hash: String,
    /// Records found in the file
    pub record_count: i64,
    /// Records written to the database
    pub imported_count: i64,
    /// Records skipped because they could not be ingested
    pub skipped_count: i64,
    /// Current run status
    pub status: ImportStatus,
    /// Start timestamp (ISO 8601)
    pub started_at: String,
    /// Finish timestamp (ISO 8601), once finished
    pub finished_at: Option<String>,
}

impl ImportRunRecord {
    /// Create a new in-progress import run
    pub fn new(source_path: String, source_hash: String, record_count: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            source_path,
            source_hash,
            record_count,
            imported_count: 0,
            skipped_count: 0,
            status: ImportStatus::InProgress,
            started_at: chrono::Utc::now().to_rfc3339(),
            finished_at: None,
        }
    }

    /// Mark the run as finished with the given counts
    pub fn finish(&mut self, imported_count: i64, skipped_count: i64) {
        self.imported_count = imported_count;
        self.skipped_count = skipped_count;
        self.status = ImportStatus::Completed;
        self.finished_at = Some(chrono::Utc::now().to_rfc3339());
    }

    /// Mark the run as failed; nothing from it was kept
    pub fn fail(&mut self) {
        self.imported_count = 0;
        self.status = ImportStatus::Failed;
        self.finished_at = Some(chrono::Utc::now().to_rfc3339());
    }
}
