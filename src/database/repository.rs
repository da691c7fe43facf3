/*!
 * Repository layer for database operations.
 *
 * This module provides a high-level API for all database operations,
 * abstracting away the SQL details and providing type-safe access.
 * The `*_sync` functions take a bare connection so they can run inside
 * a caller-managed transaction.
 */

use anyhow::Result;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use super::connection::DatabaseConnection;
use super::models::{ArtifactRow, ImportRunRecord, ImportStatus, InscriptionRecord};
use crate::atf::extract_atf;
use crate::records::{ArtifactRecord, InscriptionData};

/// What happened to an inscription during an upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new row was written
    Inserted,
    /// An existing row had its raw ATF replaced and derived fields recomputed
    Updated,
}

/// Result of storing one artifact record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredRecord {
    /// Whether the artifact row was new
    pub artifact_inserted: bool,
    /// Inscription outcome, `None` if the record had no usable inscription
    pub inscription: Option<UpsertOutcome>,
}

const INSCRIPTION_COLUMNS: &str = "inscription_id, artifact_id, raw_atf, cleaned_transliteration, \
     existing_translation, personal_translation, updated_at";

fn parse_inscription_row(row: &rusqlite::Row) -> rusqlite::Result<InscriptionRecord> {
    Ok(InscriptionRecord {
        inscription_id: row.get(0)?,
        artifact_id: row.get(1)?,
        raw_atf: row.get(2)?,
        cleaned_transliteration: row.get(3)?,
        existing_translation: row.get(4)?,
        personal_translation: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn parse_import_run_row(row: &rusqlite::Row) -> rusqlite::Result<ImportRunRecord> {
    Ok(ImportRunRecord {
        id: row.get(0)?,
        source_path: row.get(1)?,
        source_hash: row.get(2)?,
        record_count: row.get(3)?,
        imported_count: row.get(4)?,
        skipped_count: row.get(5)?,
        status: row
            .get::<_, String>(6)?
            .parse()
            .unwrap_or(ImportStatus::InProgress),
        started_at: row.get(7)?,
        finished_at: row.get(8)?,
    })
}

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Underlying connection, for transactions spanning several operations
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    // =========================================================================
    // Artifact Operations
    // =========================================================================

    /// Insert an artifact unless one with the same root id already exists.
    ///
    /// Returns `true` if a row was written.
    pub fn upsert_artifact_sync(conn: &Connection, artifact: &ArtifactRow) -> Result<bool> {
        let changed = conn.execute(
            r#"
            INSERT OR IGNORE INTO artifacts (
                root_id, designation, composite_no, artifact_type_comments, excavation_no,
                museum_no, findspot_comments, findspot_square, thickness, height, width,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                artifact.root_id,
                artifact.designation,
                artifact.composite_no,
                artifact.artifact_type_comments,
                artifact.excavation_no,
                artifact.museum_no,
                artifact.findspot_comments,
                artifact.findspot_square,
                artifact.thickness,
                artifact.height,
                artifact.width,
                artifact.created_at,
            ],
        )?;
        Ok(changed > 0)
    }

    /// Get an artifact by root id
    pub async fn get_artifact(&self, root_id: i64) -> Result<Option<ArtifactRow>> {
        self.db
            .execute_async(move |conn| {
                let result = conn
                    .query_row(
                        r#"
                        SELECT root_id, designation, composite_no, artifact_type_comments,
                               excavation_no, museum_no, findspot_comments, findspot_square,
                               thickness, height, width, created_at
                        FROM artifacts WHERE root_id = ?1
                        "#,
                        [root_id],
                        |row| {
                            Ok(ArtifactRow {
                                root_id: row.get(0)?,
                                designation: row.get(1)?,
                                composite_no: row.get(2)?,
                                artifact_type_comments: row.get(3)?,
                                excavation_no: row.get(4)?,
                                museum_no: row.get(5)?,
                                findspot_comments: row.get(6)?,
                                findspot_square: row.get(7)?,
                                thickness: row.get(8)?,
                                height: row.get(9)?,
                                width: row.get(10)?,
                                created_at: row.get(11)?,
                            })
                        },
                    )
                    .optional()?;
                Ok(result)
            })
            .await
    }

    // =========================================================================
    // Inscription Operations
    // =========================================================================

    /// Get an inscription by ID (synchronous version for use within transactions)
    pub fn get_inscription_sync(
        conn: &Connection,
        inscription_id: i64,
    ) -> Result<Option<InscriptionRecord>> {
        let sql = format!(
            "SELECT {} FROM inscriptions WHERE inscription_id = ?1",
            INSCRIPTION_COLUMNS
        );
        let result = conn
            .query_row(&sql, [inscription_id], parse_inscription_row)
            .optional()?;
        Ok(result)
    }

    fn insert_inscription_sync(conn: &Connection, inscription: &InscriptionRecord) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO inscriptions (
                inscription_id, artifact_id, raw_atf, cleaned_transliteration,
                existing_translation, personal_translation, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                inscription.inscription_id,
                inscription.artifact_id,
                inscription.raw_atf,
                inscription.cleaned_transliteration,
                inscription.existing_translation,
                inscription.personal_translation,
                inscription.updated_at,
            ],
        )?;
        Ok(())
    }

    // personal_translation is deliberately absent from this statement
    fn update_inscription_text_sync(conn: &Connection, inscription: &InscriptionRecord) -> Result<()> {
        conn.execute(
            r#"
            UPDATE inscriptions
            SET raw_atf = ?1, cleaned_transliteration = ?2, existing_translation = ?3, updated_at = ?4
            WHERE inscription_id = ?5
            "#,
            params![
                inscription.raw_atf,
                inscription.cleaned_transliteration,
                inscription.existing_translation,
                inscription.updated_at,
                inscription.inscription_id,
            ],
        )?;
        Ok(())
    }

    /// Insert a new inscription or refresh the raw ATF of an existing one.
    ///
    /// When the incoming data has no `atf` key the stored raw text is kept
    /// and the derived fields are recomputed from it.
    pub fn upsert_inscription_sync(
        conn: &Connection,
        artifact_id: i64,
        inscription_id: i64,
        data: &InscriptionData,
    ) -> Result<UpsertOutcome> {
        match Self::get_inscription_sync(conn, inscription_id)? {
            None => {
                let record = InscriptionRecord::new(
                    inscription_id,
                    artifact_id,
                    data.raw_atf().map(str::to_string),
                );
                Self::insert_inscription_sync(conn, &record)?;
                Ok(UpsertOutcome::Inserted)
            }
            Some(mut existing) => {
                let raw_atf = match &data.atf {
                    Some(atf) => atf.clone(),
                    None => existing.raw_atf.take(),
                };
                existing.set_raw_atf(raw_atf);
                Self::update_inscription_text_sync(conn, &existing)?;
                debug!("Updated inscription {}", inscription_id);
                Ok(UpsertOutcome::Updated)
            }
        }
    }

    /// Store one artifact record with its inscription.
    ///
    /// The record is written under a savepoint: if the inscription cannot be
    /// stored, the artifact row is rolled back too.
    pub fn store_record_sync(conn: &Connection, record: &ArtifactRecord) -> Result<StoredRecord> {
        conn.execute_batch("SAVEPOINT store_record")?;

        match Self::store_record_parts_sync(conn, record) {
            Ok(stored) => {
                conn.execute_batch("RELEASE store_record")?;
                Ok(stored)
            }
            Err(e) => {
                conn.execute_batch("ROLLBACK TO store_record; RELEASE store_record")?;
                Err(e)
            }
        }
    }

    fn store_record_parts_sync(conn: &Connection, record: &ArtifactRecord) -> Result<StoredRecord> {
        let artifact_inserted = Self::upsert_artifact_sync(conn, &ArtifactRow::from(record))?;

        let inscription = match &record.inscription {
            Some(data) => match data.id {
                Some(inscription_id) => Some(Self::upsert_inscription_sync(
                    conn,
                    record.id,
                    inscription_id,
                    data,
                )?),
                None => None,
            },
            None => None,
        };

        Ok(StoredRecord {
            artifact_inserted,
            inscription,
        })
    }

    /// Get an inscription by ID
    pub async fn get_inscription(&self, inscription_id: i64) -> Result<Option<InscriptionRecord>> {
        self.db
            .execute_async(move |conn| Self::get_inscription_sync(conn, inscription_id))
            .await
    }

    /// List the inscriptions of an artifact
    pub async fn list_inscriptions_for_artifact(
        &self,
        artifact_id: i64,
    ) -> Result<Vec<InscriptionRecord>> {
        self.db
            .execute_async(move |conn| {
                let sql = format!(
                    "SELECT {} FROM inscriptions WHERE artifact_id = ?1 ORDER BY inscription_id",
                    INSCRIPTION_COLUMNS
                );
                let mut stmt = conn.prepare(&sql)?;
                let inscriptions = stmt
                    .query_map([artifact_id], parse_inscription_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(inscriptions)
            })
            .await
    }

    /// Set or clear the user's own translation of an inscription.
    ///
    /// Returns `false` if no such inscription exists.
    pub async fn set_personal_translation(
        &self,
        inscription_id: i64,
        translation: Option<String>,
    ) -> Result<bool> {
        let now = chrono::Utc::now().to_rfc3339();

        self.db
            .execute_async(move |conn| {
                let changed = conn.execute(
                    "UPDATE inscriptions SET personal_translation = ?1, updated_at = ?2 WHERE inscription_id = ?3",
                    params![translation, now, inscription_id],
                )?;
                Ok(changed > 0)
            })
            .await
    }

    /// Re-derive the transliteration and translation of every stored inscription.
    ///
    /// Returns the number of rows whose derived fields changed.
    pub async fn recompute_derived_fields(&self) -> Result<usize> {
        self.db
            .transaction_async(|tx| {
                let sql = format!("SELECT {} FROM inscriptions", INSCRIPTION_COLUMNS);
                let inscriptions = {
                    let mut stmt = tx.prepare(&sql)?;
                    stmt.query_map([], parse_inscription_row)?
                        .collect::<rusqlite::Result<Vec<_>>>()?
                };

                let mut changed = 0;
                for mut inscription in inscriptions {
                    let extraction = extract_atf(inscription.raw_atf.as_deref());
                    if extraction.cleaned_transliteration == inscription.cleaned_transliteration
                        && extraction.existing_translation == inscription.existing_translation
                    {
                        continue;
                    }

                    let raw_atf = inscription.raw_atf.take();
                    inscription.set_raw_atf(raw_atf);
                    Self::update_inscription_text_sync(tx, &inscription)?;
                    changed += 1;
                }

                debug!("Recomputed derived fields for {} inscriptions", changed);
                Ok(changed)
            })
            .await
    }

    // =========================================================================
    // Import Run Operations
    // =========================================================================

    /// Insert or replace an import run record
    pub async fn record_import_run(&self, run: &ImportRunRecord) -> Result<()> {
        let run = run.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT OR REPLACE INTO import_runs (
                        id, source_path, source_hash, record_count, imported_count,
                        skipped_count, status, started_at, finished_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                    "#,
                    params![
                        run.id,
                        run.source_path,
                        run.source_hash,
                        run.record_count,
                        run.imported_count,
                        run.skipped_count,
                        run.status.to_string(),
                        run.started_at,
                        run.finished_at,
                    ],
                )?;
                Ok(())
            })
            .await
    }

    /// List import runs, most recent first
    pub async fn list_import_runs(&self) -> Result<Vec<ImportRunRecord>> {
        self.db
            .execute_async(|conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT id, source_path, source_hash, record_count, imported_count,
                           skipped_count, status, started_at, finished_at
                    FROM import_runs
                    ORDER BY started_at DESC
                    "#,
                )?;
                let runs = stmt
                    .query_map([], parse_import_run_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(runs)
            })
            .await
    }
}
