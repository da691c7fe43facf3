use anyhow::Result;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::fmt;
use std::path::Path;

use crate::database::{ImportRunRecord, Repository};
use crate::file_utils::{FileManager, RecordLoader};
use crate::records::ArtifactRecord;

// @module: Bulk import of CDLI export files

/// Counts gathered over an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Export files processed
    pub files: usize,
    /// Export files that could not be read at all
    pub failed_files: usize,
    /// Records found across all readable files
    pub records: usize,
    /// Records written to the database
    pub imported: usize,
    /// Records skipped (no id, malformed, or rejected by the database)
    pub skipped: usize,
}

impl ImportSummary {
    fn add(&mut self, other: ImportSummary) {
        self.files += other.files;
        self.failed_files += other.failed_files;
        self.records += other.records;
        self.imported += other.imported;
        self.skipped += other.skipped;
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Files: {} ({} failed), Records: {}, Imported: {}, Skipped: {}",
            self.files, self.failed_files, self.records, self.imported, self.skipped
        )
    }
}

/// Imports export files into the artifact store
pub struct Importer {
    // @field: Target repository
    repository: Repository,
    // @field: Drop existing data before importing
    reset: bool,
    // @field: Draw progress bars
    show_progress: bool,
}

impl Importer {
    // @method: Create an importer writing to the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            reset: false,
            show_progress: true,
        }
    }

    /// Drop and recreate all tables before importing
    pub fn with_reset(mut self, reset: bool) -> Self {
        self.reset = reset;
        self
    }

    /// Enable or disable progress bars
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Import every export file found under the given paths
    pub async fn import_paths<P: AsRef<Path>>(&self, paths: &[P]) -> Result<ImportSummary> {
        let start_time = std::time::Instant::now();
        let files = RecordLoader::collect_inputs(paths)?;

        if files.is_empty() {
            warn!("No JSON files to import");
            return Ok(ImportSummary::default());
        }

        if self.reset {
            self.repository.connection().reset()?;
        }

        info!("Starting import of {} file(s)", files.len());

        let multi_progress = MultiProgress::new();
        if !self.show_progress {
            multi_progress.set_draw_target(indicatif::ProgressDrawTarget::hidden());
        }

        let mut summary = ImportSummary::default();
        for file in files {
            summary.add(self.import_file(&file, &multi_progress).await?);
        }

        info!(
            "Import finished in {:.1}s. {}",
            start_time.elapsed().as_secs_f64(),
            summary
        );
        Ok(summary)
    }

    /// Import a single export file in one transaction
    async fn import_file(&self, path: &Path, multi_progress: &MultiProgress) -> Result<ImportSummary> {
        let source_path = path.to_string_lossy().to_string();
        let loaded = RecordLoader::load_file(path);

        // An unreadable file is still recorded, with an empty hash
        let source_hash = FileManager::sha256_file(path).unwrap_or_else(|e| {
            debug!("Could not hash {:?}: {}", path, e);
            String::new()
        });

        let values = match loaded {
            Ok(values) => values,
            Err(e) => {
                error!("Failed to load {:?}: {}", path, e);
                let mut run = ImportRunRecord::new(source_path, source_hash, 0);
                run.fail();
                self.repository.record_import_run(&run).await?;
                return Ok(ImportSummary {
                    files: 1,
                    failed_files: 1,
                    ..ImportSummary::default()
                });
            }
        };

        let total = values.len();
        let mut run = ImportRunRecord::new(source_path, source_hash, total as i64);
        self.repository.record_import_run(&run).await?;

        let progress_bar = multi_progress.add(ProgressBar::new(total as u64));
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} records ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar.set_message(
            path.file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default(),
        );

        let bar = progress_bar.clone();
        let (imported, skipped) = self
            .repository
            .connection()
            .transaction_async(move |tx| {
                let mut imported = 0usize;
                let mut skipped = 0usize;

                for (idx, value) in values.iter().enumerate() {
                    let position = idx + 1;
                    match ArtifactRecord::from_value(value) {
                        Ok(record) => {
                            if record.inscription.as_ref().is_some_and(|i| i.id.is_none()) {
                                warn!("Record {} (id {}): inscription has no id, not stored", position, record.id);
                            }
                            match Repository::store_record_sync(tx, &record) {
                                Ok(_) => imported += 1,
                                Err(e) => {
                                    warn!("Error processing record {} (id {}): {}", position, record.id, e);
                                    skipped += 1;
                                }
                            }
                        }
                        Err(e) if e.is_silent() => {
                            debug!("Skipping record {}: {}", position, e);
                            skipped += 1;
                        }
                        Err(e) => {
                            warn!("Skipping record {}: {}", position, e);
                            skipped += 1;
                        }
                    }
                    bar.inc(1);
                }

                Ok((imported, skipped))
            })
            .await?;

        progress_bar.finish_and_clear();

        run.finish(imported as i64, skipped as i64);
        self.repository.record_import_run(&run).await?;

        info!(
            "Imported {:?}: {}/{} records ({} skipped)",
            path, imported, total, skipped
        );

        Ok(ImportSummary {
            files: 1,
            failed_files: 0,
            records: total,
            imported,
            skipped,
        })
    }
}
