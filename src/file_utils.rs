use anyhow::{Context, Result};
use log::debug;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::LoadError;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    /// Find files with a specific extension in a directory, sorted by path
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let normalized_ext = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(normalized_ext) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Hex-encoded SHA256 of a file's contents
    pub fn sha256_file<P: AsRef<Path>>(path: P) -> Result<String> {
        let bytes = fs::read(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(format!("{:x}", hasher.finalize()))
    }
}

// @struct: Reader for CDLI JSON export files
pub struct RecordLoader;

impl RecordLoader {
    /// Expand the given paths into export files.
    ///
    /// Files are kept as given; directories contribute every `*.json` below them.
    pub fn collect_inputs<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for path in paths {
            let path = path.as_ref();
            if FileManager::dir_exists(path) {
                let found = FileManager::find_files(path, "json")?;
                debug!("Found {} JSON files in {:?}", found.len(), path);
                files.extend(found);
            } else if FileManager::file_exists(path) {
                files.push(path.to_path_buf());
            } else {
                return Err(anyhow::anyhow!("Input path does not exist: {:?}", path));
            }
        }

        Ok(files)
    }

    /// Read every record of an export file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<Value>, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let records = Self::parse_records(&content, path)?;
        debug!("Loaded {} records from {:?}", records.len(), path);
        Ok(records)
    }

    /// Parse export content: a single object, an array of objects, or one
    /// JSON document per line (invalid lines are skipped)
    pub fn parse_records(content: &str, path: &Path) -> Result<Vec<Value>, LoadError> {
        match serde_json::from_str::<Value>(content) {
            Ok(Value::Array(records)) => Ok(records),
            Ok(record @ Value::Object(_)) => Ok(vec![record]),
            Ok(_) => Err(LoadError::UnsupportedShape {
                path: path.to_path_buf(),
            }),
            Err(_) => {
                let records: Vec<Value> = content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .filter_map(|line| serde_json::from_str(line).ok())
                    .collect();

                if records.is_empty() {
                    Err(LoadError::NoRecords {
                        path: path.to_path_buf(),
                    })
                } else {
                    Ok(records)
                }
            }
        }
    }
}
