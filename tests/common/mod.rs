/*!
 * Common test utilities for the cdlidb test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// ATF of a short tablet with a translation for each line
pub const SAMPLE_ATF: &str = "&P100001 = Example tablet\n\
#atf: lang sux\n\
@obverse\n\
1. mu-sza-ra\n\
#tr.en: in his name\n\
2. _e2_ {d}en-lil2\n\
#tr.en: the house of Enlil\n\
$ rest broken";

/// Routes log output through the test harness; safe to call from every test
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a CDLI export with two artifacts, one of them without an inscription
pub fn create_test_export(dir: &Path, filename: &str) -> Result<PathBuf> {
    let records = serde_json::json!([
        {
            "id": 100001,
            "designation": "Example tablet",
            "museum_no": "BM 12345",
            "height": 45,
            "inscription": {"id": 5001, "atf": SAMPLE_ATF}
        },
        {
            "id": 100002,
            "designation": "Uninscribed fragment",
            "inscription": null
        }
    ]);
    create_test_file(dir, filename, &serde_json::to_string_pretty(&records)?)
}
