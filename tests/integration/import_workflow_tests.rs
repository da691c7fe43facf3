/*!
 * Integration tests for importing CDLI exports into a database file
 */

use anyhow::Result;
use cdlidb::database::{DatabaseConnection, ImportStatus, Repository};
use cdlidb::Importer;
use crate::common;

fn open_repository(dir: &std::path::Path) -> Result<Repository> {
    Ok(Repository::new(DatabaseConnection::new(dir.join("cdlidb.db"))?))
}

/// Test a full import of an export file
#[test]
fn test_import_withExportFile_shouldStoreArtifactsAndDerivedText() -> Result<()> {
    common::init_test_logger();
    let temp_dir = common::create_temp_dir()?;
    let export = common::create_test_export(temp_dir.path(), "export.json")?;
    let repository = open_repository(temp_dir.path())?;

    let summary = tokio_test::block_on(async {
        Importer::new(repository.clone())
            .with_progress(false)
            .import_paths(&[export])
            .await
    })?;

    assert_eq!(summary.files, 1);
    assert_eq!(summary.records, 2);
    assert_eq!(summary.imported, 2);
    assert_eq!(summary.skipped, 0);

    let inscription = tokio_test::block_on(repository.get_inscription(5001))?
        .expect("inscription should be stored");
    assert_eq!(inscription.artifact_id, 100001);
    assert_eq!(
        inscription.existing_translation.as_deref(),
        Some("1. in his name\n2. the house of Enlil")
    );
    assert!(inscription
        .cleaned_transliteration
        .as_deref()
        .is_some_and(|text| text.contains("1. mu-ša-ra")));

    let artifact = tokio_test::block_on(repository.get_artifact(100001))?
        .expect("artifact should be stored");
    assert_eq!(artifact.museum_no.as_deref(), Some("BM 12345"));
    assert_eq!(artifact.height.as_deref(), Some("45"));

    let stats = repository.connection().stats()?;
    assert_eq!(stats.artifact_count, 2);
    assert_eq!(stats.inscription_count, 1);
    assert_eq!(stats.translated_count, 1);
    assert_eq!(stats.import_run_count, 1);

    Ok(())
}

/// Test that a directory of JSON-lines exports is imported file by file
#[tokio::test]
async fn test_import_withDirectoryOfJsonLines_shouldRecordOneRunPerFile() -> Result<()> {
    common::init_test_logger();
    let temp_dir = common::create_temp_dir()?;
    let dump_dir = temp_dir.path().join("dumps");
    std::fs::create_dir(&dump_dir)?;
    common::create_test_file(
        &dump_dir,
        "part1.json",
        "{\"id\": 1, \"inscription\": {\"id\": 11, \"atf\": \"1. a\"}}\n{\"id\": 2}\n",
    )?;
    common::create_test_file(&dump_dir, "part2.json", "{\"id\": 3}\nbroken line\n")?;
    let repository = open_repository(temp_dir.path())?;

    let summary = Importer::new(repository.clone())
        .with_progress(false)
        .import_paths(&[dump_dir])
        .await?;

    assert_eq!(summary.files, 2);
    assert_eq!(summary.records, 3);
    assert_eq!(summary.imported, 3);

    let runs = repository.list_import_runs().await?;
    assert_eq!(runs.len(), 2);
    assert!(runs.iter().all(|run| run.status == ImportStatus::Completed));
    assert!(runs.iter().all(|run| run.finished_at.is_some()));

    Ok(())
}

/// Test that re-importing keeps personal translations and refreshes derived text
#[tokio::test]
async fn test_reimport_withChangedAtf_shouldKeepPersonalTranslation() -> Result<()> {
    common::init_test_logger();
    let temp_dir = common::create_temp_dir()?;
    let repository = open_repository(temp_dir.path())?;
    let importer = Importer::new(repository.clone()).with_progress(false);

    let first = common::create_test_file(
        temp_dir.path(),
        "first.json",
        r#"{"id": 9, "inscription": {"id": 90, "atf": "1. a\n#tr.en: old"}}"#,
    )?;
    importer.import_paths(&[first]).await?;
    assert!(repository
        .set_personal_translation(90, Some("my reading".to_string()))
        .await?);

    let second = common::create_test_file(
        temp_dir.path(),
        "second.json",
        r#"{"id": 9, "inscription": {"id": 90, "atf": "1. sza\n#tr.en: new"}}"#,
    )?;
    importer.import_paths(&[second]).await?;

    let inscription = repository.get_inscription(90).await?.expect("inscription should exist");
    assert_eq!(inscription.cleaned_transliteration.as_deref(), Some("1. ša"));
    assert_eq!(inscription.existing_translation.as_deref(), Some("1. new"));
    assert_eq!(inscription.personal_translation.as_deref(), Some("my reading"));

    Ok(())
}

/// Test that a reset import starts from an empty database
#[tokio::test]
async fn test_import_withReset_shouldDropPreviousData() -> Result<()> {
    common::init_test_logger();
    let temp_dir = common::create_temp_dir()?;
    let repository = open_repository(temp_dir.path())?;

    let old = common::create_test_file(temp_dir.path(), "old.json", r#"{"id": 1}"#)?;
    Importer::new(repository.clone())
        .with_progress(false)
        .import_paths(&[old])
        .await?;

    let export = common::create_test_export(temp_dir.path(), "export.json")?;
    Importer::new(repository.clone())
        .with_reset(true)
        .with_progress(false)
        .import_paths(&[export])
        .await?;

    assert!(repository.get_artifact(1).await?.is_none());
    assert!(repository.get_artifact(100001).await?.is_some());
    assert_eq!(repository.list_import_runs().await?.len(), 1);

    Ok(())
}
