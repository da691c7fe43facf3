/*!
 * Integration tests for maintaining stored inscriptions
 */

use anyhow::Result;
use cdlidb::database::{DatabaseConnection, Repository, UpsertOutcome};
use cdlidb::ArtifactRecord;
use serde_json::json;
use crate::common;

fn store(repository: &Repository, value: serde_json::Value) -> Result<Option<UpsertOutcome>> {
    let record = ArtifactRecord::from_value(&value)?;
    let stored = repository
        .connection()
        .transaction(|tx| Repository::store_record_sync(tx, &record))?;
    Ok(stored.inscription)
}

/// Test the upsert outcomes of repeated stores
#[test]
fn test_store_record_withSameInscriptionTwice_shouldInsertThenUpdate() -> Result<()> {
    common::init_test_logger();
    let repository = Repository::new_in_memory()?;
    let value = json!({"id": 1, "inscription": {"id": 2, "atf": "1. a"}});

    assert_eq!(store(&repository, value.clone())?, Some(UpsertOutcome::Inserted));
    assert_eq!(store(&repository, value)?, Some(UpsertOutcome::Updated));

    Ok(())
}

/// Test that a record without an atf key keeps the stored raw text
#[tokio::test]
async fn test_store_record_withoutAtfKey_shouldKeepStoredText() -> Result<()> {
    common::init_test_logger();
    let repository = Repository::new_in_memory()?;
    store(&repository, json!({"id": 1, "inscription": {"id": 2, "atf": "1. sza"}}))?;
    store(&repository, json!({"id": 1, "inscription": {"id": 2}}))?;

    let inscription = repository.get_inscription(2).await?.expect("inscription should exist");
    assert_eq!(inscription.raw_atf.as_deref(), Some("1. sza"));
    assert_eq!(inscription.cleaned_transliteration.as_deref(), Some("1. ša"));

    store(&repository, json!({"id": 1, "inscription": {"id": 2, "atf": null}}))?;
    let cleared = repository.get_inscription(2).await?.expect("inscription should exist");
    assert_eq!(cleared.raw_atf, None);
    assert_eq!(cleared.cleaned_transliteration, None);

    Ok(())
}

/// Test that an inscription without an id is not stored
#[tokio::test]
async fn test_store_record_withInscriptionWithoutId_shouldOnlyStoreArtifact() -> Result<()> {
    common::init_test_logger();
    let repository = Repository::new_in_memory()?;

    let outcome = store(&repository, json!({"id": 5, "inscription": {"atf": "1. a"}}))?;

    assert_eq!(outcome, None);
    assert!(repository.get_artifact(5).await?.is_some());
    assert!(repository.list_inscriptions_for_artifact(5).await?.is_empty());

    Ok(())
}

/// Test setting and clearing a personal translation
#[tokio::test]
async fn test_set_personal_translation_withUnknownAndKnownIds_shouldReportMatch() -> Result<()> {
    common::init_test_logger();
    let repository = Repository::new_in_memory()?;
    store(&repository, json!({"id": 1, "inscription": {"id": 2, "atf": "1. a"}}))?;

    assert!(!repository.set_personal_translation(99, Some("x".to_string())).await?);
    assert!(repository.set_personal_translation(2, Some("mine".to_string())).await?);
    assert_eq!(
        repository.get_inscription(2).await?.and_then(|i| i.personal_translation),
        Some("mine".to_string())
    );

    assert!(repository.set_personal_translation(2, None).await?);
    assert_eq!(
        repository.get_inscription(2).await?.and_then(|i| i.personal_translation),
        None
    );

    Ok(())
}

/// Test that recompute only touches rows whose derived text is stale
#[tokio::test]
async fn test_recompute_derived_fields_withStaleRow_shouldRewriteIt() -> Result<()> {
    common::init_test_logger();
    let temp_dir = common::create_temp_dir()?;
    let repository = Repository::new(DatabaseConnection::new(temp_dir.path().join("store.db"))?);
    store(&repository, json!({"id": 1, "inscription": {"id": 2, "atf": "1. sza"}}))?;
    store(&repository, json!({"id": 1, "inscription": {"id": 3, "atf": "1. a"}}))?;

    repository.connection().execute(|conn| {
        conn.execute(
            "UPDATE inscriptions SET cleaned_transliteration = 'stale' WHERE inscription_id = 2",
            [],
        )?;
        Ok(())
    })?;

    assert_eq!(repository.recompute_derived_fields().await?, 1);
    assert_eq!(repository.recompute_derived_fields().await?, 0);

    let inscription = repository.get_inscription(2).await?.expect("inscription should exist");
    assert_eq!(inscription.cleaned_transliteration.as_deref(), Some("1. ša"));

    Ok(())
}
