// Integration tests for lexiq
use lexiq_core::{flatten, search, DataType, Error, TrainingArtifact};
use lexiq_storage::ArtifactStore;
use serde_json::json;

#[test]
fn test_train_and_query_flat_document() {
    let document = json!([
        {"ad": "Ali", "yaş": "30"},
        {"ad": "Veli", "yaş": "25"}
    ]);

    let artifact = TrainingArtifact::build(flatten(&document)).unwrap();
    assert_eq!(artifact.record_count(), 2);
    assert_eq!(artifact.field_count(), 2);
    assert_eq!(artifact.fields["yaş"].data_type, DataType::Int);

    let result = search(&artifact, "yaş 30");
    assert_eq!(result.result_count(), 1);
    assert_eq!(result.results[0].get("yaş"), Some("30"));
    assert_eq!(result.action, "1 records found");
}

#[test]
fn test_nested_array_document_explodes_per_element() {
    let document = json!({
        "sirket": "X",
        "calisanlar": [{"isim": "A"}, {"isim": "B"}]
    });

    let records = flatten(&document);
    assert_eq!(records.len(), 2);
    for record in &records {
        assert!(record.contains_field("calisanlar_isim"));
        assert!(!record.contains_field("sirket"));
    }
}

#[test]
fn test_unmatched_query_returns_everything() {
    let document = json!([
        {"ad": "Ali", "şehir": "Ankara"},
        {"ad": "Veli", "şehir": "İzmir"}
    ]);
    let artifact = TrainingArtifact::build(flatten(&document)).unwrap();

    let result = search(&artifact, "xqzzy");
    assert_eq!(result.result_count(), 2);
    assert_eq!(result.interpretation, "SELECT *");
    // Unprojected: the full records come back.
    assert_eq!(result.results[0], artifact.records[0]);
}

#[test]
fn test_empty_document_rejected() {
    assert!(matches!(
        TrainingArtifact::build(flatten(&json!({}))),
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        TrainingArtifact::build(flatten(&json!("scalar root"))),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn test_store_resolves_session_then_durable_slot() {
    let temp_dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(temp_dir.path()).unwrap();

    assert!(matches!(store.resolve(None), Err(Error::NotTrained)));

    let document = json!([{"ad": "Ali", "yaş": "30"}]);
    let artifact = TrainingArtifact::build(flatten(&document)).unwrap();
    let session_id = store.store(None, artifact).unwrap();

    // Session-scoped resolution.
    let resolved = store.resolve(Some(&session_id)).unwrap();
    assert_eq!(resolved.record_count(), 1);

    // No session id falls back to the persisted slot.
    let resolved = store.resolve(None).unwrap();
    assert_eq!(resolved.record_count(), 1);
}

#[test]
fn test_persisted_artifact_survives_restart_with_identical_results() {
    let temp_dir = tempfile::tempdir().unwrap();

    let document = json!([
        {"ad": "Ali", "yaş": "30", "şehir": "Ankara"},
        {"ad": "Veli", "yaş": "25", "şehir": "İzmir"}
    ]);
    let artifact = TrainingArtifact::build(flatten(&document)).unwrap();
    let before = search(&artifact, "ankara isim");

    {
        let store = ArtifactStore::new(temp_dir.path()).unwrap();
        store.store(None, artifact).unwrap();
    }

    // Fresh store over the same directory, no sessions: durable slot only.
    let store = ArtifactStore::new(temp_dir.path()).unwrap();
    let check = store.check_training();
    assert!(check.is_training_available);
    assert_eq!(check.record_count, 2);

    let reloaded = store.resolve(None).unwrap();
    let after = search(&reloaded, "ankara isim");
    assert_eq!(after.interpretation, before.interpretation);
    assert_eq!(after.results, before.results);
    assert_eq!(after.result_count(), 1);
}

#[test]
fn test_retraining_overwrites_durable_slot() {
    let temp_dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(temp_dir.path()).unwrap();

    let first = TrainingArtifact::build(flatten(&json!([{"ad": "Ali"}]))).unwrap();
    store.store(Some("s1".to_string()), first).unwrap();

    let second =
        TrainingArtifact::build(flatten(&json!([{"kod": "1"}, {"kod": "2"}]))).unwrap();
    store.store(Some("s2".to_string()), second).unwrap();

    // Durable slot holds only the latest artifact.
    let resolved = store.resolve(None).unwrap();
    assert_eq!(resolved.record_count(), 2);
    assert!(resolved.fields.contains_key("kod"));
    assert!(!resolved.fields.contains_key("ad"));

    // The first session still serves its own artifact.
    let session_one = store.resolve(Some("s1")).unwrap();
    assert_eq!(session_one.record_count(), 1);
    assert_eq!(store.status(None).active_sessions, 2);
}

#[test]
fn test_scalar_codes_stable_across_persistence() {
    let temp_dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(temp_dir.path()).unwrap();

    let artifact =
        TrainingArtifact::build(flatten(&json!([{"ad": "Ali", "yaş": "30"}]))).unwrap();
    let codes_before: Vec<u64> = artifact.fields.values().map(|f| f.code).collect();

    store.store(None, artifact).unwrap();
    let reloaded = store.resolve(None).unwrap();
    let codes_after: Vec<u64> = reloaded.fields.values().map(|f| f.code).collect();

    assert_eq!(codes_before, codes_after);
    assert!(codes_after.iter().all(|&c| c < 10_000_000_000));
}
