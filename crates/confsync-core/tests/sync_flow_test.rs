//! End-to-end sync flow tests
//!
//! Exercise export, diff, and import together against a SQLite active
//! store and a temporary sync directory.

use confsync_core::changelist::{changelist_between, ChangeSummary};
use confsync_core::storage::{ActiveStore, SyncManifest};
use confsync_core::{export, import, CollectionFilter, ConfigStorage, Database, SyncStore};
use serde_json::json;
use tempfile::TempDir;

fn seed_active(store: &ActiveStore<'_>) {
    store
        .write("", "system.site", &json!({"name": "Example", "langcode": "en"}))
        .unwrap();
    store
        .write("", "workflow.type", &json!({"states": ["draft", "published"]}))
        .unwrap();
    store
        .write("staging", "system.site", &json!({"name": "Staging"}))
        .unwrap();
    store
        .write("language.entity.fr", "system.site", &json!({"name": "Exemple"}))
        .unwrap();
}

#[test]
fn test_export_then_import_converges() {
    let db = Database::in_memory().unwrap();
    let active = ActiveStore::new(db.connection());
    let temp = TempDir::new().unwrap();
    let sync = SyncStore::new(temp.path());
    let filter = CollectionFilter::default();

    seed_active(&active);

    let report = export(&active, &sync, &filter).unwrap();
    assert_eq!(report.creates, 3);

    // Language collection never reached the disk
    assert!(!temp.path().join("language.entity.fr").exists());

    // A second export is a no-op
    let report = export(&active, &sync, &filter).unwrap();
    assert_eq!(report.total(), 0);

    // And importing right back changes nothing
    let report = import(&sync, &active, &filter).unwrap();
    assert_eq!(report.total(), 0);
}

#[test]
fn test_edit_on_disk_then_import() {
    let db = Database::in_memory().unwrap();
    let active = ActiveStore::new(db.connection());
    let temp = TempDir::new().unwrap();
    let sync = SyncStore::new(temp.path());
    let filter = CollectionFilter::default();

    seed_active(&active);
    export(&active, &sync, &filter).unwrap();

    // Simulate a hand edit in the sync directory
    sync.write("", "system.site", &json!({"name": "Renamed", "langcode": "en"}))
        .unwrap();
    sync.delete("", "workflow.type").unwrap();

    let changelist = changelist_between(&sync, &active, &filter, true).unwrap();
    let summary = ChangeSummary::from_changelist(&changelist);
    assert_eq!(summary.updates, 1);
    assert_eq!(summary.deletes, 1);
    assert_eq!(summary.creates, 0);

    import(&sync, &active, &filter).unwrap();

    assert_eq!(
        active.read("", "system.site").unwrap(),
        Some(json!({"name": "Renamed", "langcode": "en"}))
    );
    assert!(active.read("", "workflow.type").unwrap().is_none());
    // Language overrides in the active store survive the import untouched
    assert_eq!(
        active.read("language.entity.fr", "system.site").unwrap(),
        Some(json!({"name": "Exemple"}))
    );
}

#[test]
fn test_custom_exclusion_patterns() {
    let db = Database::in_memory().unwrap();
    let active = ActiveStore::new(db.connection());
    let temp = TempDir::new().unwrap();
    let sync = SyncStore::new(temp.path());
    let filter = CollectionFilter::new(&["language.*", "cache.*"]).unwrap();

    seed_active(&active);
    active.write("cache.render", "entry", &json!(1)).unwrap();

    export(&active, &sync, &filter).unwrap();

    assert!(!temp.path().join("cache.render").exists());
    assert!(temp.path().join("staging").is_dir());
}

#[test]
fn test_manifest_reflects_last_export() {
    let db = Database::in_memory().unwrap();
    let active = ActiveStore::new(db.connection());
    let temp = TempDir::new().unwrap();
    let sync = SyncStore::new(temp.path());
    let filter = CollectionFilter::default();

    seed_active(&active);
    export(&active, &sync, &filter).unwrap();

    let manifest = SyncManifest::load(temp.path()).unwrap().unwrap();
    assert_eq!(manifest.entries.len(), 3);
    assert!(manifest.entries.contains_key("system.site"));
    assert!(manifest.entries.contains_key("staging/system.site"));
    assert!(!manifest
        .entries
        .keys()
        .any(|k| k.starts_with("language.entity.fr")));

    // Re-export after a change refreshes the digest
    let before = manifest.entries.get("system.site").cloned();
    active
        .write("", "system.site", &json!({"name": "Changed"}))
        .unwrap();
    export(&active, &sync, &filter).unwrap();
    let manifest = SyncManifest::load(temp.path()).unwrap().unwrap();
    assert_ne!(manifest.entries.get("system.site").cloned(), before);
}
