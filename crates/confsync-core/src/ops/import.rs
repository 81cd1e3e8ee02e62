//! Import: sync directory to active store

use super::{apply_changelist, OpReport, OpsError};
use crate::changelist::changelist_between;
use crate::collection::CollectionFilter;
use crate::storage::{ConfigStorage, SyncStore};

/// Apply the sync directory's configuration to the active store
///
/// The inverse of export: entries present on disk are created or updated
/// in the active store, and active entries with no file in a retained
/// collection are deleted. Active entries in excluded collections are
/// never touched, whatever the sync directory holds.
///
/// # Errors
/// Returns an error if either store fails during the sync
pub fn import(
    sync: &SyncStore,
    active: &dyn ConfigStorage,
    filter: &CollectionFilter,
) -> Result<OpReport, OpsError> {
    let changelist = changelist_between(sync, active, filter, true)?;
    apply_changelist(&changelist, sync, active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{ActiveStore, Database};
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_import_applies_sync_state() {
        let db = Database::in_memory().unwrap();
        let active = ActiveStore::new(db.connection());
        let temp = TempDir::new().unwrap();
        let sync = SyncStore::new(temp.path());

        sync.write("", "system.site", &json!({"name": "B"})).unwrap();
        sync.write("staging", "workflow.type", &json!(1)).unwrap();
        active.write("", "system.site", &json!({"name": "A"})).unwrap();
        active.write("", "stale", &json!(0)).unwrap();

        let report = import(&sync, &active, &CollectionFilter::default()).unwrap();

        assert_eq!(report.creates, 1);
        assert_eq!(report.updates, 1);
        assert_eq!(report.deletes, 1);
        assert_eq!(
            active.read("", "system.site").unwrap(),
            Some(json!({"name": "B"}))
        );
        assert_eq!(active.read("staging", "workflow.type").unwrap(), Some(json!(1)));
        assert!(active.read("", "stale").unwrap().is_none());
    }

    #[test]
    fn test_import_never_touches_excluded_collections() {
        let db = Database::in_memory().unwrap();
        let active = ActiveStore::new(db.connection());
        let temp = TempDir::new().unwrap();
        let sync = SyncStore::new(temp.path());

        // Hand-placed language overrides on both sides
        active.write("language.fr", "system.site", &json!("active")).unwrap();
        sync.write("language.de", "system.site", &json!("disk")).unwrap();
        sync.write("", "system.site", &json!(1)).unwrap();

        import(&sync, &active, &CollectionFilter::default()).unwrap();

        // The active override survives, the disk one is not imported
        assert_eq!(
            active.read("language.fr", "system.site").unwrap(),
            Some(json!("active"))
        );
        assert!(active.read("language.de", "system.site").unwrap().is_none());
    }

    #[test]
    fn test_import_roundtrips_export() {
        let db = Database::in_memory().unwrap();
        let active = ActiveStore::new(db.connection());
        let temp = TempDir::new().unwrap();
        let sync = SyncStore::new(temp.path());

        active.write("", "system.site", &json!({"name": "Site"})).unwrap();
        active.write("staging", "a", &json!([1, 2, 3])).unwrap();

        crate::ops::export(&active, &sync, &CollectionFilter::default()).unwrap();
        let report = import(&sync, &active, &CollectionFilter::default()).unwrap();

        assert_eq!(report.total(), 0);
    }
}
