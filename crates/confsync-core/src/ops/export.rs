//! Export: active store to sync directory

use super::{apply_changelist, OpReport, OpsError};
use crate::changelist::changelist_between;
use crate::collection::CollectionFilter;
use crate::storage::{ConfigStorage, SyncManifest, SyncStore};

/// Write the active configuration to the sync directory
///
/// Every entry in every retained collection is mirrored to disk; sync
/// files and collection directories with no active counterpart are
/// removed. A fresh manifest is written afterwards. Excluded collections
/// already present in the sync directory are left untouched.
///
/// # Errors
/// Returns an error if either store fails during the sync
pub fn export(
    active: &dyn ConfigStorage,
    sync: &SyncStore,
    filter: &CollectionFilter,
) -> Result<OpReport, OpsError> {
    let changelist = changelist_between(active, sync, filter, true)?;
    let report = apply_changelist(&changelist, active, sync)?;

    let mut manifest = SyncManifest::new();
    for collection in &changelist.collections {
        for name in active.list(collection)? {
            if let Some(data) = active.read(collection, &name)? {
                manifest.record(collection, &name, &data);
            }
        }
    }
    manifest.write(sync.root())?;

    Ok(report)
}
