//! Export and import engine
//!
//! Both operations compute a changelist over filter-retained collections
//! and apply it to the target store. Excluded collections are invisible:
//! export never writes them, import never touches them, and stale copies
//! of them in either store are left as they are.

mod export;
mod import;

pub use export::export;
pub use import::import;

use thiserror::Error;

use crate::changelist::{ChangeOp, Changelist};
use crate::storage::{ConfigStorage, StorageError};

/// Errors during export or import
#[derive(Error, Debug)]
pub enum OpsError {
    /// Storage backend failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Entry vanished between changelist computation and application
    #[error("Entry '{name}' in collection '{collection}' disappeared during sync")]
    MissingEntry { collection: String, name: String },
}

/// Counts of applied operations
#[derive(Debug, Default, Clone, Copy)]
pub struct OpReport {
    /// Entries created in the target
    pub creates: usize,
    /// Entries updated in the target
    pub updates: usize,
    /// Entries deleted from the target
    pub deletes: usize,
}

impl OpReport {
    /// Total number of applied operations
    #[must_use]
    pub fn total(&self) -> usize {
        self.creates + self.updates + self.deletes
    }
}

/// Apply a changelist, copying entry data from source to target
fn apply_changelist(
    changelist: &Changelist,
    source: &dyn ConfigStorage,
    target: &dyn ConfigStorage,
) -> Result<OpReport, OpsError> {
    let mut report = OpReport::default();

    for op in &changelist.changes {
        match op {
            ChangeOp::Create { collection, name } => {
                copy_entry(source, target, collection, name)?;
                report.creates += 1;
            }
            ChangeOp::Update {
                collection, name, ..
            } => {
                copy_entry(source, target, collection, name)?;
                report.updates += 1;
            }
            ChangeOp::Delete { collection, name } => {
                target.delete(collection, name)?;
                report.deletes += 1;
            }
        }
    }

    Ok(report)
}

fn copy_entry(
    source: &dyn ConfigStorage,
    target: &dyn ConfigStorage,
    collection: &str,
    name: &str,
) -> Result<(), OpsError> {
    let data = source
        .read(collection, name)?
        .ok_or_else(|| OpsError::MissingEntry {
            collection: collection.to_string(),
            name: name.to_string(),
        })?;
    target.write(collection, name, &data)?;
    Ok(())
}
