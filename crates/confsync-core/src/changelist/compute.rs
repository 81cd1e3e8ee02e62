//! Changelist computation between two stores

use similar::{ChangeTag, TextDiff};

use super::types::{ChangeOp, Changelist};
use crate::collection::CollectionFilter;
use crate::storage::{ConfigStorage, StorageError};

/// Compute the operations that would make `target` match `source`
///
/// The union of both stores' collection names is passed through the
/// filter once; excluded collections are compared nowhere and their
/// entries never appear in the result. `include_default` injects the
/// default collection into the comparison even when neither store
/// reports it.
///
/// # Errors
/// Returns an error if either store fails to enumerate or read entries
pub fn changelist_between(
    source: &dyn ConfigStorage,
    target: &dyn ConfigStorage,
    filter: &CollectionFilter,
    include_default: bool,
) -> Result<Changelist, StorageError> {
    let mut all = source.collections()?;
    for name in target.collections()? {
        if !all.contains(&name) {
            all.push(name);
        }
    }
    all.sort();

    let collections = filter.filter(&all, include_default);
    let mut changelist = Changelist::new(collections.clone());

    for collection in &collections {
        diff_collection(source, target, collection, &mut changelist.changes)?;
    }

    Ok(changelist)
}

fn diff_collection(
    source: &dyn ConfigStorage,
    target: &dyn ConfigStorage,
    collection: &str,
    changes: &mut Vec<ChangeOp>,
) -> Result<(), StorageError> {
    let source_names = source.list(collection)?;
    let target_names = target.list(collection)?;

    for name in &source_names {
        if target_names.contains(name) {
            continue;
        }
        changes.push(ChangeOp::Create {
            collection: collection.to_string(),
            name: name.clone(),
        });
    }

    for name in &source_names {
        if !target_names.contains(name) {
            continue;
        }
        let source_data = source.read(collection, name)?;
        let target_data = target.read(collection, name)?;
        if source_data == target_data {
            continue;
        }

        let old = pretty(target_data.as_ref());
        let new = pretty(source_data.as_ref());
        changes.push(ChangeOp::Update {
            collection: collection.to_string(),
            name: name.clone(),
            diff: generate_text_diff(&old, &new),
        });
    }

    for name in &target_names {
        if source_names.contains(name) {
            continue;
        }
        changes.push(ChangeOp::Delete {
            collection: collection.to_string(),
            name: name.clone(),
        });
    }

    Ok(())
}

fn pretty(data: Option<&serde_json::Value>) -> String {
    data.and_then(|v| serde_json::to_string_pretty(v).ok())
        .unwrap_or_default()
}

/// Generate a unified diff between two strings
#[must_use]
pub fn generate_text_diff(old: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(old, new);
    let mut output = String::new();

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        output.push_str(sign);
        output.push_str(change.value());
        if !change.value().ends_with('\n') {
            output.push('\n');
        }
    }

    output
}
