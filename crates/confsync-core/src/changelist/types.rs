//! Changelist types

use serde::{Deserialize, Serialize};

use crate::collection::DEFAULT_COLLECTION;

/// One operation needed to bring the target store in line with the source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChangeOp {
    /// Entry exists in the source but not the target
    Create { collection: String, name: String },
    /// Entry exists in both with different data
    Update {
        collection: String,
        name: String,
        diff: String,
    },
    /// Entry exists in the target but not the source
    Delete { collection: String, name: String },
}

impl ChangeOp {
    /// Collection the operation applies to
    #[must_use]
    pub fn collection(&self) -> &str {
        match self {
            Self::Create { collection, .. }
            | Self::Update { collection, .. }
            | Self::Delete { collection, .. } => collection,
        }
    }

    /// Entry name the operation applies to
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Create { name, .. } | Self::Update { name, .. } | Self::Delete { name, .. } => {
                name
            }
        }
    }

    /// Display label, `collection/name` or bare `name` for the default
    /// collection
    #[must_use]
    pub fn label(&self) -> String {
        if self.collection() == DEFAULT_COLLECTION {
            self.name().to_string()
        } else {
            format!("{}/{}", self.collection(), self.name())
        }
    }
}

/// Operations needed to make a target store match a source store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Changelist {
    /// Collections that were compared, after exclusion filtering
    pub collections: Vec<String>,
    /// Operations in collection order
    pub changes: Vec<ChangeOp>,
}

impl Changelist {
    /// Create an empty changelist over the given collections
    #[must_use]
    pub fn new(collections: Vec<String>) -> Self {
        Self {
            collections,
            changes: Vec::new(),
        }
    }

    /// Whether the stores already match
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of operations
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Operations restricted to one collection
    #[must_use]
    pub fn for_collection(&self, collection: &str) -> Vec<&ChangeOp> {
        self.changes
            .iter()
            .filter(|c| c.collection() == collection)
            .collect()
    }
}
