//! Changelist generation and display
//!
//! A changelist holds the per-collection operations that would make one
//! store match another, computed only over collections the
//! [`CollectionFilter`](crate::CollectionFilter) retains.

pub mod compute;
pub mod display;
mod types;

pub use compute::{changelist_between, generate_text_diff};
pub use display::{format_changelist, ChangeSummary};
pub use types::{ChangeOp, Changelist};
