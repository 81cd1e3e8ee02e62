//! confsync core - Collection filtering, storage, and changelists
//!
//! This crate provides the collection exclusion filter, the active
//! (SQLite) and sync-directory configuration stores, changelist
//! generation, and the export/import engine.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod changelist;
pub mod collection;
pub mod ops;
pub mod storage;

pub use changelist::Changelist;
pub use collection::{CollectionFilter, DEFAULT_COLLECTION};
pub use ops::{export, import, OpReport};
pub use storage::{ActiveStore, ConfigStorage, Database, SyncStore};
