//! CLI command handlers
//!
//! Entry CRUD lives in its own module; the sync commands (export,
//! import, diff, collections) are handled in `main.rs`.

pub mod entry;
