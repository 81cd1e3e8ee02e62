//! Entry CLI commands
//!
//! Handles: confsync entry set/get/del/list

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use confsync_core::storage::ActiveStore;
use confsync_core::{ConfigStorage, Database};

/// Entry commands
#[derive(Subcommand)]
pub enum EntryCommands {
    /// Set an entry's data from a JSON document
    Set {
        /// Entry name
        name: String,
        /// Entry data as JSON
        data: String,
        /// Collection (default collection if omitted)
        #[arg(short, long, default_value = "")]
        collection: String,
    },
    /// Print an entry's data
    Get {
        /// Entry name
        name: String,
        /// Collection (default collection if omitted)
        #[arg(short, long, default_value = "")]
        collection: String,
    },
    /// Delete an entry
    Del {
        /// Entry name
        name: String,
        /// Collection (default collection if omitted)
        #[arg(short, long, default_value = "")]
        collection: String,
    },
    /// List entry names in a collection
    List {
        /// Collection (default collection if omitted)
        #[arg(short, long, default_value = "")]
        collection: String,
    },
}

/// Execute an entry command against the active store
pub fn execute(action: EntryCommands, db: &Database) -> Result<()> {
    let store = ActiveStore::new(db.connection());

    match action {
        EntryCommands::Set {
            name,
            data,
            collection,
        } => {
            let value: serde_json::Value =
                serde_json::from_str(&data).context("Entry data is not valid JSON")?;
            let existed = store.exists(&collection, &name)?;
            store.write(&collection, &name, &value)?;
            if existed {
                println!("Updated {}", label(&collection, &name));
            } else {
                println!("Set {}", label(&collection, &name));
            }
        }
        EntryCommands::Get { name, collection } => {
            let Some(value) = store.read(&collection, &name)? else {
                bail!("Entry not found: {}", label(&collection, &name));
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        EntryCommands::Del { name, collection } => {
            if store.delete(&collection, &name)? {
                println!("Deleted {}", label(&collection, &name));
            } else {
                bail!("Entry not found: {}", label(&collection, &name));
            }
        }
        EntryCommands::List { collection } => {
            let names = store.list(&collection)?;
            if names.is_empty() {
                println!("No entries found.");
            } else {
                for name in names {
                    println!("{name}");
                }
            }
        }
    }

    Ok(())
}

fn label(collection: &str, name: &str) -> String {
    if collection.is_empty() {
        name.to_string()
    } else {
        format!("{collection}/{name}")
    }
}
