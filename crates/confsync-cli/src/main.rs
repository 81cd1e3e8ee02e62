//! confsync CLI - Command-line interface for confsync
//!
//! Provides `confsync export`, `confsync import`, `confsync diff`, and
//! entry CRUD against the active configuration store.

mod commands;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use confsync_core::changelist::{changelist_between, format_changelist, ChangeSummary};
use confsync_core::storage::ActiveStore;
use confsync_core::{
    export, import, Changelist, CollectionFilter, ConfigStorage, Database, SyncStore,
    DEFAULT_COLLECTION,
};

use commands::entry::EntryCommands;

#[derive(Parser)]
#[command(name = "confsync")]
#[command(about = "confsync - configuration collection sync")]
#[command(version)]
struct Cli {
    /// Path to the active configuration database (defaults to ~/.confsync/active.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Collection exclusion pattern (repeatable; replaces the built-in language.*)
    #[arg(long = "exclude", global = true, value_name = "GLOB")]
    exclude: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the active configuration to a sync directory
    Export {
        /// Sync directory
        #[arg(short, long, default_value = "config-sync")]
        sync_dir: PathBuf,
        /// Preview changes without writing
        #[arg(long)]
        dry_run: bool,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Import a sync directory into the active configuration
    Import {
        /// Sync directory
        #[arg(short, long, default_value = "config-sync")]
        sync_dir: PathBuf,
        /// Preview changes without applying
        #[arg(long)]
        dry_run: bool,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show what an import would change
    Diff {
        /// Sync directory
        #[arg(short, long, default_value = "config-sync")]
        sync_dir: PathBuf,
        /// Restrict output to one collection
        #[arg(short, long)]
        collection: Option<String>,
    },
    /// List configuration collections
    Collections {
        /// Include excluded collections, marked as such
        #[arg(long)]
        all: bool,
    },
    /// Manage configuration entries
    Entry {
        #[command(subcommand)]
        action: EntryCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let filter = build_filter(&cli.exclude)?;
    let db = open_db(cli.db.as_ref())?;

    match cli.command {
        Commands::Export {
            sync_dir,
            dry_run,
            yes,
        } => run_export(&db, &sync_dir, &filter, dry_run, yes),
        Commands::Import {
            sync_dir,
            dry_run,
            yes,
        } => run_import(&db, &sync_dir, &filter, dry_run, yes),
        Commands::Diff {
            sync_dir,
            collection,
        } => run_diff(&db, &sync_dir, &filter, collection.as_deref()),
        Commands::Collections { all } => run_collections(&db, &filter, all),
        Commands::Entry { action } => commands::entry::execute(action, &db),
    }
}

fn build_filter(exclude: &[String]) -> Result<CollectionFilter> {
    if exclude.is_empty() {
        Ok(CollectionFilter::default())
    } else {
        CollectionFilter::new(exclude).context("Invalid --exclude pattern")
    }
}

fn get_data_dir() -> Result<PathBuf> {
    // Try HOME first (Unix), then USERPROFILE (Windows)
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(PathBuf::from)
        .context("HOME or USERPROFILE environment variable not set")?;
    Ok(home.join(".confsync"))
}

fn open_db(path: Option<&PathBuf>) -> Result<Database> {
    let db_path = match path {
        Some(p) => p.clone(),
        None => {
            let data_dir = get_data_dir()?;
            std::fs::create_dir_all(&data_dir)
                .with_context(|| format!("Failed to create {}", data_dir.display()))?;
            data_dir.join("active.db")
        }
    };
    Ok(Database::open(&db_path)?)
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn run_export(
    db: &Database,
    sync_dir: &Path,
    filter: &CollectionFilter,
    dry_run: bool,
    yes: bool,
) -> Result<()> {
    let active = ActiveStore::new(db.connection());
    let sync = SyncStore::new(sync_dir);

    let changelist = changelist_between(&active, &sync, filter, true)?;
    if changelist.is_empty() {
        println!("No changes to export.");
        return Ok(());
    }

    println!("{}", format_changelist(&changelist));
    let summary = ChangeSummary::from_changelist(&changelist);
    println!("Summary: {}", summary.one_line());

    if dry_run {
        println!("\nDry run - no changes made.");
        return Ok(());
    }

    if !yes && !confirm(&format!("\nExport to {}?", sync_dir.display()))? {
        println!("Cancelled.");
        return Ok(());
    }

    let report = export(&active, &sync, filter)?;
    println!("\nExported {} change(s) to {}.", report.total(), sync_dir.display());
    Ok(())
}

fn run_import(
    db: &Database,
    sync_dir: &Path,
    filter: &CollectionFilter,
    dry_run: bool,
    yes: bool,
) -> Result<()> {
    if !sync_dir.is_dir() {
        bail!("Sync directory does not exist: {}", sync_dir.display());
    }

    let active = ActiveStore::new(db.connection());
    let sync = SyncStore::new(sync_dir);

    let changelist = changelist_between(&sync, &active, filter, true)?;
    if changelist.is_empty() {
        println!("No changes to import.");
        return Ok(());
    }

    println!("{}", format_changelist(&changelist));
    let summary = ChangeSummary::from_changelist(&changelist);
    println!("Summary: {}", summary.one_line());

    if dry_run {
        println!("\nDry run - no changes made.");
        return Ok(());
    }

    if !yes && !confirm("\nApply these changes to the active configuration?")? {
        println!("Cancelled.");
        return Ok(());
    }

    let report = import(&sync, &active, filter)?;
    println!("\nImported {} change(s).", report.total());
    Ok(())
}

fn run_diff(
    db: &Database,
    sync_dir: &Path,
    filter: &CollectionFilter,
    collection: Option<&str>,
) -> Result<()> {
    let active = ActiveStore::new(db.connection());
    let sync = SyncStore::new(sync_dir);

    let mut changelist = changelist_between(&sync, &active, filter, true)?;

    if let Some(collection) = collection {
        if !changelist.collections.iter().any(|c| c == collection) {
            bail!("Collection not in comparison: '{collection}'");
        }
        let changes = changelist
            .for_collection(collection)
            .into_iter()
            .cloned()
            .collect();
        changelist = Changelist {
            collections: vec![collection.to_string()],
            changes,
        };
    }

    if changelist.is_empty() {
        println!("No differences.");
        return Ok(());
    }

    println!("{}", format_changelist(&changelist));
    let summary = ChangeSummary::from_changelist(&changelist);
    println!("Summary: {}", summary.one_line());
    Ok(())
}

fn run_collections(db: &Database, filter: &CollectionFilter, all: bool) -> Result<()> {
    let active = ActiveStore::new(db.connection());
    let known = active.collections()?;
    let retained = filter.filter(&known, true);

    println!("Collections:");
    for name in &retained {
        println!("  {}", display_name(name));
    }

    if all {
        println!("\nExclusion patterns: {}", filter.patterns().join(", "));
        let excluded: Vec<_> = known.iter().filter(|n| filter.is_excluded(n)).collect();
        if !excluded.is_empty() {
            println!("\nExcluded:");
            for name in excluded {
                println!("  {}", display_name(name));
            }
        }
    }

    Ok(())
}

fn display_name(collection: &str) -> &str {
    if collection == DEFAULT_COLLECTION {
        "<default>"
    } else {
        collection
    }
}
