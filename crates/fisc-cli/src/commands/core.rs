//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_categories` - Print the category taxonomy

use std::path::Path;

use anyhow::{Context, Result};
use fisc_core::db::Database;
use fisc_core::TAXONOMY;

/// Open (or create) the ledger database
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    open_db(db_path)?;

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Register a user:   fisc user register <name>");
    println!("  2. Record an expense: fisc --user <name> expense add -c Food -s Groceries -a 42.50");
    println!("  3. Start the web UI:  fisc serve");

    Ok(())
}

pub fn cmd_categories() -> Result<()> {
    println!();
    println!("📂 Expense Categories");
    println!("   ─────────────────────────────────────────────────────────────");

    for category in TAXONOMY.categories() {
        let info = TAXONOMY
            .category_info(category)
            .expect("listed category has info");
        println!("   {} {}", info.icon, category);
        for subcategory in &info.subcategories {
            println!("      - {}", subcategory);
        }
    }

    println!();
    println!("💵 Income Sources");
    println!("   ─────────────────────────────────────────────────────────────");
    for source in TAXONOMY.income_sources() {
        println!("   - {}", source);
    }

    Ok(())
}
