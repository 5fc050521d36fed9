//! CSV/JSON export and backup restore commands

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use fisc_core::db::Database;
use fisc_core::{export_backup, export_expenses_csv, restore_backup, FullBackup};

fn parse_opt_date(value: Option<&str>, flag: &str) -> Result<Option<NaiveDate>> {
    value
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .with_context(|| format!("Invalid {} date format (use YYYY-MM-DD)", flag))
        })
        .transpose()
}

pub fn cmd_export_transactions(
    db: &Database,
    user_id: i64,
    output: Option<&Path>,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<()> {
    let from = parse_opt_date(from, "--from")?;
    let to = parse_opt_date(to, "--to")?;

    let bytes = export_expenses_csv(db, user_id, from, to)?;

    match output {
        Some(path) => {
            std::fs::write(path, &bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✅ Exported expenses to {}", path.display());
        }
        None => {
            std::io::stdout().write_all(&bytes)?;
        }
    }
    Ok(())
}

pub fn cmd_export_full(db: &Database, user_id: i64, output: &Path) -> Result<()> {
    let backup = export_backup(db, user_id)?;
    let json = serde_json::to_string_pretty(&backup)?;

    std::fs::write(output, json)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!(
        "✅ Backup written to {} ({} records)",
        output.display(),
        backup.metadata.total_records
    );
    Ok(())
}

pub fn cmd_import_full(db: &Database, user_id: i64, file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let backup: FullBackup =
        serde_json::from_str(&json).context("Backup file is not valid JSON")?;

    println!(
        "📥 Restoring backup from {} (created {}, {} records)...",
        file.display(),
        backup.metadata.created_at,
        backup.metadata.total_records
    );

    let stats = restore_backup(db, user_id, &backup)?;

    println!(
        "✅ Restored {} expense(s), {} income entr(ies), {} budget entr(ies)",
        stats.expenses, stats.income, stats.budgets
    );
    if stats.skipped > 0 {
        println!("   ⚠️  Skipped {} invalid record(s)", stats.skipped);
    }
    Ok(())
}
