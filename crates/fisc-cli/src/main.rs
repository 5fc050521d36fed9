//! Fisc CLI - Household budget tracker
//!
//! Usage:
//!   fisc init                       Initialize database
//!   fisc user register <name>       Create a user account
//!   fisc --user <name> expense add  Record an expense
//!   fisc --user <name> report       Budget vs actual for this month
//!   fisc serve --port 3000          Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::User { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                UserAction::Register { username, email } => {
                    commands::cmd_user_register(&db, &username, email.as_deref())
                }
                UserAction::List => commands::cmd_user_list(&db),
            }
        }
        Commands::Expense { action } => {
            let db = commands::open_db(&cli.db)?;
            let user = commands::resolve_user(&db, cli.user.as_deref())?;
            match action {
                ExpenseAction::Add {
                    category,
                    subcategory,
                    amount,
                    date,
                    description,
                    tags,
                } => {
                    let date = commands::resolve_date(date.as_deref())?;
                    commands::cmd_expense_add(
                        &db,
                        user.id,
                        &category,
                        &subcategory,
                        amount,
                        date,
                        description.as_deref(),
                        tags.as_deref(),
                    )
                }
                ExpenseAction::List { month, year } => {
                    let (month, year) = commands::resolve_month(month, year)?;
                    commands::cmd_expense_list(&db, user.id, month, year)
                }
                ExpenseAction::Delete { id } => commands::cmd_expense_delete(&db, user.id, id),
            }
        }
        Commands::Income { action } => {
            let db = commands::open_db(&cli.db)?;
            let user = commands::resolve_user(&db, cli.user.as_deref())?;
            match action {
                IncomeAction::Add {
                    source,
                    amount,
                    date,
                    description,
                } => {
                    let date = commands::resolve_date(date.as_deref())?;
                    commands::cmd_income_add(
                        &db,
                        user.id,
                        &source,
                        amount,
                        date,
                        description.as_deref(),
                    )
                }
                IncomeAction::List { month, year } => {
                    let (month, year) = commands::resolve_month(month, year)?;
                    commands::cmd_income_list(&db, user.id, month, year)
                }
                IncomeAction::Delete { id } => commands::cmd_income_delete(&db, user.id, id),
            }
        }
        Commands::Budget { action } => {
            let db = commands::open_db(&cli.db)?;
            let user = commands::resolve_user(&db, cli.user.as_deref())?;
            match action {
                BudgetAction::Set {
                    category,
                    subcategory,
                    amount,
                    month,
                    year,
                } => {
                    let (month, year) = commands::resolve_month(month, year)?;
                    commands::cmd_budget_set(
                        &db,
                        user.id,
                        &category,
                        &subcategory,
                        amount,
                        month,
                        year,
                    )
                }
                BudgetAction::Show { month, year } => {
                    let (month, year) = commands::resolve_month(month, year)?;
                    commands::cmd_budget_show(&db, user.id, month, year)
                }
                BudgetAction::Copy { month, year } => {
                    let (month, year) = commands::resolve_month(month, year)?;
                    commands::cmd_budget_copy(&db, user.id, month, year)
                }
            }
        }
        Commands::Balance { month, year } => {
            let db = commands::open_db(&cli.db)?;
            let user = commands::resolve_user(&db, cli.user.as_deref())?;
            let (month, year) = commands::resolve_month(month, year)?;
            commands::cmd_balance(&db, user.id, month, year)
        }
        Commands::Report { month, year } => {
            let db = commands::open_db(&cli.db)?;
            let user = commands::resolve_user(&db, cli.user.as_deref())?;
            let (month, year) = commands::resolve_month(month, year)?;
            commands::cmd_report_budget(&db, user.id, month, year)
        }
        Commands::Insights { action } => {
            let db = commands::open_db(&cli.db)?;
            let user = commands::resolve_user(&db, cli.user.as_deref())?;
            match action {
                InsightsAction::Forecast => commands::cmd_insights_forecast(&db, user.id),
                InsightsAction::Anomalies => commands::cmd_insights_anomalies(&db, user.id),
                InsightsAction::Recommend { month, year } => {
                    let (month, year) = commands::resolve_month(month, year)?;
                    commands::cmd_insights_recommend(&db, user.id, month, year)
                }
            }
        }
        Commands::Categories => commands::cmd_categories(),
        Commands::Export { export_type } => {
            let db = commands::open_db(&cli.db)?;
            let user = commands::resolve_user(&db, cli.user.as_deref())?;
            match export_type {
                ExportType::Transactions { output, from, to } => commands::cmd_export_transactions(
                    &db,
                    user.id,
                    output.as_deref(),
                    from.as_deref(),
                    to.as_deref(),
                ),
                ExportType::Full { output } => commands::cmd_export_full(&db, user.id, &output),
            }
        }
        Commands::ImportFull { file } => {
            let db = commands::open_db(&cli.db)?;
            let user = commands::resolve_user(&db, cli.user.as_deref())?;
            commands::cmd_import_full(&db, user.id, &file)
        }
        Commands::Serve {
            port,
            host,
            no_auth,
        } => commands::cmd_serve(&cli.db, &host, port, no_auth).await,
    }
}
