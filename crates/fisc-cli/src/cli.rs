//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Fisc - Track household spending and keep budgets honest
#[derive(Parser)]
#[command(name = "fisc")]
#[command(about = "Household budget tracker with plan-vs-actual analytics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "fisc.db", global = true)]
    pub db: PathBuf,

    /// Username owning the records (required for most commands)
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Record and list expenses
    Expense {
        #[command(subcommand)]
        action: ExpenseAction,
    },

    /// Record and list income
    Income {
        #[command(subcommand)]
        action: IncomeAction,
    },

    /// Manage monthly budget plans
    Budget {
        #[command(subcommand)]
        action: BudgetAction,
    },

    /// Show income/expense balance for a month
    Balance {
        /// Month 1-12 (defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,

        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Budget vs actual reconciliation table for a month
    Report {
        /// Month 1-12 (defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,

        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Analytics over spending history
    Insights {
        #[command(subcommand)]
        action: InsightsAction,
    },

    /// List the category taxonomy
    Categories,

    /// Export data (expense CSV or full backup)
    Export {
        #[command(subcommand)]
        export_type: ExportType,
    },

    /// Restore a full JSON backup into the selected user's ledger
    ImportFull {
        /// JSON backup file to import
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a
        /// network. By default the server requires a session token.
        #[arg(long)]
        no_auth: bool,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Register a new user (prompts for a password)
    Register {
        /// Username (at least 3 characters)
        username: String,

        /// Optional contact email
        #[arg(long)]
        email: Option<String>,
    },

    /// List registered users
    List,
}

#[derive(Subcommand)]
pub enum ExpenseAction {
    /// Record an expense
    Add {
        /// Category from the taxonomy (e.g. "Food")
        #[arg(short, long)]
        category: String,

        /// Subcategory from the taxonomy (e.g. "Groceries")
        #[arg(short, long)]
        subcategory: String,

        /// Amount spent
        #[arg(short, long)]
        amount: f64,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Free-form description
        #[arg(long)]
        description: Option<String>,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },

    /// List expenses for a month
    List {
        /// Month 1-12 (defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,

        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Delete an expense by id
    Delete {
        /// Expense id
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum IncomeAction {
    /// Record an income entry
    Add {
        /// Income source label (e.g. "Salary")
        #[arg(short, long)]
        source: String,

        /// Amount received
        #[arg(short, long)]
        amount: f64,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Free-form description
        #[arg(long)]
        description: Option<String>,
    },

    /// List income for a month
    List {
        /// Month 1-12 (defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,

        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Delete an income entry by id
    Delete {
        /// Income entry id
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Set the planned amount for a subcategory
    Set {
        /// Category from the taxonomy
        #[arg(short, long)]
        category: String,

        /// Subcategory from the taxonomy
        #[arg(short, long)]
        subcategory: String,

        /// Planned amount (zero clears the line without deleting it)
        #[arg(short, long)]
        amount: f64,

        /// Month 1-12 (defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,

        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Show the plan for a month
    Show {
        /// Month 1-12 (defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,

        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Copy a month's plan to the following month
    Copy {
        /// Source month 1-12 (defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,

        /// Source year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },
}

#[derive(Subcommand)]
pub enum InsightsAction {
    /// Predict next month's spending per category
    Forecast,

    /// Scan spending history for unusual transactions
    Anomalies,

    /// Generate prioritized savings recommendations
    Recommend {
        /// Month 1-12 (defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,

        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },
}

#[derive(Subcommand)]
pub enum ExportType {
    /// Export expenses as CSV
    Transactions {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Start date filter (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date filter (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Export a full JSON backup of the user's ledger
    Full {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}
