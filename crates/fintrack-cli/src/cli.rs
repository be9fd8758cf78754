//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fintrack_core::{DEFAULT_USER, MAX_MONTHS};

/// Fintrack - Track spending, forecast budgets and predict expenses
#[derive(Parser)]
#[command(name = "fintrack")]
#[command(about = "Personal finance tracker with budget forecasting", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (defaults to $FINTRACK_DATA_DIR or the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// User whose snapshot to operate on
    #[arg(short, long, default_value = DEFAULT_USER, global = true)]
    pub user: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the data directory with default budgets and income sources
    Init,

    /// Generate sample transactions
    Sample {
        /// Months of history to cover (defaults to config)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_MONTHS)))]
        months: Option<u32>,

        /// Random seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,

        /// Replace existing transactions instead of appending
        #[arg(long)]
        replace: bool,
    },

    /// Add a transaction
    Add {
        /// Amount (non-negative)
        #[arg(short, long)]
        amount: f64,

        /// Category, e.g. "Food & Dining" or "Salary"
        #[arg(short, long)]
        category: String,

        /// Description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Transaction type: income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,
    },

    /// List transactions, newest first
    Transactions {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage budget ceilings (list, set)
    Budgets {
        #[command(subcommand)]
        action: Option<AmountMapAction>,
    },

    /// Manage income sources (list, set)
    Income {
        #[command(subcommand)]
        action: Option<AmountMapAction>,
    },

    /// Show income, expenses and net savings
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show expenses by month and category
    Categorize {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Forecast spending per category for upcoming months
    Forecast {
        /// Months to forecast (defaults to config)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_MONTHS)))]
        months: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show savings insights
    Insights {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare spending against budgets
    Budget {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Train the expense predictor and show its score
    Train {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Predict an expense amount
    ///
    /// Give either --date or all of --day-of-week, --day-of-month and --month.
    Predict {
        /// Category to predict for
        #[arg(short, long)]
        category: String,

        /// Date to derive calendar features from (YYYY-MM-DD)
        #[arg(long, conflicts_with_all = ["day_of_week", "day_of_month", "month"])]
        date: Option<String>,

        /// Day of week, Monday = 0 … Sunday = 6
        #[arg(long)]
        day_of_week: Option<u32>,

        /// Day of month (1-31)
        #[arg(long)]
        day_of_month: Option<u32>,

        /// Month (1-12)
        #[arg(long)]
        month: Option<u32>,

        /// Treat the day as a weekend (derived from --day-of-week if omitted)
        #[arg(long)]
        weekend: Option<bool>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate the full text report
    Report {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete all data files for the user
    Clear {
        /// Skip confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum AmountMapAction {
    /// List entries
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set or add an entry
    Set {
        /// Category or source name
        name: String,

        /// Amount (non-negative)
        amount: f64,
    },
}
