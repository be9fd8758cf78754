//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_workspace` - Shared utility to resolve the data dir, config and store
//! - `cmd_init` - Write default data files
//! - `cmd_sample` - Generate sample transactions
//! - `cmd_clear` - Delete a user's data files

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use fintrack_core::{config, generate_sample_data, Config, Snapshot, SnapshotStore};

/// Store and configuration for one invocation
pub struct Workspace {
    pub store: SnapshotStore,
    pub config: Config,
}

impl Workspace {
    /// Load the user's snapshot
    pub fn load(&self) -> Result<Snapshot> {
        self.store.load().with_context(|| {
            format!(
                "Failed to load data for user '{}' from {}",
                self.store.user_id(),
                self.store.data_dir().display()
            )
        })
    }

    /// Save the snapshot, refusing to overwrite concurrent changes
    pub fn save(&self, snapshot: &mut Snapshot) -> Result<()> {
        self.store
            .save(snapshot)
            .context("Failed to save data (re-run the command to retry)")
    }

    pub fn currency(&self) -> &str {
        &self.config.display.currency_symbol
    }
}

/// Resolve the data directory, load config and open the user's store
pub fn open_workspace(data_dir: Option<&Path>, user: &str) -> Result<Workspace> {
    let data_dir = config::resolve_data_dir(data_dir);
    let store = SnapshotStore::new(&data_dir, user)
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
    let config = Config::load(&data_dir).context("Failed to load config")?;
    Ok(Workspace { store, config })
}

/// Parse an optional YYYY-MM-DD argument, defaulting to today
pub fn parse_date_arg(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}' (use YYYY-MM-DD)", s)),
        None => Ok(Local::now().date_naive()),
    }
}

pub fn cmd_init(ws: &Workspace) -> Result<()> {
    println!(
        "🔧 Initializing data for '{}' in {}...",
        ws.store.user_id(),
        ws.store.data_dir().display()
    );

    let mut snapshot = ws.load()?;
    ws.save(&mut snapshot)?;

    println!("   Budget categories: {}", snapshot.budgets.len());
    println!("   Income sources:    {}", snapshot.income_sources.len());
    println!("   Transactions:      {}", snapshot.transactions.len());
    println!("✅ Data initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Add a transaction: fintrack add --amount 250 --category Transportation");
    println!("  2. Or try sample data: fintrack sample");
    println!("  3. See the overview:   fintrack dashboard");

    Ok(())
}

pub fn cmd_sample(ws: &Workspace, months: Option<u32>, seed: Option<u64>, replace: bool) -> Result<()> {
    let months = months.unwrap_or(ws.config.sample.months);
    let seed = seed.unwrap_or_else(|| Local::now().timestamp().unsigned_abs());
    let today = Local::now().date_naive();

    let generated =
        generate_sample_data(today, months, seed).context("Failed to generate sample data")?;
    let count = generated.len();

    let mut snapshot = ws.load()?;
    if replace {
        snapshot.replace_transactions(generated)?;
    } else {
        for tx in generated {
            snapshot.add_transaction(tx)?;
        }
    }
    ws.save(&mut snapshot)?;

    println!(
        "🎲 Generated {} sample transactions over {} months (seed {})",
        count, months, seed
    );
    println!("   Total transactions: {}", snapshot.transactions.len());

    Ok(())
}

pub fn cmd_clear(ws: &Workspace, yes: bool) -> Result<()> {
    if !yes {
        println!(
            "⚠️  This deletes all transactions, budgets and income sources for '{}'.",
            ws.store.user_id()
        );
        println!("   Re-run with --yes to confirm.");
        return Ok(());
    }

    let removed = ws.store.clear().context("Failed to clear data files")?;
    println!("🗑️  Removed {} data file(s) for '{}'", removed, ws.store.user_id());

    Ok(())
}
