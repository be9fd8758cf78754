//! Analytics Pipeline
//!
//! Pure functions over a transaction snapshot. Nothing here touches disk;
//! callers load a [`Snapshot`](crate::store::Snapshot), wrap it in an
//! [`AnalysisContext`] and pass that context to each operation.
//!
//! ## Components
//!
//! - **Categorizer** - month × category expense table
//! - **Forecaster** - recency-weighted flat-line projection of that table
//! - **Savings** - monthly savings, savings rate and insight lines
//! - **Budget** - budget-vs-actual comparison and dashboard totals
//! - **Report** - composes all of the above into one text document
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fintrack_core::analytics::{AnalysisContext, generate_report};
//!
//! let snapshot = store.load()?;
//! let ctx = AnalysisContext::from_snapshot(&snapshot, &config);
//! println!("{}", generate_report(&ctx));
//! ```

pub mod budget;
pub mod categorizer;
pub mod forecaster;
pub mod report;
pub mod savings;
pub mod table;

pub use budget::{compare_budgets, summary_stats, BudgetLine, BudgetStatus, SummaryStats};
pub use categorizer::{categorize_expenses, category_totals};
pub use forecaster::{forecast_budget, weighted_average};
pub use report::{exceeded_count, generate_report};
pub use savings::{
    analyze_savings, reduction_tip, CategoryTotal, MonthlySavings, SavingsAnalysis, SavingsReport,
    SavingsTier, INSUFFICIENT_DATA_MESSAGE,
};
pub use table::MonthlyTable;

use crate::config::Config;
use crate::models::{BudgetMap, IncomeSourceMap, Transaction};
use crate::store::Snapshot;

/// Everything an analytics operation reads
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a> {
    pub transactions: &'a [Transaction],
    pub budgets: &'a BudgetMap,
    /// Reference amounts only; no operation derives figures from them
    pub income_sources: &'a IncomeSourceMap,
    pub config: &'a Config,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        transactions: &'a [Transaction],
        budgets: &'a BudgetMap,
        income_sources: &'a IncomeSourceMap,
        config: &'a Config,
    ) -> Self {
        Self {
            transactions,
            budgets,
            income_sources,
            config,
        }
    }

    /// Borrow everything from a loaded snapshot
    pub fn from_snapshot(snapshot: &'a Snapshot, config: &'a Config) -> Self {
        Self::new(
            &snapshot.transactions,
            &snapshot.budgets,
            &snapshot.income_sources,
            config,
        )
    }

    pub fn currency(&self) -> &'a str {
        &self.config.display.currency_symbol
    }
}
