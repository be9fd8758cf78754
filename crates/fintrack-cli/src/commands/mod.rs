//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `budgets` - Budget and income-source maps (list, set)
//! - `core` - Core commands (init, sample, clear) and shared utilities (open_workspace)
//! - `reports` - Analytics output (categorize, forecast, insights, budget, report)
//! - `status` - Dashboard
//! - `training` - Expense predictor (train, predict)
//! - `transactions` - Transaction commands (add, list)

pub mod budgets;
pub mod core;
pub mod reports;
pub mod status;
pub mod training;
pub mod transactions;

// Re-export command functions for main.rs
pub use budgets::*;
pub use core::*;
pub use reports::*;
pub use status::*;
pub use training::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
