//! Budget-vs-actual comparison and dashboard totals

use serde::Serialize;

use crate::models::{format_money, BudgetMap, Transaction};

use super::categorizer::category_totals;

/// How a category's spending relates to its budget
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BudgetStatus {
    /// Spent more than the budget
    Exceeded { by: f64 },
    /// Above the near-limit threshold but not over
    NearLimit,
    WithinBudget,
}

impl BudgetStatus {
    /// Classify spending against a budget ceiling.
    ///
    /// A zero budget counts as exceeded by any spending at all.
    pub fn classify(budget: f64, spent: f64, near_limit_percent: f64) -> Self {
        if budget <= 0.0 {
            return if spent > 0.0 {
                Self::Exceeded { by: spent - budget }
            } else {
                Self::WithinBudget
            };
        }

        let percentage = spent / budget * 100.0;
        if percentage > 100.0 {
            Self::Exceeded { by: spent - budget }
        } else if percentage > near_limit_percent {
            Self::NearLimit
        } else {
            Self::WithinBudget
        }
    }

    pub fn advice(&self, currency: &str) -> String {
        match self {
            Self::Exceeded { by } => format!(
                "You've exceeded your budget by {}",
                format_money(currency, *by)
            ),
            Self::NearLimit => "You're close to your budget limit".to_string(),
            Self::WithinBudget => "You're within your budget".to_string(),
        }
    }
}

/// One category's budget comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetLine {
    pub category: String,
    pub budget: f64,
    pub spent: f64,
    pub remaining: f64,
    /// `spent / budget × 100`, or 0 when the budget is 0
    pub percentage: f64,
    /// `percentage` capped at 100, for progress bars
    pub display_percentage: f64,
    pub status: BudgetStatus,
}

/// Compare total spending per category against every budget entry
pub fn compare_budgets(
    transactions: &[Transaction],
    budgets: &BudgetMap,
    near_limit_percent: f64,
) -> Vec<BudgetLine> {
    let totals = category_totals(transactions);

    budgets
        .iter()
        .map(|(category, budget)| {
            let spent = totals.get(category).copied().unwrap_or(0.0);
            let percentage = if *budget > 0.0 {
                spent / budget * 100.0
            } else {
                0.0
            };
            BudgetLine {
                category: category.clone(),
                budget: *budget,
                spent,
                remaining: budget - spent,
                percentage,
                display_percentage: percentage.min(100.0),
                status: BudgetStatus::classify(*budget, spent, near_limit_percent),
            }
        })
        .collect()
}

/// Headline totals for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_savings: f64,
}

pub fn summary_stats(transactions: &[Transaction]) -> SummaryStats {
    let (total_income, total_expenses) =
        transactions
            .iter()
            .fold((0.0, 0.0), |(income, expenses), tx| {
                if tx.is_income() {
                    (income + tx.amount, expenses)
                } else {
                    (income, expenses + tx.amount)
                }
            });

    SummaryStats {
        total_income,
        total_expenses,
        net_savings: total_income - total_expenses,
    }
}
