//! Expense categorization by month

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{Transaction, YearMonth};

use super::table::MonthlyTable;

/// Sum expense amounts per (month, category).
///
/// Income is ignored. Returns an empty table when there are no expenses.
pub fn categorize_expenses(transactions: &[Transaction]) -> MonthlyTable {
    let mut cells: BTreeMap<YearMonth, BTreeMap<String, f64>> = BTreeMap::new();

    for tx in transactions.iter().filter(|t| t.is_expense()) {
        *cells
            .entry(tx.month())
            .or_default()
            .entry(tx.category.clone())
            .or_insert(0.0) += tx.amount;
    }

    if cells.is_empty() {
        debug!("No expense transactions to categorize");
        return MonthlyTable::empty();
    }

    let table = MonthlyTable::from_cells(&cells);
    debug!(
        months = table.months().len(),
        categories = table.categories().len(),
        "Categorized expenses"
    );
    table
}

/// Total expense amount per category across all history
pub fn category_totals(transactions: &[Transaction]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for tx in transactions.iter().filter(|t| t.is_expense()) {
        *totals.entry(tx.category.clone()).or_insert(0.0) += tx.amount;
    }
    totals
}

/// Total amount per month for transactions matching `filter`
pub(crate) fn monthly_totals(
    transactions: &[Transaction],
    filter: impl Fn(&Transaction) -> bool,
) -> BTreeMap<YearMonth, f64> {
    let mut totals = BTreeMap::new();
    for tx in transactions.iter().filter(|t| filter(t)) {
        *totals.entry(tx.month()).or_insert(0.0) += tx.amount;
    }
    totals
}
