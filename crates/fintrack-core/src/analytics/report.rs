//! Plain-text financial report

use std::fmt::Write;

use crate::models::format_money;

use super::budget::{compare_budgets, BudgetStatus};
use super::categorizer::categorize_expenses;
use super::forecaster::forecast_budget;
use super::savings::analyze_savings;
use super::AnalysisContext;

const TITLE: &str = "FINANCIAL MANAGEMENT REPORT";
const RULE_WIDTH: usize = 50;

/// Compose the categorization table, forecast, savings insights and budget
/// recommendations into one document.
///
/// Sections without data are left out, except savings insights which fall
/// back to the insufficient-data message.
pub fn generate_report(ctx: &AnalysisContext<'_>) -> String {
    let currency = ctx.currency();
    let mut report = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(report, "{}", TITLE);
    let _ = writeln!(report, "{}\n", "=".repeat(RULE_WIDTH));

    let summary = categorize_expenses(ctx.transactions);
    if !summary.is_empty() {
        let _ = writeln!(
            report,
            "EXPENSE CATEGORIZATION (Last {} Months):",
            summary.months().len()
        );
        let _ = writeln!(report, "{}", summary.to_text());
    }

    let horizon = ctx.config.forecast.months;
    let forecast = forecast_budget(&summary, horizon);
    if !forecast.is_empty() {
        let _ = writeln!(report, "BUDGET FORECAST (Next {} Months):", horizon);
        let _ = writeln!(report, "{}", forecast.to_text());
    }

    let _ = writeln!(report, "SAVINGS INSIGHTS:");
    let _ = writeln!(report, "{}\n", analyze_savings(ctx.transactions).to_text(currency));

    if ctx.transactions.iter().any(|t| t.is_expense()) {
        let _ = writeln!(report, "BUDGET RECOMMENDATIONS:");
        let lines = compare_budgets(
            ctx.transactions,
            ctx.budgets,
            ctx.config.budget.near_limit_percent,
        );
        for line in lines.iter().filter(|l| l.spent > 0.0) {
            let _ = writeln!(
                report,
                "{}: Budget {}, Spent {} ({:.1}%)",
                line.category,
                format_money(currency, line.budget),
                format_money(currency, line.spent),
                line.percentage
            );
            let _ = writeln!(report, "  - {}", line.status.advice(currency));
        }
        report.push('\n');
    }

    report
}

/// Count of budget categories over their limit, for summaries
pub fn exceeded_count(ctx: &AnalysisContext<'_>) -> usize {
    compare_budgets(
        ctx.transactions,
        ctx.budgets,
        ctx.config.budget.near_limit_percent,
    )
    .iter()
    .filter(|l| matches!(l.status, BudgetStatus::Exceeded { .. }))
    .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{
        default_budgets, default_income_sources, BudgetMap, Transaction, TransactionType,
    };
    use chrono::NaiveDate;

    fn tx(date: &str, description: &str, amount: f64, category: &str, kind: TransactionType) -> Transaction {
        Transaction::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            description,
            amount,
            category,
            kind,
        )
        .unwrap()
    }

    fn report_for(transactions: &[Transaction], budgets: &BudgetMap) -> String {
        let config = Config::default();
        let income = default_income_sources();
        let ctx = AnalysisContext::new(transactions, budgets, &income, &config);
        generate_report(&ctx)
    }

    #[test]
    fn test_empty_report() {
        let report = report_for(&[], &default_budgets());

        assert!(report.starts_with("FINANCIAL MANAGEMENT REPORT\n=================================================="));
        assert!(!report.contains("EXPENSE CATEGORIZATION"));
        assert!(!report.contains("BUDGET FORECAST"));
        assert!(!report.contains("BUDGET RECOMMENDATIONS"));
        assert!(report.contains("SAVINGS INSIGHTS:\nNot enough data for savings analysis"));
    }

    #[test]
    fn test_full_report_sections_in_order() {
        let transactions = vec![
            tx("2025-01-05", "Coffee", 150.0, "Food & Dining", TransactionType::Expense),
            tx("2025-01-10", "Salary", 50000.0, "Salary", TransactionType::Income),
        ];
        let report = report_for(&transactions, &default_budgets());

        let positions: Vec<usize> = [
            "EXPENSE CATEGORIZATION (Last 1 Months):",
            "BUDGET FORECAST (Next 3 Months):",
            "SAVINGS INSIGHTS:",
            "BUDGET RECOMMENDATIONS:",
        ]
        .iter()
        .map(|h| report.find(h).unwrap_or_else(|| panic!("missing {}", h)))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert!(report.contains("Average monthly savings: ₹49,850.00"));
        assert!(report.contains("Food & Dining: Budget ₹5,000.00, Spent ₹150.00 (3.0%)\n  - You're within your budget"));
        // Categories without spending are not listed
        assert!(!report.contains("Rent:"));
        // Forecast months follow the last observed month
        assert!(report.contains("2025-02"));
        assert!(report.contains("2025-04"));
    }

    #[test]
    fn test_budget_flags() {
        let transactions = vec![
            tx("2025-01-05", "Groceries", 6000.0, "Food & Dining", TransactionType::Expense),
            tx("2025-01-06", "Metro", 2500.0, "Transportation", TransactionType::Expense),
        ];
        let budgets: BudgetMap = [
            ("Food & Dining".to_string(), 5000.0),
            ("Transportation".to_string(), 3000.0),
        ]
        .into_iter()
        .collect();
        let report = report_for(&transactions, &budgets);

        assert!(report.contains("Food & Dining: Budget ₹5,000.00, Spent ₹6,000.00 (120.0%)"));
        assert!(report.contains("  - You've exceeded your budget by ₹1,000.00"));
        assert!(report.contains("Transportation: Budget ₹3,000.00, Spent ₹2,500.00 (83.3%)"));
        assert!(report.contains("  - You're close to your budget limit"));
    }

    #[test]
    fn test_report_is_deterministic() {
        let transactions = vec![
            tx("2025-02-01", "Rent", 10000.0, "Rent", TransactionType::Expense),
            tx("2025-01-03", "Cafe", 200.0, "Food & Dining", TransactionType::Expense),
            tx("2025-01-31", "Paycheck", 45000.0, "Salary", TransactionType::Income),
        ];
        let budgets = default_budgets();
        assert_eq!(report_for(&transactions, &budgets), report_for(&transactions, &budgets));
    }

    #[test]
    fn test_exceeded_count() {
        let transactions = vec![tx(
            "2025-01-05",
            "Groceries",
            6000.0,
            "Food & Dining",
            TransactionType::Expense,
        )];
        let config = Config::default();
        let budgets = default_budgets();
        let income = default_income_sources();
        let ctx = AnalysisContext::new(&transactions, &budgets, &income, &config);
        assert_eq!(exceeded_count(&ctx), 1);
    }
}
