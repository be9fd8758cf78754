//! Report command implementations (categorize, forecast, insights, budget, report)

use std::path::Path;

use anyhow::{Context, Result};
use fintrack_core::{format_money, BudgetStatus, FinanceAgent, MonthlyTable};

use super::{truncate, Workspace};

fn print_table(title: &str, table: &MonthlyTable, empty_hint: &str) {
    println!();
    println!("{}", title);
    println!("   ─────────────────────────────────────────────────────────────");

    if table.is_empty() {
        println!("   {}", empty_hint);
        return;
    }

    for line in table.to_text().lines() {
        println!("   {}", line);
    }
}

pub fn cmd_categorize(ws: &Workspace, json: bool) -> Result<()> {
    let snapshot = ws.load()?;
    let agent = FinanceAgent::from_snapshot(&snapshot, &ws.config);
    let table = agent.categorize_expenses();

    if json {
        println!("{}", serde_json::to_string_pretty(&table.to_nested())?);
        return Ok(());
    }

    print_table(
        "📊 Expenses by Month",
        &table,
        "No expenses recorded yet.",
    );
    Ok(())
}

pub fn cmd_forecast(ws: &Workspace, months: Option<u32>, json: bool) -> Result<()> {
    let snapshot = ws.load()?;
    let agent = FinanceAgent::from_snapshot(&snapshot, &ws.config);
    let forecast = agent.forecast_budget(months);

    if json {
        println!("{}", serde_json::to_string_pretty(&forecast.to_nested())?);
        return Ok(());
    }

    let horizon = months.unwrap_or(ws.config.forecast.months);
    print_table(
        &format!("🔮 Budget Forecast (Next {} Months)", horizon),
        &forecast,
        "Not enough expense history to forecast.",
    );
    Ok(())
}

pub fn cmd_insights(ws: &Workspace, json: bool) -> Result<()> {
    let snapshot = ws.load()?;
    let agent = FinanceAgent::from_snapshot(&snapshot, &ws.config);
    let analysis = agent.analyze_savings();

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!();
    println!("💡 Savings Insights");
    println!("   ─────────────────────────────────────────────────────────────");
    for line in analysis.insights(ws.currency()) {
        println!("   {}", line);
    }

    if let Some(report) = analysis.report() {
        println!();
        println!(
            "   {:8} │ {:>14} │ {:>14} │ {:>14}",
            "Month", "Income", "Expenses", "Savings"
        );
        println!("   ─────────┼────────────────┼────────────────┼───────────────");
        for m in &report.monthly {
            println!(
                "   {:8} │ {:>14} │ {:>14} │ {:>14}",
                m.month.to_string(),
                format_money(ws.currency(), m.income),
                format_money(ws.currency(), m.expenses),
                format_money(ws.currency(), m.savings)
            );
        }
    }

    Ok(())
}

pub fn cmd_budget_status(ws: &Workspace, json: bool) -> Result<()> {
    let snapshot = ws.load()?;
    let agent = FinanceAgent::from_snapshot(&snapshot, &ws.config);
    let lines = agent.compare_budgets();

    if json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
        return Ok(());
    }

    let currency = ws.currency();
    println!();
    println!("💼 Budget vs Actual");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:18} │ {:>12} │ {:>12} │ {:>12} │ {:>7}",
        "Category", "Budget", "Spent", "Remaining", "Used"
    );
    println!("   ───────────────────┼──────────────┼──────────────┼──────────────┼────────");

    for line in &lines {
        let marker = match line.status {
            BudgetStatus::Exceeded { .. } => "🔴",
            BudgetStatus::NearLimit => "🟡",
            BudgetStatus::WithinBudget => "🟢",
        };
        println!(
            "   {:18} │ {:>12} │ {:>12} │ {:>12} │ {:>6.1}% {}",
            truncate(&line.category, 18),
            format_money(currency, line.budget),
            format_money(currency, line.spent),
            format_money(currency, line.remaining),
            line.percentage,
            marker
        );
    }

    let over: Vec<_> = lines
        .iter()
        .filter(|l| matches!(l.status, BudgetStatus::Exceeded { .. }))
        .collect();
    if !over.is_empty() {
        println!();
        for line in over {
            println!("   ⚠️  {}: {}", line.category, line.status.advice(currency));
        }
    }

    Ok(())
}

pub fn cmd_report(ws: &Workspace, output: Option<&Path>) -> Result<()> {
    let snapshot = ws.load()?;
    let agent = FinanceAgent::from_snapshot(&snapshot, &ws.config);
    let report = agent.generate_report();

    match output {
        Some(path) => {
            std::fs::write(path, &report)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("📄 Report written to {}", path.display());
        }
        None => print!("{}", report),
    }

    Ok(())
}
