//! Dashboard command implementation

use anyhow::Result;
use fintrack_core::analytics::exceeded_count;
use fintrack_core::{format_money, FinanceAgent};

use super::Workspace;

pub fn cmd_dashboard(ws: &Workspace, json: bool) -> Result<()> {
    let snapshot = ws.load()?;
    let agent = FinanceAgent::from_snapshot(&snapshot, &ws.config);
    let stats = agent.summary_stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let currency = ws.currency();
    let expense_count = snapshot.transactions.iter().filter(|t| t.is_expense()).count();
    let over_budget = exceeded_count(agent.context());

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│          💰 Fintrack Dashboard          │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  User:            {}", ws.store.user_id());
    println!(
        "  Transactions:    {} ({} expenses, {} income)",
        snapshot.transactions.len(),
        expense_count,
        snapshot.transactions.len() - expense_count
    );
    println!();
    println!("  📈 Total Income:   {}", format_money(currency, stats.total_income));
    println!("  📉 Total Expenses: {}", format_money(currency, stats.total_expenses));
    println!("  💵 Net Savings:    {}", format_money(currency, stats.net_savings));
    println!();

    if over_budget > 0 {
        println!("  ⚠️  Categories over budget: {}", over_budget);
        println!("  Run 'fintrack budget' to see details.");
    } else if snapshot.transactions.is_empty() {
        println!("  Run 'fintrack sample' or 'fintrack add' to get started.");
    }

    Ok(())
}
