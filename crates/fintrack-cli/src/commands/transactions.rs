//! Transaction command implementations

use anyhow::{Context, Result};
use chrono::NaiveDate;
use fintrack_core::{format_money, Transaction, TransactionType};

use super::{truncate, Workspace};

pub fn cmd_add(
    ws: &Workspace,
    date: NaiveDate,
    description: &str,
    amount: f64,
    category: &str,
    kind: &str,
) -> Result<()> {
    let transaction_type: TransactionType = kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let tx = Transaction::new(date, description, amount, category, transaction_type)
        .context("Invalid transaction")?;

    let mut snapshot = ws.load()?;
    if tx.is_expense() && !snapshot.budgets.contains_key(&tx.category) {
        tracing::warn!(category = %tx.category, "Expense category has no budget");
    }

    snapshot.add_transaction(tx.clone())?;
    ws.save(&mut snapshot)?;

    println!(
        "✅ Added {} {} │ {} │ {}",
        tx.transaction_type,
        format_money(ws.currency(), tx.amount),
        tx.date,
        tx.category
    );

    Ok(())
}

pub fn cmd_transactions_list(ws: &Workspace, limit: usize, json: bool) -> Result<()> {
    let snapshot = ws.load()?;

    // Newest first; insertion order breaks ties
    let mut transactions: Vec<&Transaction> = snapshot.transactions.iter().collect();
    transactions.reverse();
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
    transactions.truncate(limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&transactions)?);
        return Ok(());
    }

    if transactions.is_empty() {
        println!("No transactions found. Add some with:");
        println!("  fintrack add --amount 250 --category Transportation");
        return Ok(());
    }

    println!();
    println!(
        "📝 Recent Transactions ({} of {})",
        transactions.len(),
        snapshot.transactions.len()
    );
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        let amount = format_money(ws.currency(), tx.amount);
        let amount_str = if tx.is_expense() {
            format!("\x1b[31m-{:>12}\x1b[0m", amount) // Red for expenses
        } else {
            format!("\x1b[32m+{:>12}\x1b[0m", amount) // Green for income
        };

        println!(
            "   {} │ {} │ {:16} │ {}",
            tx.date,
            amount_str,
            truncate(&tx.category, 16),
            truncate(&tx.description, 30)
        );
    }

    Ok(())
}
