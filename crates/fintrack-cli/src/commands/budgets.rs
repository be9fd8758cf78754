//! Budget and income-source command implementations (list, set)

use anyhow::{Context, Result};
use fintrack_core::{format_money, BudgetMap};

use super::Workspace;

pub fn cmd_budgets_list(ws: &Workspace, json: bool) -> Result<()> {
    let snapshot = ws.load()?;
    print_amount_map("💼 Budget Categories", &snapshot.budgets, ws.currency(), json)
}

pub fn cmd_budgets_set(ws: &Workspace, category: &str, amount: f64) -> Result<()> {
    let mut snapshot = ws.load()?;
    let previous = snapshot.budgets.get(category).copied();
    snapshot
        .update_budgets(single(category, amount))
        .context("Invalid budget")?;
    ws.save(&mut snapshot)?;

    print_update("budget", category, previous, amount, ws.currency());
    Ok(())
}

pub fn cmd_income_list(ws: &Workspace, json: bool) -> Result<()> {
    let snapshot = ws.load()?;
    print_amount_map("💵 Income Sources", &snapshot.income_sources, ws.currency(), json)
}

pub fn cmd_income_set(ws: &Workspace, source: &str, amount: f64) -> Result<()> {
    let mut snapshot = ws.load()?;
    let previous = snapshot.income_sources.get(source).copied();
    snapshot
        .update_income_sources(single(source, amount))
        .context("Invalid income source")?;
    ws.save(&mut snapshot)?;

    print_update("income source", source, previous, amount, ws.currency());
    Ok(())
}

fn single(name: &str, amount: f64) -> BudgetMap {
    BudgetMap::from([(name.trim().to_string(), amount)])
}

fn print_amount_map(title: &str, map: &BudgetMap, currency: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(map)?);
        return Ok(());
    }

    println!();
    println!("{}", title);
    println!("   ─────────────────────────────────────────");
    for (name, amount) in map {
        println!("   {:20} {:>16}", name, format_money(currency, *amount));
    }
    println!("   ─────────────────────────────────────────");
    println!(
        "   {:20} {:>16}",
        "Total",
        format_money(currency, map.values().sum())
    );

    Ok(())
}

fn print_update(what: &str, name: &str, previous: Option<f64>, amount: f64, currency: &str) {
    match previous {
        Some(old) => println!(
            "✅ Updated {} '{}': {} → {}",
            what,
            name.trim(),
            format_money(currency, old),
            format_money(currency, amount)
        ),
        None => println!(
            "✅ Added {} '{}': {}",
            what,
            name.trim(),
            format_money(currency, amount)
        ),
    }
}
