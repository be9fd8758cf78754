//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use chrono::NaiveDate;
use clap::Parser;
use fintrack_core::{generate_sample_data, PredictionInput, Snapshot};
use tempfile::TempDir;

use crate::cli::Cli;
use crate::commands::{self, truncate, Workspace};

fn setup_workspace() -> (TempDir, Workspace) {
    let dir = tempfile::tempdir().unwrap();
    let ws = commands::open_workspace(Some(dir.path()), "tester").unwrap();
    (dir, ws)
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Seed the workspace with deterministic sample data
fn seed_sample(ws: &Workspace) -> Snapshot {
    let mut snapshot = ws.load().unwrap();
    snapshot
        .replace_transactions(generate_sample_data(date("2025-06-15"), 3, 42).unwrap())
        .unwrap();
    ws.save(&mut snapshot).unwrap();
    snapshot
}

// ========== Workspace Tests ==========

#[test]
fn test_open_workspace_rejects_bad_user() {
    let dir = tempfile::tempdir().unwrap();
    assert!(commands::open_workspace(Some(dir.path()), "../escape").is_err());
}

#[test]
fn test_open_workspace_reads_config_override() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[display]\ncurrency_symbol = \"$\"\n",
    )
    .unwrap();

    let ws = commands::open_workspace(Some(dir.path()), "tester").unwrap();
    assert_eq!(ws.currency(), "$");
    // Untouched sections keep their defaults
    assert_eq!(ws.config.forecast.months, 3);
}

#[test]
fn test_parse_date_arg() {
    assert_eq!(
        commands::parse_date_arg(Some("2025-02-28")).unwrap(),
        date("2025-02-28")
    );
    assert!(commands::parse_date_arg(Some("28/02/2025")).is_err());
    assert!(commands::parse_date_arg(None).is_ok());
}

#[test]
fn test_month_arguments_are_bounded() {
    assert!(Cli::try_parse_from(["fintrack", "forecast", "--months", "120"]).is_ok());
    assert!(Cli::try_parse_from(["fintrack", "forecast", "--months", "4294967295"]).is_err());
    assert!(Cli::try_parse_from(["fintrack", "forecast", "--months", "0"]).is_err());
    assert!(Cli::try_parse_from(["fintrack", "sample", "--months", "4000000"]).is_err());
}

// ========== Core Command Tests ==========

#[test]
fn test_cmd_init_writes_defaults() {
    let (_dir, ws) = setup_workspace();
    commands::cmd_init(&ws).unwrap();

    assert!(ws.store.transactions_path().exists());
    assert!(ws.store.budgets_path().exists());
    assert!(ws.store.income_path().exists());
    assert_eq!(ws.load().unwrap().budgets.len(), 11);
}

#[test]
fn test_cmd_sample_appends_and_replaces() {
    let (_dir, ws) = setup_workspace();

    commands::cmd_sample(&ws, Some(2), Some(1), false).unwrap();
    assert_eq!(ws.load().unwrap().transactions.len(), 100);

    commands::cmd_sample(&ws, Some(2), Some(2), false).unwrap();
    assert_eq!(ws.load().unwrap().transactions.len(), 200);

    commands::cmd_sample(&ws, None, Some(3), true).unwrap();
    assert_eq!(ws.load().unwrap().transactions.len(), 100);
}

#[test]
fn test_cmd_clear_requires_confirmation() {
    let (_dir, ws) = setup_workspace();
    seed_sample(&ws);

    commands::cmd_clear(&ws, false).unwrap();
    assert_eq!(ws.load().unwrap().transactions.len(), 100);

    commands::cmd_clear(&ws, true).unwrap();
    assert!(ws.load().unwrap().transactions.is_empty());
    assert!(!ws.store.budgets_path().exists());
}

// ========== Transaction Command Tests ==========

#[test]
fn test_cmd_add() {
    let (_dir, ws) = setup_workspace();

    commands::cmd_add(&ws, date("2025-01-05"), "Coffee", 150.0, "Food & Dining", "expense").unwrap();
    commands::cmd_add(&ws, date("2025-01-10"), "Salary", 50000.0, "Salary", "Income").unwrap();

    let snapshot = ws.load().unwrap();
    assert_eq!(snapshot.transactions.len(), 2);
    assert!(snapshot.transactions[0].is_expense());
    assert!(snapshot.transactions[1].is_income());
}

#[test]
fn test_cmd_add_rejects_invalid_input() {
    let (_dir, ws) = setup_workspace();

    let bad_type = commands::cmd_add(&ws, date("2025-01-05"), "x", 10.0, "Other", "transfer");
    assert!(bad_type.unwrap_err().to_string().contains("Unknown transaction type"));

    let negative = commands::cmd_add(&ws, date("2025-01-05"), "x", -10.0, "Other", "expense");
    assert!(negative.is_err());

    assert!(ws.load().unwrap().transactions.is_empty());
}

#[test]
fn test_cmd_transactions_list() {
    let (_dir, ws) = setup_workspace();
    assert!(commands::cmd_transactions_list(&ws, 20, false).is_ok());

    seed_sample(&ws);
    assert!(commands::cmd_transactions_list(&ws, 5, false).is_ok());
    assert!(commands::cmd_transactions_list(&ws, 5, true).is_ok());
}

// ========== Budget Command Tests ==========

#[test]
fn test_cmd_budgets_set_and_list() {
    let (_dir, ws) = setup_workspace();

    commands::cmd_budgets_set(&ws, "Food & Dining", 6500.0).unwrap();
    commands::cmd_budgets_set(&ws, "Pets", 800.0).unwrap();

    let budgets = ws.load().unwrap().budgets;
    assert_eq!(budgets["Food & Dining"], 6500.0);
    assert_eq!(budgets["Pets"], 800.0);
    assert_eq!(budgets.len(), 12);

    assert!(commands::cmd_budgets_list(&ws, false).is_ok());
    assert!(commands::cmd_budgets_list(&ws, true).is_ok());
}

#[test]
fn test_cmd_budgets_set_rejects_negative() {
    let (_dir, ws) = setup_workspace();
    assert!(commands::cmd_budgets_set(&ws, "Rent", -5.0).is_err());
    assert_eq!(ws.load().unwrap().budgets["Rent"], 10000.0);
}

#[test]
fn test_cmd_income_set() {
    let (_dir, ws) = setup_workspace();
    commands::cmd_income_set(&ws, "Salary", 65000.0).unwrap();
    assert_eq!(ws.load().unwrap().income_sources["Salary"], 65000.0);
    assert!(commands::cmd_income_list(&ws, false).is_ok());
}

// ========== Report Command Tests ==========

#[test]
fn test_report_commands_on_empty_data() {
    let (_dir, ws) = setup_workspace();

    assert!(commands::cmd_dashboard(&ws, false).is_ok());
    assert!(commands::cmd_categorize(&ws, false).is_ok());
    assert!(commands::cmd_forecast(&ws, None, false).is_ok());
    assert!(commands::cmd_insights(&ws, false).is_ok());
    assert!(commands::cmd_budget_status(&ws, false).is_ok());
    assert!(commands::cmd_report(&ws, None).is_ok());
}

#[test]
fn test_report_commands_on_sample_data() {
    let (_dir, ws) = setup_workspace();
    seed_sample(&ws);

    for json in [false, true] {
        assert!(commands::cmd_dashboard(&ws, json).is_ok());
        assert!(commands::cmd_categorize(&ws, json).is_ok());
        assert!(commands::cmd_forecast(&ws, Some(2), json).is_ok());
        assert!(commands::cmd_insights(&ws, json).is_ok());
        assert!(commands::cmd_budget_status(&ws, json).is_ok());
    }
}

#[test]
fn test_cmd_report_to_file() {
    let (dir, ws) = setup_workspace();
    seed_sample(&ws);

    let path = dir.path().join("financial_report.txt");
    commands::cmd_report(&ws, Some(&path)).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("FINANCIAL MANAGEMENT REPORT"));
    assert!(content.contains("SAVINGS INSIGHTS:"));
    assert!(content.contains("BUDGET RECOMMENDATIONS:"));
}

// ========== Predictor Command Tests ==========

#[test]
fn test_build_prediction_input_from_date() {
    // 2025-06-14 is a Saturday
    let input =
        commands::build_prediction_input("Rent", Some("2025-06-14"), None, None, None, None)
            .unwrap();
    assert_eq!(input, PredictionInput::new(5, 14, 6, 1, "Rent").unwrap());

    let forced =
        commands::build_prediction_input("Rent", Some("2025-06-14"), None, None, None, Some(false))
            .unwrap();
    assert_eq!(forced.date.is_weekend, 0);
}

#[test]
fn test_build_prediction_input_from_fields() {
    let input =
        commands::build_prediction_input("Rent", None, Some(6), Some(1), Some(12), None).unwrap();
    assert_eq!(input.date.is_weekend, 1);

    // Partial fields are rejected
    assert!(commands::build_prediction_input("Rent", None, Some(6), None, Some(12), None).is_err());
    // Out-of-range values are rejected
    assert!(commands::build_prediction_input("Rent", None, Some(7), Some(1), Some(1), None).is_err());
}

#[test]
fn test_cmd_train_and_predict() {
    let (_dir, ws) = setup_workspace();

    // Too little data still succeeds with a not-trained message
    assert!(commands::cmd_train(&ws, false).is_ok());

    seed_sample(&ws);
    assert!(commands::cmd_train(&ws, false).is_ok());
    assert!(commands::cmd_train(&ws, true).is_ok());

    let input = PredictionInput::new(2, 10, 5, 0, "Food & Dining").unwrap();
    assert!(commands::cmd_predict(&ws, &input, false).is_ok());
    assert!(commands::cmd_predict(&ws, &input, true).is_ok());

    let unknown = PredictionInput::new(2, 10, 5, 0, "Space Travel").unwrap();
    assert!(commands::cmd_predict(&ws, &unknown, false).is_ok());
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a long string that exceeds", 10), "a long ..."); // 7 chars + "..."
    assert_eq!(truncate("exact", 5), "exact");
    assert_eq!(truncate("exactly", 7), "exactly");
    assert_eq!(truncate("toolong", 6), "too...");
    // Multi-byte characters are counted, not bytes
    assert_eq!(truncate("₹₹₹₹₹₹", 5), "₹₹...");
}
