//! Integration tests for fintrack-core
//!
//! These tests exercise the full store → analytics → report workflow.

use std::sync::Barrier;
use std::thread;

use chrono::NaiveDate;
use fintrack_core::{
    analytics::INSUFFICIENT_DATA_MESSAGE, generate_sample_data, Config, Error, FinanceAgent,
    Prediction, PredictionInput, SavingsTier, SnapshotStore, Transaction, TransactionType,
    TrainingOutcome, DEFAULT_USER,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Two months of history with a clear income surplus
fn household_csv() -> &'static str {
    r#"Date,Description,Amount,Category,Type
2025-01-01,House Rent,12000,Rent,Expense
2025-01-05,Grocery,1800.50,Food & Dining,Expense
2025-01-07,Metro,250,Transportation,Expense
2025-01-31,Monthly Salary,60000,Salary,Income
2025-02-01,House Rent,12000,Rent,Expense
2025-02-09,Swiggy Order,650,Food & Dining,Expense
2025-02-14,Movie Tickets,900,Entertainment,Expense
2025-02-28,Monthly Salary,60000,Salary,Income
"#
}

// =============================================================================
// Store Integration Tests
// =============================================================================

#[test]
fn test_csv_snapshot_to_report() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path(), "alice").unwrap();
    std::fs::write(store.transactions_path(), household_csv()).unwrap();

    let snapshot = store.load().unwrap();
    assert_eq!(snapshot.transactions.len(), 8);

    let config = Config::default();
    let agent = FinanceAgent::from_snapshot(&snapshot, &config);

    // Categorized rows sum to each month's expenses
    let table = agent.categorize_expenses();
    let jan = "2025-01".parse().unwrap();
    let feb = "2025-02".parse().unwrap();
    assert_eq!(table.month_total(jan), Some(14050.5));
    assert_eq!(table.month_total(feb), Some(13550.0));
    assert_eq!(table.get(jan, "Entertainment"), Some(0.0));

    // Flat-line forecast with weights 1 and 2
    let forecast = agent.forecast_budget(None);
    assert_eq!(forecast.months().len(), 3);
    let food = forecast.column("Food & Dining").unwrap();
    let expected = (1800.5 + 2.0 * 650.0) / 3.0;
    assert!(food.iter().all(|v| (v - expected).abs() < 1e-9));

    let savings = agent.analyze_savings();
    let report = savings.report().unwrap();
    assert_eq!(report.monthly.len(), 2);
    assert_eq!(report.tier, SavingsTier::Excellent);
    assert_eq!(report.top_category.as_ref().unwrap().category, "Rent");

    let text = agent.generate_report();
    assert!(text.contains("EXPENSE CATEGORIZATION (Last 2 Months):"));
    assert!(text.contains("Rent: Budget ₹10,000.00, Spent ₹24,000.00 (240.0%)"));
    assert!(text.contains("You've exceeded your budget by ₹14,000.00"));
    assert!(text.contains("Tip: If possible, consider moving to a more affordable area"));
}

#[test]
fn test_add_transaction_and_budget_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path(), DEFAULT_USER).unwrap();

    let mut snapshot = store.load().unwrap();
    snapshot
        .add_transaction(
            Transaction::new(
                date("2025-03-03"),
                "Electricity Bill",
                2300.0,
                "Utilities",
                TransactionType::Expense,
            )
            .unwrap(),
        )
        .unwrap();
    snapshot
        .update_budgets([("Utilities".to_string(), 2000.0)].into_iter().collect())
        .unwrap();
    store.save(&mut snapshot).unwrap();

    let reloaded = store.load().unwrap();
    assert_eq!(reloaded.transactions, snapshot.transactions);
    assert_eq!(reloaded.budgets.get("Utilities"), Some(&2000.0));
    // Untouched defaults survive the update
    assert_eq!(reloaded.budgets.get("Rent"), Some(&10000.0));

    let config = Config::default();
    let agent = FinanceAgent::from_snapshot(&reloaded, &config);
    let utilities = agent
        .compare_budgets()
        .into_iter()
        .find(|l| l.category == "Utilities")
        .unwrap();
    assert!((utilities.percentage - 115.0).abs() < 1e-9);
    assert_eq!(utilities.display_percentage, 100.0);
}

#[test]
fn test_concurrent_writers_conflict() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path(), DEFAULT_USER).unwrap();

    let mut first = store.load().unwrap();
    let mut second = store.load().unwrap();

    first
        .add_transaction(
            Transaction::new(date("2025-01-01"), "Gift", 500.0, "Other", TransactionType::Expense)
                .unwrap(),
        )
        .unwrap();
    store.save(&mut first).unwrap();

    second
        .add_transaction(
            Transaction::new(date("2025-01-02"), "Bonus", 900.0, "Other Income", TransactionType::Income)
                .unwrap(),
        )
        .unwrap();
    assert!(matches!(store.save(&mut second), Err(Error::Conflict(_))));

    // The first writer's data is intact
    let on_disk = store.load().unwrap();
    assert_eq!(on_disk.transactions.len(), 1);
    assert_eq!(on_disk.transactions[0].description, "Gift");
}

#[test]
fn test_racing_writers_lose_no_updates() {
    for round in 0..50 {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path(), DEFAULT_USER).unwrap();
        let barrier = Barrier::new(2);

        let results: Vec<Result<&str, Error>> = thread::scope(|s| {
            let handles: Vec<_> = ["Bus", "Movie"]
                .into_iter()
                .map(|description| {
                    let store = &store;
                    let barrier = &barrier;
                    s.spawn(move || {
                        let mut snapshot = store.load().unwrap();
                        snapshot
                            .add_transaction(
                                Transaction::new(
                                    date("2025-03-01"),
                                    description,
                                    100.0,
                                    "Other",
                                    TransactionType::Expense,
                                )
                                .unwrap(),
                            )
                            .unwrap();
                        // Both writers hold the same stale snapshot before either saves
                        barrier.wait();
                        store.save(&mut snapshot).map(|_| description)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let winners: Vec<&str> = results.iter().filter_map(|r| r.as_ref().ok().copied()).collect();
        assert_eq!(winners.len(), 1, "round {}: {:?}", round, results);
        assert!(results.iter().any(|r| matches!(r, Err(Error::Conflict(_)))));

        let on_disk = store.load().unwrap();
        assert_eq!(on_disk.transactions.len(), 1);
        assert_eq!(on_disk.transactions[0].description, winners[0]);
    }
}

#[test]
fn test_users_are_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let alice = SnapshotStore::new(dir.path(), "alice").unwrap();
    let bob = SnapshotStore::new(dir.path(), "bob").unwrap();

    let mut snapshot = alice.load().unwrap();
    snapshot
        .replace_transactions(generate_sample_data(date("2025-06-01"), 3, 42).unwrap())
        .unwrap();
    alice.save(&mut snapshot).unwrap();

    assert_eq!(alice.load().unwrap().transactions.len(), 100);
    assert!(bob.load().unwrap().transactions.is_empty());
}

// =============================================================================
// Analytics Integration Tests
// =============================================================================

#[test]
fn test_expense_only_history() {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path(), DEFAULT_USER).unwrap();
    std::fs::write(
        store.transactions_path(),
        "Date,Description,Amount,Category,Type\n2025-01-05,Cafe,120,Food & Dining,Expense\n",
    )
    .unwrap();

    let snapshot = store.load().unwrap();
    let config = Config::default();
    let agent = FinanceAgent::from_snapshot(&snapshot, &config);

    assert_eq!(
        agent.analyze_savings().insights("₹"),
        vec![INSUFFICIENT_DATA_MESSAGE.to_string()]
    );
    assert!(agent
        .generate_report()
        .contains(&format!("SAVINGS INSIGHTS:\n{}", INSUFFICIENT_DATA_MESSAGE)));
}

#[test]
fn test_predictor_on_sample_history() {
    let snapshot = {
        let mut s = fintrack_core::Snapshot::empty();
        s.replace_transactions(generate_sample_data(date("2025-06-01"), 3, 9).unwrap())
            .unwrap();
        s
    };
    let mut config = Config::default();
    config.predictor.estimators = 25;

    let mut agent = FinanceAgent::from_snapshot(&snapshot, &config);
    let input = PredictionInput::for_date(date("2025-06-07"), "Food & Dining");
    assert_eq!(agent.predict(&input).unwrap(), Prediction::NotTrained);

    let outcome = agent.build_model().unwrap();
    let TrainingOutcome::Trained(summary) = outcome else {
        panic!("80 expenses should be enough to train");
    };
    assert!((0.0..=1.0).contains(&summary.score));
    assert_eq!(summary.train_samples + summary.test_samples, 80);

    let unknown = PredictionInput::for_date(date("2025-06-07"), "Space Travel");
    assert_eq!(
        agent.predict(&unknown).unwrap(),
        Prediction::UnrecognizedCategory("Space Travel".to_string())
    );
}
