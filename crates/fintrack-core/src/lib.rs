//! Fintrack Core Library
//!
//! Shared functionality for the fintrack personal finance tracker:
//! - Transaction, budget and income-source models
//! - Flat-file snapshot store with atomic, conflict-checked saves
//! - Layered configuration (embedded defaults + data-dir override)
//! - Analytics: expense categorization, budget forecasting, savings
//!   insights, budget comparison and the text report
//! - Random-forest expense-amount predictor
//! - Seeded sample data generator

pub mod agent;
pub mod analytics;
pub mod config;
pub mod error;
pub mod models;
pub mod predictor;
pub mod sample;
pub mod store;

pub use agent::FinanceAgent;
pub use analytics::{
    analyze_savings, categorize_expenses, compare_budgets, forecast_budget, generate_report,
    summary_stats, AnalysisContext, BudgetLine, BudgetStatus, MonthlyTable, SavingsAnalysis,
    SavingsReport, SavingsTier, SummaryStats,
};
pub use config::{resolve_data_dir, Config, PredictorConfig, MAX_MONTHS};
pub use error::{Error, Result};
pub use models::{
    default_budgets, default_income_sources, format_money, BudgetMap, IncomeSourceMap,
    Transaction, TransactionType, YearMonth,
};
pub use predictor::{
    ExpensePredictor, Prediction, PredictionInput, TrainingOutcome, TrainingSummary,
};
pub use sample::generate_sample_data;
pub use store::{Snapshot, SnapshotStore, DEFAULT_USER};
