//! Request-scoped facade over the analytics pipeline and predictor
//!
//! A [`FinanceAgent`] borrows one loaded snapshot, lives for a single
//! command, and is dropped afterwards. The only state it owns is the
//! predictor, which is retrained from scratch on every `build_model` call.

use tracing::debug;

use crate::analytics::{
    self, AnalysisContext, BudgetLine, MonthlyTable, SavingsAnalysis, SummaryStats,
};
use crate::config::Config;
use crate::error::Result;
use crate::predictor::{ExpensePredictor, Prediction, PredictionInput, TrainingOutcome};
use crate::store::Snapshot;

pub struct FinanceAgent<'a> {
    ctx: AnalysisContext<'a>,
    predictor: ExpensePredictor,
}

impl<'a> FinanceAgent<'a> {
    pub fn new(ctx: AnalysisContext<'a>) -> Self {
        let predictor = ExpensePredictor::new(ctx.config.predictor.clone());
        Self { ctx, predictor }
    }

    pub fn from_snapshot(snapshot: &'a Snapshot, config: &'a Config) -> Self {
        debug!(
            transactions = snapshot.transactions.len(),
            fingerprint = snapshot.fingerprint(),
            "Creating finance agent"
        );
        Self::new(AnalysisContext::from_snapshot(snapshot, config))
    }

    pub fn context(&self) -> &AnalysisContext<'a> {
        &self.ctx
    }

    pub fn categorize_expenses(&self) -> MonthlyTable {
        analytics::categorize_expenses(self.ctx.transactions)
    }

    /// Forecast `horizon` months, or the configured default when `None`
    pub fn forecast_budget(&self, horizon: Option<u32>) -> MonthlyTable {
        let horizon = horizon.unwrap_or(self.ctx.config.forecast.months);
        analytics::forecast_budget(&self.categorize_expenses(), horizon)
    }

    pub fn analyze_savings(&self) -> SavingsAnalysis {
        analytics::analyze_savings(self.ctx.transactions)
    }

    pub fn build_model(&mut self) -> Result<TrainingOutcome> {
        self.predictor.build_model(self.ctx.transactions)
    }

    pub fn predict(&self, input: &PredictionInput) -> Result<Prediction> {
        self.predictor.predict(input)
    }

    pub fn predictor(&self) -> &ExpensePredictor {
        &self.predictor
    }

    pub fn generate_report(&self) -> String {
        analytics::generate_report(&self.ctx)
    }

    pub fn compare_budgets(&self) -> Vec<BudgetLine> {
        analytics::compare_budgets(
            self.ctx.transactions,
            self.ctx.budgets,
            self.ctx.config.budget.near_limit_percent,
        )
    }

    pub fn summary_stats(&self) -> SummaryStats {
        analytics::summary_stats(self.ctx.transactions)
    }
}
