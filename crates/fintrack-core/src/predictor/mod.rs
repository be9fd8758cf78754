//! Expense Predictor
//!
//! Trains a random-forest regressor that maps a transaction's calendar
//! features and category to an expected amount.
//!
//! ## Training
//!
//! - Uses expense transactions only; needs `min_samples` of them (default 20)
//! - Features: day-of-week, day-of-month, month, weekend flag, category code
//! - Seeded 80/20 shuffle split; R² on the held-out part is the model score
//!
//! ## Prediction
//!
//! Returns [`Prediction::NotTrained`] before a successful training run and
//! [`Prediction::UnrecognizedCategory`] for categories the model never saw.
//! Both are ordinary results, not errors.
//!
//! ```rust,ignore
//! let mut predictor = ExpensePredictor::new(config.predictor.clone());
//! if let TrainingOutcome::Trained(summary) = predictor.build_model(&transactions)? {
//!     println!("R² = {:.2}", summary.score);
//! }
//! let input = PredictionInput::new(5, 14, 6, 1, "Food & Dining")?;
//! let prediction = predictor.predict(&input)?;
//! ```

pub mod dataset;
pub mod encoder;
pub mod features;
pub mod forest;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::PredictorConfig;
use crate::error::Result;
use crate::models::{round2, Transaction};

pub use dataset::{r2_score, train_test_split};
pub use encoder::CategoryEncoder;
pub use features::{DateFeatures, FeatureRow, PredictionInput, FEATURE_COUNT, FEATURE_NAMES};
pub use forest::{ForestParams, RandomForestRegressor, RegressionTree};

/// Outcome of a training run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrainingOutcome {
    /// Too few expense transactions to train
    NotTrained { samples: usize, required: usize },
    Trained(TrainingSummary),
}

impl TrainingOutcome {
    /// Reported score, if a model was trained
    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Trained(summary) => Some(summary.score),
            Self::NotTrained { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingSummary {
    /// Held-out R² clamped to [0, 1]
    pub score: f64,
    /// Unclamped held-out R²
    pub r2: f64,
    pub train_samples: usize,
    pub test_samples: usize,
    pub categories: usize,
}

/// Result of a prediction request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Prediction {
    NotTrained,
    UnrecognizedCategory(String),
    /// Predicted amount, rounded to 2 decimals
    Amount(f64),
}

impl Prediction {
    pub fn amount(&self) -> Option<f64> {
        match self {
            Self::Amount(value) => Some(*value),
            _ => None,
        }
    }
}

impl std::fmt::Display for Prediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotTrained => write!(f, "Model not trained yet"),
            Self::UnrecognizedCategory(category) => {
                write!(f, "Category not recognized: {}", category)
            }
            Self::Amount(value) => write!(f, "{:.2}", value),
        }
    }
}

/// A fitted forest together with the encoder it was trained with
#[derive(Debug, Clone)]
pub struct TrainedModel {
    forest: RandomForestRegressor,
    encoder: CategoryEncoder,
    summary: TrainingSummary,
}

impl TrainedModel {
    /// Fit on the given expenses. Callers check the minimum sample count.
    fn fit(expenses: &[&Transaction], config: &PredictorConfig) -> Result<Self> {
        let encoder = CategoryEncoder::fit(expenses.iter().map(|t| t.category.as_str()));

        let mut rows = Vec::with_capacity(expenses.len());
        let mut targets = Vec::with_capacity(expenses.len());
        for tx in expenses {
            // Every category was just fitted
            let code = encoder.encode(&tx.category).unwrap_or_default();
            rows.push(DateFeatures::from_date(tx.date).to_row(code));
            targets.push(tx.amount);
        }

        let (train_idx, test_idx) =
            train_test_split(rows.len(), config.test_fraction, config.seed);
        let pick_rows = |idx: &[usize]| idx.iter().map(|&i| rows[i]).collect::<Vec<_>>();
        let pick_targets = |idx: &[usize]| idx.iter().map(|&i| targets[i]).collect::<Vec<_>>();

        let params = ForestParams {
            n_estimators: config.estimators,
            seed: config.seed,
            ..ForestParams::default()
        };
        let forest =
            RandomForestRegressor::fit(&pick_rows(&train_idx), &pick_targets(&train_idx), &params)?;

        let test_pred = forest.predict_many(&pick_rows(&test_idx));
        let r2 = r2_score(&pick_targets(&test_idx), &test_pred);

        let summary = TrainingSummary {
            score: r2.clamp(0.0, 1.0),
            r2,
            train_samples: train_idx.len(),
            test_samples: test_idx.len(),
            categories: encoder.len(),
        };

        Ok(Self {
            forest,
            encoder,
            summary,
        })
    }

    pub fn encoder(&self) -> &CategoryEncoder {
        &self.encoder
    }

    pub fn summary(&self) -> &TrainingSummary {
        &self.summary
    }

    pub fn forest(&self) -> &RandomForestRegressor {
        &self.forest
    }

    fn predict(&self, input: &PredictionInput) -> Prediction {
        match self.encoder.encode(&input.category) {
            Some(code) => Prediction::Amount(round2(self.forest.predict(&input.date.to_row(code)))),
            None => Prediction::UnrecognizedCategory(input.category.clone()),
        }
    }
}

/// Request-scoped expense predictor; holds at most one trained model
#[derive(Debug, Clone)]
pub struct ExpensePredictor {
    config: PredictorConfig,
    model: Option<TrainedModel>,
}

impl ExpensePredictor {
    pub fn new(config: PredictorConfig) -> Self {
        Self {
            config,
            model: None,
        }
    }

    /// Train from scratch on the expense transactions in `transactions`.
    ///
    /// Any previously trained model is discarded, including when there are
    /// too few samples to train a new one.
    pub fn build_model(&mut self, transactions: &[Transaction]) -> Result<TrainingOutcome> {
        self.model = None;

        let expenses: Vec<&Transaction> = transactions.iter().filter(|t| t.is_expense()).collect();
        if expenses.len() < self.config.min_samples {
            debug!(
                samples = expenses.len(),
                required = self.config.min_samples,
                "Not enough expenses to train predictor"
            );
            return Ok(TrainingOutcome::NotTrained {
                samples: expenses.len(),
                required: self.config.min_samples,
            });
        }

        let model = TrainedModel::fit(&expenses, &self.config)?;
        let summary = model.summary.clone();
        info!(
            score = summary.score,
            r2 = summary.r2,
            train = summary.train_samples,
            test = summary.test_samples,
            categories = summary.categories,
            "Trained expense predictor"
        );
        self.model = Some(model);
        Ok(TrainingOutcome::Trained(summary))
    }

    /// Predict an amount. Out-of-range calendar values are errors.
    pub fn predict(&self, input: &PredictionInput) -> Result<Prediction> {
        input.validate()?;
        Ok(match &self.model {
            Some(model) => model.predict(input),
            None => Prediction::NotTrained,
        })
    }

    pub fn model(&self) -> Option<&TrainedModel> {
        self.model.as_ref()
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }
}
