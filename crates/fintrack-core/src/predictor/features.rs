//! Feature extraction for the expense predictor

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of model inputs per sample
pub const FEATURE_COUNT: usize = 5;

pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "day_of_week",
    "day_of_month",
    "month",
    "is_weekend",
    "category",
];

/// One encoded sample
pub type FeatureRow = [f64; FEATURE_COUNT];

/// Calendar features of a transaction date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFeatures {
    /// Monday = 0 … Sunday = 6
    pub day_of_week: u32,
    pub day_of_month: u32,
    pub month: u32,
    /// 1 on Saturday/Sunday, else 0
    pub is_weekend: u32,
}

impl DateFeatures {
    pub fn from_date(date: NaiveDate) -> Self {
        let day_of_week = date.weekday().num_days_from_monday();
        Self {
            day_of_week,
            day_of_month: date.day(),
            month: date.month(),
            is_weekend: u32::from(day_of_week >= 5),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.day_of_week > 6 {
            return Err(Error::InvalidData(format!(
                "day_of_week must be 0-6, got {}",
                self.day_of_week
            )));
        }
        if !(1..=31).contains(&self.day_of_month) {
            return Err(Error::InvalidData(format!(
                "day_of_month must be 1-31, got {}",
                self.day_of_month
            )));
        }
        if !(1..=12).contains(&self.month) {
            return Err(Error::InvalidData(format!(
                "month must be 1-12, got {}",
                self.month
            )));
        }
        if self.is_weekend > 1 {
            return Err(Error::InvalidData(format!(
                "is_weekend must be 0 or 1, got {}",
                self.is_weekend
            )));
        }
        Ok(())
    }

    pub fn to_row(&self, category_code: usize) -> FeatureRow {
        [
            self.day_of_week as f64,
            self.day_of_month as f64,
            self.month as f64,
            self.is_weekend as f64,
            category_code as f64,
        ]
    }
}

/// Inputs for a single prediction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionInput {
    #[serde(flatten)]
    pub date: DateFeatures,
    pub category: String,
}

impl PredictionInput {
    /// Build from raw values, rejecting out-of-range numbers
    pub fn new(
        day_of_week: u32,
        day_of_month: u32,
        month: u32,
        is_weekend: u32,
        category: impl Into<String>,
    ) -> Result<Self> {
        let date = DateFeatures {
            day_of_week,
            day_of_month,
            month,
            is_weekend,
        };
        date.validate()?;
        Ok(Self {
            date,
            category: category.into(),
        })
    }

    /// Derive the calendar features from a date
    pub fn for_date(date: NaiveDate, category: impl Into<String>) -> Self {
        Self {
            date: DateFeatures::from_date(date),
            category: category.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.date.validate()
    }
}
