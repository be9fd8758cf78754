//! Budget forecaster
//!
//! Projects per-category spending for upcoming months from the categorized
//! history using a recency-weighted average: month `i` (oldest = 1) gets
//! weight `i`. The same value is used for every future month, so the
//! forecast is a flat line per category rather than a trend extrapolation.

use tracing::{debug, warn};

use super::table::MonthlyTable;
use crate::config::MAX_MONTHS;

/// Forecast `horizon` months past the last month in `summary`.
///
/// Returns an empty table when the summary is empty or `horizon` is zero.
/// Horizons above [`MAX_MONTHS`] are capped.
pub fn forecast_budget(summary: &MonthlyTable, horizon: u32) -> MonthlyTable {
    let horizon = if horizon > MAX_MONTHS {
        warn!(horizon, max = MAX_MONTHS, "Forecast horizon capped");
        MAX_MONTHS
    } else {
        horizon
    };
    let last_month = match summary.last_month() {
        Some(m) if !summary.is_empty() && horizon > 0 => m,
        _ => return MonthlyTable::empty(),
    };

    let categories = summary.categories().to_vec();
    let projected: Vec<f64> = categories
        .iter()
        .map(|c| weighted_average(&summary.column(c).unwrap_or_default()))
        .collect();

    let months = (1..=horizon).map(|i| last_month.plus_months(i)).collect();
    let values = vec![projected; horizon as usize];

    debug!(
        categories = categories.len(),
        history = summary.months().len(),
        horizon,
        "Built budget forecast"
    );

    MonthlyTable::from_rows(months, categories, values)
}

/// Linearly recency-weighted mean: `Σ(i·xᵢ) / Σi` for `i = 1..=n`.
///
/// Returns 0 for an empty slice.
pub fn weighted_average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let (weighted_sum, weight_sum) = values
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(sum, weights), (i, v)| {
            let w = (i + 1) as f64;
            (sum + w * v, weights + w)
        });
    weighted_sum / weight_sum
}
