//! Savings analysis
//!
//! Derives monthly income, expense and savings figures and turns them into
//! human-readable insight lines. The numbers behind each line are kept on
//! [`SavingsReport`] so callers can inspect them directly.

use serde::Serialize;
use tracing::debug;

use crate::models::{format_money, Transaction, YearMonth};

use super::categorizer::{category_totals, monthly_totals};

/// Message returned when income or expenses are missing
pub const INSUFFICIENT_DATA_MESSAGE: &str = "Not enough data for savings analysis";

/// Savings rate (percent) above which the rate is "excellent"
const EXCELLENT_RATE: f64 = 20.0;
/// Savings rate (percent) above which the rate is "good"
const GOOD_RATE: f64 = 10.0;

/// Reduction tips for the categories that have one
const REDUCTION_TIPS: &[(&str, &str)] = &[
    (
        "Food & Dining",
        "Consider cooking at home more often and limiting restaurant visits to weekends.",
    ),
    (
        "Transportation",
        "Explore public transport options or carpooling to reduce fuel costs.",
    ),
    (
        "Entertainment",
        "Look for free or low-cost entertainment options in your community.",
    ),
    (
        "Shopping",
        "Implement a 24-hour waiting period before making non-essential purchases.",
    ),
    (
        "Rent",
        "If possible, consider moving to a more affordable area or getting a roommate.",
    ),
    (
        "Utilities",
        "Turn off appliances when not in use and consider energy-efficient options.",
    ),
];

/// Result of a savings analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SavingsAnalysis {
    /// No income, no expenses, or no month with both
    InsufficientData,
    Report(SavingsReport),
}

impl SavingsAnalysis {
    pub fn report(&self) -> Option<&SavingsReport> {
        match self {
            Self::Report(report) => Some(report),
            Self::InsufficientData => None,
        }
    }

    /// Ordered insight lines (a single message when data is insufficient)
    pub fn insights(&self, currency: &str) -> Vec<String> {
        match self {
            Self::Report(report) => report.insights(currency),
            Self::InsufficientData => vec![INSUFFICIENT_DATA_MESSAGE.to_string()],
        }
    }

    pub fn to_text(&self, currency: &str) -> String {
        self.insights(currency).join("\n")
    }
}

/// Qualitative savings-rate tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SavingsTier {
    /// Above 20%
    Excellent,
    /// Above 10%, at most 20%
    Good,
    /// 10% or less
    Low,
}

impl SavingsTier {
    pub fn from_rate(rate: f64) -> Self {
        if rate > EXCELLENT_RATE {
            Self::Excellent
        } else if rate > GOOD_RATE {
            Self::Good
        } else {
            Self::Low
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent savings rate! You're on track for financial security.",
            Self::Good => {
                "Good savings rate. Consider increasing it to 20% for better financial health."
            }
            Self::Low => "Your savings rate is low. Try to reduce unnecessary expenses.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySavings {
    pub month: YearMonth,
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsReport {
    /// Months that have both income and expenses
    pub monthly: Vec<MonthlySavings>,
    pub average_monthly_savings: f64,
    /// Mean income across every month with income
    pub average_monthly_income: f64,
    /// Average savings as a percentage of average income
    pub savings_rate: f64,
    pub tier: SavingsTier,
    pub top_category: Option<CategoryTotal>,
    pub tip: Option<&'static str>,
}

impl SavingsReport {
    pub fn insights(&self, currency: &str) -> Vec<String> {
        let mut lines = vec![
            format!(
                "Average monthly savings: {}",
                format_money(currency, self.average_monthly_savings)
            ),
            format!("Savings rate: {:.1}% of your income", self.savings_rate),
            self.tier.message().to_string(),
        ];

        if let Some(top) = &self.top_category {
            lines.push(format!(
                "Your top spending category is {} ({})",
                top.category,
                format_money(currency, top.amount)
            ));
            if let Some(tip) = self.tip {
                lines.push(format!("Tip: {}", tip));
            }
        }

        lines
    }
}

/// Canned reduction tip for a category, if it has one
pub fn reduction_tip(category: &str) -> Option<&'static str> {
    REDUCTION_TIPS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, tip)| *tip)
}

/// Analyze monthly savings across the whole transaction history
pub fn analyze_savings(transactions: &[Transaction]) -> SavingsAnalysis {
    let income = monthly_totals(transactions, |t| t.is_income());
    let expenses = monthly_totals(transactions, |t| t.is_expense());

    if income.is_empty() || expenses.is_empty() {
        debug!(
            income_months = income.len(),
            expense_months = expenses.len(),
            "Insufficient data for savings analysis"
        );
        return SavingsAnalysis::InsufficientData;
    }

    // Savings are only defined for months that have both series
    let monthly: Vec<MonthlySavings> = income
        .iter()
        .filter_map(|(month, inc)| {
            expenses.get(month).map(|exp| MonthlySavings {
                month: *month,
                income: *inc,
                expenses: *exp,
                savings: inc - exp,
            })
        })
        .collect();

    if monthly.is_empty() {
        debug!("No month has both income and expenses");
        return SavingsAnalysis::InsufficientData;
    }

    let average_monthly_savings =
        monthly.iter().map(|m| m.savings).sum::<f64>() / monthly.len() as f64;
    let average_monthly_income = income.values().sum::<f64>() / income.len() as f64;
    let savings_rate = if average_monthly_income > 0.0 {
        average_monthly_savings / average_monthly_income * 100.0
    } else {
        0.0
    };

    // Largest total wins; ties go to the alphabetically first category
    let top_category = category_totals(transactions)
        .into_iter()
        .fold(None::<CategoryTotal>, |best, (category, amount)| match best {
            Some(b) if b.amount >= amount => Some(b),
            _ => Some(CategoryTotal { category, amount }),
        });
    let tip = top_category
        .as_ref()
        .and_then(|top| reduction_tip(&top.category));

    let tier = SavingsTier::from_rate(savings_rate);
    debug!(
        months = monthly.len(),
        average_monthly_savings,
        savings_rate,
        ?tier,
        "Analyzed savings"
    );

    SavingsAnalysis::Report(SavingsReport {
        monthly,
        average_monthly_savings,
        average_monthly_income,
        savings_rate,
        tier,
        top_category,
        tip,
    })
}
