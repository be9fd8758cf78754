//! Synthetic transaction generator for demos and first runs

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::MAX_MONTHS;
use crate::error::{Error, Result};
use crate::models::{round2, Transaction, TransactionType};

pub const SAMPLE_EXPENSES: usize = 80;
pub const SAMPLE_INCOMES: usize = 20;

struct CategoryProfile {
    name: &'static str,
    min: f64,
    max: f64,
    descriptions: &'static [&'static str],
}

const EXPENSE_PROFILES: &[CategoryProfile] = &[
    CategoryProfile {
        name: "Food & Dining",
        min: 100.0,
        max: 1500.0,
        descriptions: &["Restaurant", "Zomato Order", "Swiggy Order", "Grocery", "Street Food", "Cafe"],
    },
    CategoryProfile {
        name: "Transportation",
        min: 50.0,
        max: 1000.0,
        descriptions: &["Petrol", "Auto Rickshaw", "Metro", "Bus", "Ola", "Uber", "Train"],
    },
    CategoryProfile {
        name: "Entertainment",
        min: 200.0,
        max: 3000.0,
        descriptions: &["Movie Tickets", "Netflix", "Amazon Prime", "Concert", "Amusement Park"],
    },
    CategoryProfile {
        name: "Utilities",
        min: 500.0,
        max: 5000.0,
        descriptions: &["Electricity Bill", "Water Bill", "Internet Bill", "Mobile Recharge", "Gas Cylinder"],
    },
    CategoryProfile {
        name: "Shopping",
        min: 300.0,
        max: 8000.0,
        descriptions: &["Clothes", "Electronics", "Amazon", "Flipkart", "Myntra", "Local Market"],
    },
    CategoryProfile {
        name: "Healthcare",
        min: 200.0,
        max: 5000.0,
        descriptions: &["Doctor Visit", "Medicines", "Hospital", "Pharmacy", "Health Checkup"],
    },
    CategoryProfile {
        name: "Rent",
        min: 8000.0,
        max: 15000.0,
        descriptions: &["House Rent", "Maintenance"],
    },
    CategoryProfile {
        name: "Education",
        min: 1000.0,
        max: 10000.0,
        descriptions: &["School Fees", "Books", "Tuition", "Online Course"],
    },
    CategoryProfile {
        name: "Personal Care",
        min: 100.0,
        max: 2000.0,
        descriptions: &["Salon", "Spa", "Gym", "Yoga Class"],
    },
    CategoryProfile {
        name: "Investments",
        min: 1000.0,
        max: 10000.0,
        descriptions: &["Mutual Funds", "Stocks", "Fixed Deposit", "PPF"],
    },
    CategoryProfile {
        name: "Other",
        min: 50.0,
        max: 2000.0,
        descriptions: &["Gift", "Donation", "Miscellaneous"],
    },
];

const INCOME_PROFILES: &[CategoryProfile] = &[
    CategoryProfile {
        name: "Salary",
        min: 40000.0,
        max: 80000.0,
        descriptions: &["Monthly Salary", "Paycheck"],
    },
    CategoryProfile {
        name: "Freelance",
        min: 5000.0,
        max: 30000.0,
        descriptions: &["Freelance Project", "Consulting"],
    },
    CategoryProfile {
        name: "Investments",
        min: 1000.0,
        max: 10000.0,
        descriptions: &["Dividends", "Interest", "Capital Gains"],
    },
    CategoryProfile {
        name: "Business",
        min: 10000.0,
        max: 50000.0,
        descriptions: &["Business Revenue", "Client Payment"],
    },
    CategoryProfile {
        name: "Other Income",
        min: 1000.0,
        max: 10000.0,
        descriptions: &["Bonus", "Cashback", "Rewards"],
    },
];

/// Generate 80 expenses and 20 incomes dated within the `months × 30` days
/// before `today`.
///
/// The same `seed` and `today` always produce the same transactions.
/// Fails when `months` exceeds [`MAX_MONTHS`] or the span reaches past the
/// earliest representable date.
pub fn generate_sample_data(today: NaiveDate, months: u32, seed: u64) -> Result<Vec<Transaction>> {
    if months > MAX_MONTHS {
        return Err(Error::InvalidData(format!(
            "Sample history is limited to {} months, got {}",
            MAX_MONTHS, months
        )));
    }
    let span = i64::from(months.max(1)) * 30;
    let start = today
        .checked_sub_signed(Duration::days(span))
        .ok_or_else(|| {
            Error::InvalidData(format!("{} months before {} is out of range", months, today))
        })?;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut transactions = Vec::with_capacity(SAMPLE_EXPENSES + SAMPLE_INCOMES);
    for _ in 0..SAMPLE_EXPENSES {
        transactions.push(generate_one(
            &mut rng,
            EXPENSE_PROFILES,
            start,
            span,
            TransactionType::Expense,
        ));
    }
    for _ in 0..SAMPLE_INCOMES {
        transactions.push(generate_one(
            &mut rng,
            INCOME_PROFILES,
            start,
            span,
            TransactionType::Income,
        ));
    }

    debug!(count = transactions.len(), months, seed, "Generated sample data");
    Ok(transactions)
}

fn generate_one(
    rng: &mut StdRng,
    profiles: &[CategoryProfile],
    start: NaiveDate,
    span: i64,
    transaction_type: TransactionType,
) -> Transaction {
    let profile = &profiles[rng.gen_range(0..profiles.len())];
    let date = start + Duration::days(rng.gen_range(0..span));
    let amount = round2(rng.gen_range(profile.min..profile.max));
    let description = profile
        .descriptions
        .choose(rng)
        .copied()
        .unwrap_or(profile.name);

    Transaction {
        date,
        description: description.to_string(),
        amount,
        category: profile.name.to_string(),
        transaction_type,
    }
}
