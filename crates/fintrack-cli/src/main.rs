//! Fintrack CLI - Personal finance tracker
//!
//! Usage:
//!   fintrack init                       Create data files with default budgets
//!   fintrack sample --months 3          Generate sample transactions
//!   fintrack add -a 250 -c Transportation -d Metro
//!   fintrack forecast --months 3        Forecast category spending
//!   fintrack report --output report.txt Write the full text report

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let ws = commands::open_workspace(cli.data_dir.as_deref(), &cli.user)?;

    match cli.command {
        Commands::Init => commands::cmd_init(&ws),
        Commands::Sample {
            months,
            seed,
            replace,
        } => commands::cmd_sample(&ws, months, seed, replace),
        Commands::Add {
            amount,
            category,
            description,
            date,
            kind,
        } => {
            let date = commands::parse_date_arg(date.as_deref())?;
            commands::cmd_add(&ws, date, &description, amount, &category, &kind)
        }
        Commands::Transactions { limit, json } => {
            commands::cmd_transactions_list(&ws, limit, json)
        }
        Commands::Budgets { action } => match action {
            None => commands::cmd_budgets_list(&ws, false),
            Some(AmountMapAction::List { json }) => commands::cmd_budgets_list(&ws, json),
            Some(AmountMapAction::Set { name, amount }) => {
                commands::cmd_budgets_set(&ws, &name, amount)
            }
        },
        Commands::Income { action } => match action {
            None => commands::cmd_income_list(&ws, false),
            Some(AmountMapAction::List { json }) => commands::cmd_income_list(&ws, json),
            Some(AmountMapAction::Set { name, amount }) => {
                commands::cmd_income_set(&ws, &name, amount)
            }
        },
        Commands::Dashboard { json } => commands::cmd_dashboard(&ws, json),
        Commands::Categorize { json } => commands::cmd_categorize(&ws, json),
        Commands::Forecast { months, json } => commands::cmd_forecast(&ws, months, json),
        Commands::Insights { json } => commands::cmd_insights(&ws, json),
        Commands::Budget { json } => commands::cmd_budget_status(&ws, json),
        Commands::Train { json } => commands::cmd_train(&ws, json),
        Commands::Predict {
            category,
            date,
            day_of_week,
            day_of_month,
            month,
            weekend,
            json,
        } => {
            let input = commands::build_prediction_input(
                &category,
                date.as_deref(),
                day_of_week,
                day_of_month,
                month,
                weekend,
            )?;
            commands::cmd_predict(&ws, &input, json)
        }
        Commands::Report { output } => commands::cmd_report(&ws, output.as_deref()),
        Commands::Clear { yes } => commands::cmd_clear(&ws, yes),
    }
}
