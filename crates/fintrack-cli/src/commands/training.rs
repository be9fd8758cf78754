//! Expense predictor commands (train, predict)

use anyhow::{bail, Context, Result};
use fintrack_core::{
    format_money, FinanceAgent, Prediction, PredictionInput, TrainingOutcome,
};
use serde_json::json;

use super::{parse_date_arg, Workspace};

/// Build prediction input from either a date or explicit calendar fields
pub fn build_prediction_input(
    category: &str,
    date: Option<&str>,
    day_of_week: Option<u32>,
    day_of_month: Option<u32>,
    month: Option<u32>,
    weekend: Option<bool>,
) -> Result<PredictionInput> {
    match (day_of_week, day_of_month, month) {
        (None, None, None) => {
            let date = parse_date_arg(date)?;
            let mut input = PredictionInput::for_date(date, category);
            if let Some(weekend) = weekend {
                input.date.is_weekend = u32::from(weekend);
            }
            Ok(input)
        }
        (Some(dow), Some(dom), Some(m)) => {
            let is_weekend = weekend.unwrap_or(dow >= 5);
            PredictionInput::new(dow, dom, m, u32::from(is_weekend), category)
                .context("Invalid prediction input")
        }
        _ => bail!("--day-of-week, --day-of-month and --month must be given together"),
    }
}

pub fn cmd_train(ws: &Workspace, json: bool) -> Result<()> {
    let snapshot = ws.load()?;
    let mut agent = FinanceAgent::from_snapshot(&snapshot, &ws.config);

    if !json {
        println!("🧠 Training expense predictor...");
    }
    let outcome = agent.build_model().context("Failed to train predictor")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome {
        TrainingOutcome::NotTrained { samples, required } => {
            println!(
                "   ⚠️  Not enough data: {} expense transactions (need at least {})",
                samples, required
            );
        }
        TrainingOutcome::Trained(summary) => {
            println!("   Training samples: {}", summary.train_samples);
            println!("   Test samples:     {}", summary.test_samples);
            println!("   Categories:       {}", summary.categories);
            println!("   Trees:            {}", ws.config.predictor.estimators);
            println!("✅ Model R² score: {:.2}", summary.score);
            if summary.r2 < 0.0 {
                println!(
                    "   (raw R² was {:.2}; the model does worse than predicting the mean)",
                    summary.r2
                );
            }
        }
    }

    Ok(())
}

pub fn cmd_predict(ws: &Workspace, input: &PredictionInput, json: bool) -> Result<()> {
    let snapshot = ws.load()?;
    let mut agent = FinanceAgent::from_snapshot(&snapshot, &ws.config);

    // Models are not persisted; train on the current snapshot
    let outcome = agent.build_model().context("Failed to train predictor")?;
    let prediction = agent.predict(input)?;

    if json {
        let value = json!({
            "input": input,
            "training": outcome,
            "prediction": prediction,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match &prediction {
        Prediction::Amount(amount) => {
            println!(
                "🔮 Predicted {} expense: {}",
                input.category,
                format_money(ws.currency(), *amount)
            );
            println!(
                "   Day of week {}, day {}, month {}{}",
                input.date.day_of_week,
                input.date.day_of_month,
                input.date.month,
                if input.date.is_weekend == 1 { " (weekend)" } else { "" }
            );
        }
        Prediction::NotTrained => {
            if let TrainingOutcome::NotTrained { samples, required } = outcome {
                println!(
                    "⚠️  {} ({} expense transactions, need {})",
                    prediction, samples, required
                );
            } else {
                println!("⚠️  {}", prediction);
            }
        }
        Prediction::UnrecognizedCategory(_) => {
            let known = agent
                .predictor()
                .model()
                .map(|m| m.encoder().classes().collect::<Vec<_>>().join(", "))
                .unwrap_or_default();
            println!("⚠️  {}", prediction);
            println!("   Known categories: {}", known);
        }
    }

    Ok(())
}
