use anyhow::Result;
use thiserror::Error;
use tracing::debug;

use crate::cli::ui::{self, StyleType};
use crate::core::currency::RateProvider;
use crate::history::HistoryStore;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("amount must be a positive number")]
    NonPositiveAmount,
    #[error("'{0}' is not a currency code; use three letters, like USD")]
    BadCurrencyCode(String),
    #[error("choose two different currencies")]
    SameCurrency,
}

fn normalize_code(code: &str) -> Result<String, ValidationError> {
    let code = code.trim();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(ValidationError::BadCurrencyCode(code.to_string()))
    }
}

/// Checks the conversion input before anything touches the network.
/// Returns the currency codes normalized to uppercase.
pub fn validate(amount: f64, from: &str, to: &str) -> Result<(String, String), ValidationError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError::NonPositiveAmount);
    }
    let from = normalize_code(from)?;
    let to = normalize_code(to)?;
    if from == to {
        return Err(ValidationError::SameCurrency);
    }
    Ok((from, to))
}

/// Runs one conversion: validate, fetch, render, save to history.
pub async fn run(
    provider: &dyn RateProvider,
    history: &HistoryStore,
    amount: f64,
    from: &str,
    to: &str,
) -> Result<()> {
    let (from, to) = validate(amount, from, to)?;

    let spinner = ui::new_spinner("Converting...");
    let conversion = provider.convert(amount, &from, &to).await;
    spinner.finish_and_clear();
    let conversion = conversion?;

    println!(
        "{} {} = {}",
        ui::format_amount(conversion.amount),
        conversion.from,
        ui::style_text(
            &format!(
                "{} {}",
                ui::format_amount(conversion.result),
                conversion.to
            ),
            StyleType::ResultValue,
        ),
    );
    println!(
        "{}",
        ui::style_text(
            &format!(
                "1 {} = {:.4} {} (as of {})",
                conversion.from, conversion.rate, conversion.to, conversion.date
            ),
            StyleType::Subtle,
        )
    );

    let record = history.add(&conversion)?;
    debug!(id = %record.id, "Conversion saved to history");
    println!("{}", ui::style_text("Saved to history.", StyleType::Subtle));

    Ok(())
}
