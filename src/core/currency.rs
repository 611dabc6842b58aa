//! Currency conversion abstractions

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Result of a single conversion request.
///
/// `rate` is derived as `result / amount` from the provider's converted
/// amount rather than read from a rate field; if the provider rounds
/// `result`, the rate is an approximation of the quoted one. This mirrors
/// what gets displayed to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub rate: f64,
    pub result: f64,
    /// Quote date reported by the provider, e.g. "2026-08-04".
    pub date: String,
}

/// Underlying cause of a failed provider call. Carried as the source of
/// [`RateError`] so logs keep the detail while the user sees a stable
/// message.
#[derive(Debug, Error)]
pub enum ProviderFault {
    #[error(transparent)]
    Transport(reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed provider response: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum RateError {
    /// The request exceeded its time budget. Display matches the fetch
    /// layer's message exactly and is never rewritten on the way up.
    #[error("time limit exceeded")]
    TimedOut,
    #[error("could not load currencies, check your connection")]
    CurrencyListFailed(#[source] ProviderFault),
    #[error("conversion failed, please try again")]
    ConversionFailed(#[source] ProviderFault),
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Available currency codes mapped to display names.
    async fn currencies(&self) -> Result<BTreeMap<String, String>, RateError>;

    /// Converts `amount` of `from` into `to`.
    async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<Conversion, RateError>;
}
