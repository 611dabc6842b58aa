use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::currency::{Conversion, ProviderFault, RateError, RateProvider};
use crate::fetch::{self, FetchError};

/// Client for the Frankfurter exchange-rate API.
pub struct FrankfurterProvider {
    base_url: String,
    timeout: Duration,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        FrankfurterProvider {
            base_url: base_url.to_string(),
            timeout,
        }
    }

    fn client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder().user_agent("cambio/1.0").build()
    }
}

#[derive(Deserialize, Debug)]
struct LatestResponse {
    base: String,
    date: String,
    rates: HashMap<String, f64>,
}

#[async_trait]
impl RateProvider for FrankfurterProvider {
    #[instrument(name = "FrankfurterCurrencies", skip(self))]
    async fn currencies(&self) -> Result<BTreeMap<String, String>, RateError> {
        let url = format!("{}/currencies", self.base_url);
        debug!("Requesting currency list from {}", url);

        let client = self
            .client()
            .map_err(|e| RateError::CurrencyListFailed(ProviderFault::Transport(e)))?;
        let response = fetch::send_with_timeout(client.get(&url), self.timeout)
            .await
            .map_err(|e| match e {
                FetchError::TimedOut => RateError::TimedOut,
                FetchError::Transport(err) => {
                    RateError::CurrencyListFailed(ProviderFault::Transport(err))
                }
            })?;

        if !response.status().is_success() {
            return Err(RateError::CurrencyListFailed(ProviderFault::Status(
                response.status(),
            )));
        }

        response
            .json::<BTreeMap<String, String>>()
            .await
            .map_err(|e| RateError::CurrencyListFailed(ProviderFault::Decode(e.to_string())))
    }

    #[instrument(
        name = "FrankfurterConvert",
        skip(self),
        fields(amount = %amount, from = %from, to = %to)
    )]
    async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<Conversion, RateError> {
        let url = format!(
            "{}/latest?amount={}&from={}&to={}",
            self.base_url, amount, from, to
        );
        debug!("Requesting conversion from {}", url);

        let client = self
            .client()
            .map_err(|e| RateError::ConversionFailed(ProviderFault::Transport(e)))?;
        let response = fetch::send_with_timeout(client.get(&url), self.timeout)
            .await
            .map_err(|e| match e {
                FetchError::TimedOut => RateError::TimedOut,
                FetchError::Transport(err) => {
                    RateError::ConversionFailed(ProviderFault::Transport(err))
                }
            })?;

        if !response.status().is_success() {
            return Err(RateError::ConversionFailed(ProviderFault::Status(
                response.status(),
            )));
        }

        let data = response
            .json::<LatestResponse>()
            .await
            .map_err(|e| RateError::ConversionFailed(ProviderFault::Decode(e.to_string())))?;

        let result = *data.rates.get(to).ok_or_else(|| {
            RateError::ConversionFailed(ProviderFault::Decode(format!(
                "no rate for {to} in response"
            )))
        })?;

        Ok(Conversion {
            amount,
            from: data.base,
            to: to.to_string(),
            rate: result / amount,
            result,
            date: data.date,
        })
    }
}
