//! Exchange rate table for currency conversion lookups.

use std::collections::BTreeMap;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use kassabok_core::currency::ExchangeRate;
use kassabok_core::error::ServiceError;
use kassabok_core::ledger::ExchangeRateGateway;
use kassabok_shared::types::{CurrencyCode, UnknownCurrencyCode};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::debug;

/// Errors from loading configured rates.
#[derive(Debug, thiserror::Error)]
pub enum RateConfigError {
    /// Currency code is not supported.
    #[error(transparent)]
    UnknownCurrency(#[from] UnknownCurrencyCode),

    /// Rate is not a positive decimal.
    #[error("Invalid exchange rate for {code}: {value}")]
    InvalidRate {
        /// Currency the rate belongs to.
        code: String,
        /// Configured value.
        value: String,
    },
}

/// Exchange rates held in memory.
///
/// A lookup uses the latest rate effective on or before the requested date, trying
/// the direct pair first and then the inverse of the opposite pair.
#[derive(Debug, Default)]
pub struct StaticExchangeRates {
    rates: RwLock<Vec<ExchangeRate>>,
}

impl StaticExchangeRates {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `code -> rate` pairs into `local`, effective from `since`.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown codes and for rates that are not positive decimals.
    pub fn from_config(
        local: CurrencyCode,
        rates: &BTreeMap<String, String>,
        since: NaiveDate,
    ) -> Result<Self, RateConfigError> {
        let mut table = Vec::with_capacity(rates.len());
        for (code, value) in rates {
            let from = CurrencyCode::from_str(code)?;
            let rate = Decimal::from_str(value)
                .ok()
                .filter(|rate| *rate > Decimal::ZERO)
                .ok_or_else(|| RateConfigError::InvalidRate {
                    code: code.clone(),
                    value: value.clone(),
                })?;
            table.push(ExchangeRate::new(from, local, rate, since));
        }

        Ok(Self {
            rates: RwLock::new(table),
        })
    }

    /// Adds a rate.
    pub async fn insert(&self, rate: ExchangeRate) {
        self.rates.write().await.push(rate);
    }
}

fn latest<'a>(
    rates: &'a [ExchangeRate],
    from: CurrencyCode,
    to: CurrencyCode,
    date: NaiveDate,
) -> Option<&'a ExchangeRate> {
    rates
        .iter()
        .filter(|r| r.from == from && r.to == to && r.date <= date)
        .max_by_key(|r| r.date)
}

#[async_trait]
impl ExchangeRateGateway for StaticExchangeRates {
    async fn exchange_rate(
        &self,
        date: NaiveDate,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<Decimal, ServiceError> {
        if from == to {
            return Ok(Decimal::ONE);
        }

        let rates = self.rates.read().await;

        if let Some(direct) = latest(&rates, from, to, date) {
            debug!(%from, %to, %date, rate = %direct.rate, "Direct exchange rate");
            return Ok(direct.rate);
        }

        if let Some(opposite) = latest(&rates, to, from, date) {
            let inverse = opposite.inverse()?;
            debug!(%from, %to, %date, rate = %inverse.rate, "Inverse exchange rate");
            return Ok(inverse.rate);
        }

        Err(ServiceError::ExchangeRateNotFound { from, to, date })
    }
}
