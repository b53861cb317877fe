//! Exchange rate types and logic.

use chrono::NaiveDate;
use kassabok_shared::types::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::CurrencyError;

/// Exchange rate between two currencies on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    /// Source currency.
    pub from: CurrencyCode,
    /// Target currency.
    pub to: CurrencyCode,
    /// 1 `from` = `rate` `to`.
    pub rate: Decimal,
    /// Day the rate applies to.
    pub date: NaiveDate,
}

impl ExchangeRate {
    /// Creates a new exchange rate.
    #[must_use]
    pub const fn new(from: CurrencyCode, to: CurrencyCode, rate: Decimal, date: NaiveDate) -> Self {
        Self {
            from,
            to,
            rate,
            date,
        }
    }

    /// Returns the inverse rate.
    ///
    /// # Errors
    ///
    /// Returns `RateNotInvertible` for a zero rate.
    pub fn inverse(&self) -> Result<Self, CurrencyError> {
        let rate = Decimal::ONE
            .checked_div(self.rate)
            .ok_or(CurrencyError::RateNotInvertible(self.rate))?;
        Ok(Self::new(self.to, self.from, rate, self.date))
    }
}
