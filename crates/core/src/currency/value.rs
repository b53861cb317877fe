//! Monetary value with optional conversion into the owner's local currency.

use kassabok_shared::types::CurrencyCode;
use num_bigint::BigInt;
use num_traits::Zero;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount;
use super::conversion::to_local_amount;
use crate::error::ValidationError;

/// Raw fields of a [`Currency`], as stored and transmitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyOption {
    /// Amount in minor units.
    #[serde(with = "amount")]
    pub amount: BigInt,
    /// Currency of `amount`.
    pub code: CurrencyCode,
    /// Amount in minor units of `local_code`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "amount::option"
    )]
    pub local_amount: Option<BigInt>,
    /// Owner's local currency, when it differs from `code`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_code: Option<CurrencyCode>,
    /// 1 `code` = `exchange_rate` `local_code`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Decimal>,
}

/// Immutable monetary value.
///
/// The local amount is derived once at construction when a local code and a rate are
/// given without an explicit local amount, so a serialized value rebuilds identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "CurrencyOption", into = "CurrencyOption")]
pub struct Currency {
    amount: BigInt,
    code: CurrencyCode,
    local_amount: Option<BigInt>,
    local_code: Option<CurrencyCode>,
    exchange_rate: Option<Decimal>,
}

impl Currency {
    /// Builds a value from raw fields. Never fails; see [`Currency::validate`].
    #[must_use]
    pub fn new(option: CurrencyOption) -> Self {
        let local_amount = match (option.local_amount, option.local_code, option.exchange_rate) {
            (Some(local_amount), _, _) => Some(local_amount),
            (None, Some(_), Some(rate)) => Some(to_local_amount(&option.amount, rate)),
            (None, _, _) => None,
        };

        Self {
            amount: option.amount,
            code: option.code,
            local_amount,
            local_code: option.local_code,
            exchange_rate: option.exchange_rate,
        }
    }

    /// Amount already in the local currency.
    #[must_use]
    pub fn local(amount: impl Into<BigInt>, code: CurrencyCode) -> Self {
        Self {
            amount: amount.into(),
            code,
            local_amount: None,
            local_code: None,
            exchange_rate: None,
        }
    }

    /// Foreign amount converted into `local_code` at `rate`.
    #[must_use]
    pub fn foreign(
        amount: impl Into<BigInt>,
        code: CurrencyCode,
        local_code: CurrencyCode,
        rate: Decimal,
    ) -> Self {
        Self::new(CurrencyOption {
            amount: amount.into(),
            code,
            local_amount: None,
            local_code: Some(local_code),
            exchange_rate: Some(rate),
        })
    }

    /// Amount in minor units.
    #[must_use]
    pub const fn amount(&self) -> &BigInt {
        &self.amount
    }

    /// Currency of the amount.
    #[must_use]
    pub const fn code(&self) -> CurrencyCode {
        self.code
    }

    /// Exchange rate into the local currency, if any.
    #[must_use]
    pub const fn exchange_rate(&self) -> Option<Decimal> {
        self.exchange_rate
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Amount in the local currency.
    #[must_use]
    pub fn local_amount(&self) -> &BigInt {
        self.local_amount.as_ref().unwrap_or(&self.amount)
    }

    /// Local currency, falling back to the amount's own currency.
    #[must_use]
    pub fn local_code(&self) -> CurrencyCode {
        self.local_code.unwrap_or(self.code)
    }

    /// Returns true if amount and code are equal, ignoring local fields.
    #[must_use]
    pub fn same_amount_as(&self, other: &Self) -> bool {
        self.amount == other.amount && self.code == other.code
    }

    /// Checks that the local fields are consistent.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.local_amount.is_some() != self.local_code.is_some() {
            errors.push(ValidationError::CurrencyLocalFieldsIncomplete);
        }

        if let Some(rate) = self.exchange_rate
            && rate <= Decimal::ZERO
        {
            errors.push(ValidationError::ExchangeRateInvalid(rate.to_string()));
        }

        errors
    }

    /// Returns the raw fields.
    #[must_use]
    pub fn to_option(&self) -> CurrencyOption {
        CurrencyOption::from(self.clone())
    }
}

impl From<CurrencyOption> for Currency {
    fn from(option: CurrencyOption) -> Self {
        Self::new(option)
    }
}

impl From<Currency> for CurrencyOption {
    fn from(currency: Currency) -> Self {
        Self {
            amount: currency.amount,
            code: currency.code,
            local_amount: currency.local_amount,
            local_code: currency.local_code,
            exchange_rate: currency.exchange_rate,
        }
    }
}
