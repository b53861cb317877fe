//! One ledger line of a verification.

use chrono::{DateTime, Utc};
use kassabok_shared::types::{CurrencyCode, Id};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::currency::{Currency, CurrencyOption};
use crate::entity::{Entity, EntityMeta};
use crate::error::ValidationError;
use crate::validation::ValidationContext;

/// Raw fields of a [`Transaction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOption {
    /// Id and timestamps.
    #[serde(flatten)]
    pub entity: EntityMeta,
    /// Owning verification, bound on first save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_id: Option<Id>,
    /// Account number.
    #[serde(default)]
    pub account_number: u32,
    /// Amount.
    pub currency: CurrencyOption,
}

/// Ledger line: an amount posted to one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TransactionOption", into = "TransactionOption")]
pub struct Transaction {
    /// Id and timestamps.
    pub entity: EntityMeta,
    /// Owning verification.
    pub verification_id: Option<Id>,
    /// Account number.
    pub account_number: u32,
    /// Amount.
    pub currency: Currency,
}

impl Transaction {
    /// New unsaved line.
    #[must_use]
    pub fn new(account_number: u32, currency: Currency) -> Self {
        Self {
            entity: EntityMeta::default(),
            verification_id: None,
            account_number,
            currency,
        }
    }

    /// Amount in the local currency.
    #[must_use]
    pub fn local_amount(&self) -> &BigInt {
        self.currency.local_amount()
    }

    /// Resolved local currency.
    #[must_use]
    pub fn local_code(&self) -> CurrencyCode {
        self.currency.local_code()
    }

    /// Returns a copy stamped as logically deleted at `now`.
    #[must_use]
    pub fn deleted(self, now: DateTime<Utc>) -> Self {
        Self {
            entity: self.entity.deleted(now),
            ..self
        }
    }

    /// Entity checks, then currency, account and amount checks.
    #[must_use]
    pub fn validate(&self, ctx: &ValidationContext) -> Vec<ValidationError> {
        let mut errors = self.entity.validate(ctx);
        errors.extend(self.currency.validate());

        if let Err(err) = ctx.accounts.validate_number(self.account_number) {
            errors.push(err);
        }

        if self.currency.is_zero() {
            errors.push(ValidationError::AmountIsZero);
        }

        errors
    }

    /// Returns the raw fields.
    #[must_use]
    pub fn to_option(&self) -> TransactionOption {
        TransactionOption::from(self.clone())
    }
}

impl Entity for Transaction {
    fn meta(&self) -> &EntityMeta {
        &self.entity
    }
}

impl From<TransactionOption> for Transaction {
    fn from(option: TransactionOption) -> Self {
        Self {
            entity: option.entity,
            verification_id: option.verification_id,
            account_number: option.account_number,
            currency: Currency::new(option.currency),
        }
    }
}

impl From<Transaction> for TransactionOption {
    fn from(transaction: Transaction) -> Self {
        Self {
            entity: transaction.entity,
            verification_id: transaction.verification_id,
            account_number: transaction.account_number,
            currency: transaction.currency.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn ctx() -> ValidationContext {
        ValidationContext::at(now())
    }

    #[test]
    fn test_valid_line() {
        let line = Transaction::new(1930, Currency::local(-10_000, CurrencyCode::Sek));
        assert!(line.validate(&ctx()).is_empty());
        assert!(!line.is_deleted());
    }

    #[test]
    fn test_zero_amount() {
        let line = Transaction::new(1930, Currency::local(0, CurrencyCode::Sek));
        assert_eq!(line.validate(&ctx()), vec![ValidationError::AmountIsZero]);
    }

    #[test]
    fn test_error_order() {
        let mut line = Transaction::new(
            999,
            Currency::new(CurrencyOption {
                amount: BigInt::from(0),
                code: CurrencyCode::Usd,
                local_amount: None,
                local_code: Some(CurrencyCode::Sek),
                exchange_rate: None,
            }),
        );
        line.entity.id = Some(Id::from(""));
        assert_eq!(
            line.validate(&ctx()),
            vec![
                ValidationError::IdIsEmpty,
                ValidationError::CurrencyLocalFieldsIncomplete,
                ValidationError::AccountNumberInvalid(999),
                ValidationError::AmountIsZero,
            ]
        );
    }

    #[test]
    fn test_deleted() {
        let line = Transaction::new(2020, Currency::local(100, CurrencyCode::Sek)).deleted(now());
        assert!(line.is_deleted());
        assert_eq!(line.entity.date_modified, Some(now()));
        assert!(line.validate(&ctx()).is_empty());
    }

    #[test]
    fn test_foreign_local_amount() {
        let line = Transaction::new(
            1930,
            Currency::foreign(-5_000, CurrencyCode::Eur, CurrencyCode::Sek, dec!(10.4)),
        );
        assert_eq!(line.local_amount(), &BigInt::from(-52_000));
        assert_eq!(line.local_code(), CurrencyCode::Sek);
    }

    #[test]
    fn test_json_round_trip() {
        let mut line = Transaction::new(
            4010,
            Currency::foreign(1_999, CurrencyCode::Usd, CurrencyCode::Sek, dec!(9.5)),
        );
        line.entity.id = Some(Id::from(12));
        line.entity.date_created = Some(now());
        line.verification_id = Some(Id::from("v-1"));

        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["accountNumber"], 4010);
        assert_eq!(json["verificationId"], "v-1");
        assert_eq!(json["currency"]["localAmount"], 18_991);

        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, line);
    }
}
