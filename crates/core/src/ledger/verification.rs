//! The verification aggregate and its validator.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use kassabok_shared::types::Id;
use num_bigint::BigInt;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use super::comparable::Comparable;
use super::transaction::{Transaction, TransactionOption};
use super::types::VerificationType;
use crate::calendar::is_valid_date;
use crate::currency::{Currency, CurrencyOption};
use crate::entity::{Entity, EntityMeta};
use crate::error::ValidationError;
use crate::validation::ValidationContext;

/// Raw fields of a [`Verification`]. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationOption {
    /// Id and timestamps.
    #[serde(flatten)]
    pub entity: EntityMeta,
    /// Owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Id>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Name given by the source the verification was parsed from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_name: Option<String>,
    /// Accounting date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    /// Verification type.
    #[serde(default, rename = "type")]
    pub verification_type: VerificationType,
    /// Lines, in order.
    #[serde(default)]
    pub transactions: Vec<TransactionOption>,
    /// Total amount as stated by the source document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<CurrencyOption>,
    /// Sequence number within the fiscal year, assigned on filing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<i64>,
    /// Filing time.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub date_filed: Option<DateTime<Utc>>,
    /// Fiscal year the verification belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_year_id: Option<Id>,
    /// Linked invoice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<Id>,
    /// Linked payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<Id>,
    /// Free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Attached file references.
    #[serde(default)]
    pub files: Vec<String>,
    /// Whether a user must confirm the verification before filing.
    #[serde(default)]
    pub require_confirmation: bool,
}

/// A ledger voucher: ordered, balanced lines plus metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "VerificationOption", into = "VerificationOption")]
pub struct Verification {
    /// Id and timestamps.
    pub entity: EntityMeta,
    /// Owner.
    pub user_id: Option<Id>,
    /// Display name.
    pub name: String,
    /// Name given by the source document.
    pub internal_name: Option<String>,
    /// Accounting date, `YYYY-MM-DD`.
    pub date: String,
    /// Verification type.
    pub verification_type: VerificationType,
    /// Lines, in order.
    pub transactions: Vec<Transaction>,
    /// Total amount as stated by the source document.
    pub total_amount: Option<Currency>,
    /// Sequence number within the fiscal year.
    pub number: Option<i64>,
    /// Filing time.
    pub date_filed: Option<DateTime<Utc>>,
    /// Fiscal year.
    pub fiscal_year_id: Option<Id>,
    /// Linked invoice.
    pub invoice_id: Option<Id>,
    /// Linked payment.
    pub payment_id: Option<Id>,
    /// Free text.
    pub description: Option<String>,
    /// Attached file references.
    pub files: Vec<String>,
    /// Whether a user must confirm the verification before filing.
    pub require_confirmation: bool,
}

impl Verification {
    /// Lines that are not logically deleted.
    pub fn active_transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(|t| !t.is_deleted())
    }

    /// Sum of the local amounts of the active lines.
    #[must_use]
    pub fn local_sum(&self) -> BigInt {
        self.active_transactions().map(Transaction::local_amount).sum()
    }

    /// Runs every rule and returns all failures in a fixed order.
    #[must_use]
    pub fn validate(&self, ctx: &ValidationContext) -> Vec<ValidationError> {
        let mut errors = self.entity.validate(ctx);

        let min_length = ctx.rules.name_min_length;
        if self.name.chars().count() < min_length {
            errors.push(ValidationError::NameTooShort(self.name.clone()));
        }
        if let Some(internal_name) = &self.internal_name
            && internal_name.chars().count() < min_length
        {
            errors.push(ValidationError::InternalNameTooShort(internal_name.clone()));
        }

        self.validate_filing(&mut errors);

        if !is_valid_date(&self.date) {
            errors.push(ValidationError::DateFormatInvalid(self.date.clone()));
        }

        let empty = |id: &Option<Id>| id.as_ref().is_some_and(Id::is_empty);
        if empty(&self.payment_id) {
            errors.push(ValidationError::VerificationPaymentIdIsEmpty);
        }
        if empty(&self.invoice_id) {
            errors.push(ValidationError::VerificationInvoiceIdIsEmpty);
        }
        if empty(&self.fiscal_year_id) {
            errors.push(ValidationError::VerificationFiscalYearIdIsEmpty);
        }

        if let Some(total) = &self.total_amount
            && !self
                .active_transactions()
                .any(|t| t.currency.same_amount_as(total))
        {
            errors.push(ValidationError::VerificationAmountDoesNotMatchAnyTransaction);
        }

        self.validate_balance(&mut errors);

        for transaction in &self.transactions {
            errors.extend(transaction.validate(ctx));
        }

        errors
    }

    fn validate_filing(&self, errors: &mut Vec<ValidationError>) {
        if let Some(number) = self.number {
            if number < 1 {
                errors.push(ValidationError::VerificationNumberInvalid(number));
            }
            if self.date_filed.is_none() {
                errors.push(ValidationError::VerificationDateFiledMissing);
            }
        } else if self.date_filed.is_some() {
            errors.push(ValidationError::VerificationNumberMissing);
        }

        if let (Some(filed), Some(created)) = (self.date_filed, self.entity.date_created)
            && filed < created
        {
            errors.push(ValidationError::VerificationDateFiledBeforeCreated);
        }
    }

    fn validate_balance(&self, errors: &mut Vec<ValidationError>) {
        if self.transactions.is_empty() {
            errors.push(ValidationError::TransactionsMissing);
            return;
        }

        let codes: BTreeSet<_> = self.active_transactions().map(Transaction::local_code).collect();
        if codes.len() > 1 {
            errors.push(ValidationError::TransactionsCurrencyCodeLocalMismatch);
            return;
        }

        let sum = self.local_sum();
        if !sum.is_zero() {
            errors.push(ValidationError::TransactionSumIsNotZero(sum));
        }
    }

    /// Duplicate-detection snapshot.
    #[must_use]
    pub fn comparable(&self) -> Comparable {
        Comparable::of(self)
    }

    /// Returns a copy with the id set on the verification and all of its lines.
    #[must_use]
    pub fn with_id(self, id: Id) -> Self {
        let transactions = self
            .transactions
            .into_iter()
            .map(|t| Transaction {
                verification_id: Some(id.clone()),
                ..t
            })
            .collect();

        Self {
            entity: EntityMeta {
                id: Some(id),
                ..self.entity
            },
            transactions,
            ..self
        }
    }

    /// Returns the raw fields.
    #[must_use]
    pub fn to_option(&self) -> VerificationOption {
        VerificationOption::from(self.clone())
    }
}

impl Entity for Verification {
    fn meta(&self) -> &EntityMeta {
        &self.entity
    }
}

impl From<VerificationOption> for Verification {
    fn from(option: VerificationOption) -> Self {
        Self {
            entity: option.entity,
            user_id: option.user_id,
            name: option.name,
            internal_name: option.internal_name,
            date: option.date,
            verification_type: option.verification_type,
            transactions: option.transactions.into_iter().map(Transaction::from).collect(),
            total_amount: option.total_amount.map(Currency::new),
            number: option.number,
            date_filed: option.date_filed,
            fiscal_year_id: option.fiscal_year_id,
            invoice_id: option.invoice_id,
            payment_id: option.payment_id,
            description: option.description,
            files: option.files,
            require_confirmation: option.require_confirmation,
        }
    }
}

impl From<Verification> for VerificationOption {
    fn from(verification: Verification) -> Self {
        Self {
            entity: verification.entity,
            user_id: verification.user_id,
            name: verification.name,
            internal_name: verification.internal_name,
            date: verification.date,
            verification_type: verification.verification_type,
            transactions: verification
                .transactions
                .into_iter()
                .map(TransactionOption::from)
                .collect(),
            total_amount: verification.total_amount.map(CurrencyOption::from),
            number: verification.number,
            date_filed: verification.date_filed,
            fiscal_year_id: verification.fiscal_year_id,
            invoice_id: verification.invoice_id,
            payment_id: verification.payment_id,
            description: verification.description,
            files: verification.files,
            require_confirmation: verification.require_confirmation,
        }
    }
}
