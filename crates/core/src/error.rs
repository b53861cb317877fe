//! Error types for validation and collaborator failures.
//!
//! The two channels are disjoint: `ValidationError` values are returned as data by the
//! `validate` methods and never raised, while `ServiceError` is what collaborators and
//! services fail with.

use chrono::NaiveDate;
use kassabok_shared::types::{CurrencyCode, Id, UnknownCurrencyCode};
use kassabok_shared::AppError;
use num_bigint::BigInt;
use thiserror::Error;

use crate::currency::CurrencyError;

/// A single failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    // ========== Entity Errors ==========
    /// Id is present but empty.
    #[error("Id is empty")]
    IdIsEmpty,

    /// Creation date is before the earliest accepted date.
    #[error("Date created is too early")]
    DateCreatedTooEarly,

    /// Creation date lies in the future.
    #[error("Date created is in the future")]
    DateCreatedInTheFuture,

    /// Modification date lies in the future.
    #[error("Date modified is in the future")]
    DateModifiedInTheFuture,

    /// Modification date is before the creation date.
    #[error("Date modified is before date created")]
    DateModifiedBeforeCreated,

    /// Deletion date differs from the modification date.
    #[error("Date deleted is not the same as date modified")]
    DateDeletedNotSameAsModified,

    // ========== Content Errors ==========
    /// Verification has no owner.
    #[error("User id is missing")]
    UserIdMissing,

    /// Name is shorter than the minimum length.
    #[error("Name is too short: {0}")]
    NameTooShort(String),

    /// Internal name is shorter than the minimum length.
    #[error("Internal name is too short: {0}")]
    InternalNameTooShort(String),

    /// Date is not a valid YYYY-MM-DD calendar date.
    #[error("Invalid date format: {0}")]
    DateFormatInvalid(String),

    /// Transaction amount is zero.
    #[error("Amount is zero")]
    AmountIsZero,

    /// Account number is outside every configured account class.
    #[error("Invalid account number: {0}")]
    AccountNumberInvalid(u32),

    /// Exactly one of local amount and local code is present.
    #[error("Local amount and local currency code must both be set or both be absent")]
    CurrencyLocalFieldsIncomplete,

    /// Exchange rate is zero or negative.
    #[error("Exchange rate must be positive: {0}")]
    ExchangeRateInvalid(String),

    // ========== Cross-field Errors ==========
    /// Verification number is below 1.
    #[error("Verification number must be at least 1: {0}")]
    VerificationNumberInvalid(i64),

    /// Verification number is set without a filing date.
    #[error("Verification number is set but date filed is missing")]
    VerificationDateFiledMissing,

    /// Filing date is set without a verification number.
    #[error("Date filed is set but verification number is missing")]
    VerificationNumberMissing,

    /// Filing date is before the creation date.
    #[error("Date filed is before date created")]
    VerificationDateFiledBeforeCreated,

    /// Payment id is supplied but empty.
    #[error("Payment id is empty")]
    VerificationPaymentIdIsEmpty,

    /// Invoice id is supplied but empty.
    #[error("Invoice id is empty")]
    VerificationInvoiceIdIsEmpty,

    /// Fiscal year id is supplied but empty.
    #[error("Fiscal year id is empty")]
    VerificationFiscalYearIdIsEmpty,

    // ========== Aggregate Errors ==========
    /// Total amount matches no active transaction.
    #[error("Total amount does not match any transaction")]
    VerificationAmountDoesNotMatchAnyTransaction,

    /// Verification has no transactions.
    #[error("Transactions are missing")]
    TransactionsMissing,

    /// Active transactions resolve to different local currencies.
    #[error("Transactions have different local currency codes")]
    TransactionsCurrencyCodeLocalMismatch,

    /// Local amounts of the active transactions do not net to zero.
    #[error("Transaction sum is not zero: {0}")]
    TransactionSumIsNotZero(BigInt),

    // ========== Fiscal Errors ==========
    /// Fiscal year ends before it starts.
    #[error("Fiscal year range is invalid: {from} to {to}")]
    FiscalYearRangeInvalid {
        /// First day of the fiscal year.
        from: NaiveDate,
        /// Last day of the fiscal year.
        to: NaiveDate,
    },
}

impl ValidationError {
    /// Returns the stable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::IdIsEmpty => "id-is-empty",
            Self::DateCreatedTooEarly => "date-created-too-early",
            Self::DateCreatedInTheFuture => "date-created-in-the-future",
            Self::DateModifiedInTheFuture => "date-modified-in-the-future",
            Self::DateModifiedBeforeCreated => "date-modified-before-created",
            Self::DateDeletedNotSameAsModified => "date-deleted-not-same-as-modified",
            Self::UserIdMissing => "user-id-missing",
            Self::NameTooShort(_) => "name-too-short",
            Self::InternalNameTooShort(_) => "internal-name-too-short",
            Self::DateFormatInvalid(_) => "verification-date-invalid-format",
            Self::AmountIsZero => "amount-is-zero",
            Self::AccountNumberInvalid(_) => "account-number-invalid",
            Self::CurrencyLocalFieldsIncomplete => "currency-local-fields-incomplete",
            Self::ExchangeRateInvalid(_) => "exchange-rate-invalid",
            Self::VerificationNumberInvalid(_) => "verification-number-invalid",
            Self::VerificationDateFiledMissing => "verification-date-filed-missing",
            Self::VerificationNumberMissing => "verification-number-missing",
            Self::VerificationDateFiledBeforeCreated => "verification-date-filed-before-created",
            Self::VerificationPaymentIdIsEmpty => "verification-payment-id-is-empty",
            Self::VerificationInvoiceIdIsEmpty => "verification-invoice-id-is-empty",
            Self::VerificationFiscalYearIdIsEmpty => "verification-fiscal-year-id-is-empty",
            Self::VerificationAmountDoesNotMatchAnyTransaction => {
                "verification-amount-does-not-match-any-transaction"
            }
            Self::TransactionsMissing => "transactions-missing",
            Self::TransactionsCurrencyCodeLocalMismatch => {
                "transactions-currency-code-local-mismatch"
            }
            Self::TransactionSumIsNotZero(_) => "transaction-sum-is-not-zero",
            Self::FiscalYearRangeInvalid { .. } => "fiscal-year-range-invalid",
        }
    }

    /// Returns the data attached to the error, if any.
    #[must_use]
    pub fn data(&self) -> Option<String> {
        match self {
            Self::NameTooShort(value)
            | Self::InternalNameTooShort(value)
            | Self::DateFormatInvalid(value)
            | Self::ExchangeRateInvalid(value) => Some(value.clone()),
            Self::AccountNumberInvalid(number) => Some(number.to_string()),
            Self::VerificationNumberInvalid(number) => Some(number.to_string()),
            Self::TransactionSumIsNotZero(sum) => Some(sum.to_string()),
            Self::FiscalYearRangeInvalid { from, to } => Some(format!("{from}..{to}")),
            _ => None,
        }
    }
}

/// Errors raised by services and their collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Input failed validation.
    #[error("Invalid input: {}", codes(.0))]
    InvalidInput(Vec<ValidationError>),

    /// A verification with the same content already exists.
    #[error("Verification already exists: {0}")]
    Duplicate(Id),

    /// User not found.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Verification not found.
    #[error("Verification not found: {0}")]
    VerificationNotFound(String),

    /// No fiscal year contains the date.
    #[error("No fiscal year found for date {0}")]
    FiscalYearNotFound(String),

    /// Date could not be parsed.
    #[error("Invalid date format: {0}")]
    DateFormatInvalid(String),

    /// Currency code is not supported.
    #[error("Invalid currency code: {0}")]
    CurrencyCodeInvalid(String),

    /// No exchange rate for the currency pair on the date.
    #[error("No exchange rate found for {from} to {to} on {date}")]
    ExchangeRateNotFound {
        /// Source currency.
        from: CurrencyCode,
        /// Target currency.
        to: CurrencyCode,
        /// Date of the lookup.
        date: NaiveDate,
    },

    /// Currency arithmetic failed.
    #[error(transparent)]
    Currency(#[from] CurrencyError),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

fn codes(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::code)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ServiceError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid-input",
            Self::Duplicate(_) => "verification-duplicate",
            Self::UserNotFound(_) => "user-not-found",
            Self::VerificationNotFound(_) => "verification-not-found",
            Self::FiscalYearNotFound(_) => "fiscal-year-not-found",
            Self::DateFormatInvalid(_) => "verification-date-invalid-format",
            Self::CurrencyCodeInvalid(_) => "currency-code-invalid",
            Self::ExchangeRateNotFound { .. } => "exchange-rate-not-found",
            Self::Currency(_) => "currency-error",
            Self::Internal(_) => "internal-error",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_)
            | Self::DateFormatInvalid(_)
            | Self::CurrencyCodeInvalid(_)
            | Self::ExchangeRateNotFound { .. }
            | Self::Currency(_) => 400,
            Self::UserNotFound(_) | Self::VerificationNotFound(_) | Self::FiscalYearNotFound(_) => {
                404
            }
            Self::Duplicate(_) => 409,
            Self::Internal(_) => 500,
        }
    }

    /// Returns the validation errors carried by `InvalidInput`.
    #[must_use]
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidInput(errors) => errors,
            _ => &[],
        }
    }
}

impl From<UnknownCurrencyCode> for ServiceError {
    fn from(err: UnknownCurrencyCode) -> Self {
        Self::CurrencyCodeInvalid(err.0)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(_)
            | ServiceError::DateFormatInvalid(_)
            | ServiceError::CurrencyCodeInvalid(_)
            | ServiceError::ExchangeRateNotFound { .. }
            | ServiceError::Currency(_) => Self::Validation(err.to_string()),
            ServiceError::Duplicate(_) => Self::Conflict(err.to_string()),
            ServiceError::UserNotFound(_)
            | ServiceError::VerificationNotFound(_)
            | ServiceError::FiscalYearNotFound(_) => Self::NotFound(err.to_string()),
            ServiceError::Internal(message) => Self::Internal(message),
        }
    }
}
