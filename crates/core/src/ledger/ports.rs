//! Collaborators the verification service depends on.

use async_trait::async_trait;
use chrono::NaiveDate;
use kassabok_shared::types::{CurrencyCode, Id};
use rust_decimal::Decimal;

use super::comparable::Comparable;
use super::verification::Verification;
use crate::error::ServiceError;
use crate::fiscal::FiscalYear;

/// Source of daily exchange rates.
#[async_trait]
pub trait ExchangeRateGateway: Send + Sync {
    /// Rate such that 1 `from` = rate `to` on `date`.
    ///
    /// # Errors
    ///
    /// Returns `ExchangeRateNotFound` when no rate is known.
    async fn exchange_rate(
        &self,
        date: NaiveDate,
        from: CurrencyCode,
        to: CurrencyCode,
    ) -> Result<Decimal, ServiceError>;
}

/// Resolves a user's local (reporting) currency.
#[async_trait]
pub trait LocalCurrencyLookup: Send + Sync {
    /// Returns the user's local currency.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` for unknown users.
    async fn local_currency(&self, user_id: &Id) -> Result<CurrencyCode, ServiceError>;
}

/// Verification storage.
#[async_trait]
pub trait VerificationRepository: Send + Sync {
    /// Stores a verification and returns its id.
    ///
    /// A verification that carries an id replaces the stored one with that id and
    /// owner. Otherwise it is inserted under a new id; the duplicate check and the
    /// insert are atomic.
    ///
    /// # Errors
    ///
    /// Returns `Duplicate` with the existing id when an equal verification was stored
    /// concurrently, and `VerificationNotFound` when updating an unknown id.
    async fn save(&self, verification: &Verification) -> Result<Id, ServiceError>;

    /// Finds a stored verification with the same projection, deleted ones included.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage fails.
    async fn find_duplicate(
        &self,
        comparable: &Comparable,
    ) -> Result<Option<Verification>, ServiceError>;

    /// Appends file references to a stored verification and returns it.
    ///
    /// # Errors
    ///
    /// Returns `VerificationNotFound` for unknown ids.
    async fn add_files(
        &self,
        user_id: &Id,
        id: &Id,
        files: &[String],
    ) -> Result<Verification, ServiceError>;

    /// All verifications of a user in one fiscal year.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage fails.
    async fn find_by_fiscal_year(
        &self,
        user_id: &Id,
        fiscal_year_id: &Id,
    ) -> Result<Vec<Verification>, ServiceError>;

    /// One verification of a user.
    ///
    /// # Errors
    ///
    /// Returns `VerificationNotFound` for unknown ids.
    async fn get(&self, user_id: &Id, id: &Id) -> Result<Verification, ServiceError>;
}

/// Fiscal year storage.
#[async_trait]
pub trait FiscalYearRepository: Send + Sync {
    /// The user's fiscal year containing a `YYYY-MM-DD` date.
    ///
    /// # Errors
    ///
    /// Returns `DateFormatInvalid` or `FiscalYearNotFound`.
    async fn fiscal_year_for(&self, user_id: &Id, date: &str) -> Result<FiscalYear, ServiceError>;

    /// All fiscal years of a user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage fails.
    async fn fiscal_years(&self, user_id: &Id) -> Result<Vec<FiscalYear>, ServiceError>;
}
