//! Fiscal year definition and date containment.

use chrono::{Datelike, NaiveDate};
use kassabok_shared::types::Id;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::calendar::parse_date;
use crate::error::{ServiceError, ValidationError};
use crate::validation::ValidationContext;

/// Opening balance of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartingBalance {
    /// Account number.
    pub account_number: u32,
    /// Balance in minor units of the local currency.
    #[serde(with = "crate::currency::amount")]
    pub amount: BigInt,
}

/// Fiscal year of one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiscalYear {
    /// Unique identifier.
    pub id: Id,
    /// Owner.
    pub user_id: Id,
    /// Short display name (e.g. "2020").
    pub simple_name: String,
    /// First day, inclusive.
    pub from: NaiveDate,
    /// Last day, inclusive.
    pub to: NaiveDate,
    /// Opening balances.
    #[serde(default)]
    pub starting_balances: Vec<StartingBalance>,
}

impl FiscalYear {
    /// Fiscal year spanning one calendar year.
    ///
    /// Returns `None` for years chrono cannot represent.
    #[must_use]
    pub fn calendar_year(id: impl Into<Id>, user_id: impl Into<Id>, year: i32) -> Option<Self> {
        Some(Self {
            id: id.into(),
            user_id: user_id.into(),
            simple_name: year.to_string(),
            from: NaiveDate::from_ymd_opt(year, 1, 1)?,
            to: NaiveDate::from_ymd_opt(year, 12, 31)?,
            starting_balances: Vec::new(),
        })
    }

    /// Returns true if the date falls within this fiscal year.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }

    /// Calendar year the fiscal year starts in.
    #[must_use]
    pub fn start_year(&self) -> i32 {
        self.from.year()
    }

    /// Checks the range and the starting balance accounts.
    #[must_use]
    pub fn validate(&self, ctx: &ValidationContext) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.from > self.to {
            errors.push(ValidationError::FiscalYearRangeInvalid {
                from: self.from,
                to: self.to,
            });
        }

        errors.extend(
            self.starting_balances
                .iter()
                .filter_map(|balance| ctx.accounts.validate_number(balance.account_number).err()),
        );

        errors
    }
}

/// Finds the fiscal year containing a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `DateFormatInvalid` for a malformed date and `FiscalYearNotFound` when no
/// fiscal year contains it.
pub fn find_containing<'a>(
    years: impl IntoIterator<Item = &'a FiscalYear>,
    date: &str,
) -> Result<&'a FiscalYear, ServiceError> {
    let day = parse_date(date).ok_or_else(|| ServiceError::DateFormatInvalid(date.to_string()))?;
    years
        .into_iter()
        .find(|year| year.contains(day))
        .ok_or_else(|| ServiceError::FiscalYearNotFound(date.to_string()))
}
