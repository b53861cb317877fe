//! Duplicate-detection projection of a verification.

use kassabok_shared::types::{CurrencyCode, Id};
use num_bigint::BigInt;
use serde::Serialize;

use super::types::VerificationType;
use super::verification::Verification;

/// Amount and currency of a verification's stated total.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparableAmount {
    /// Amount in minor units.
    #[serde(serialize_with = "crate::currency::amount::serialize")]
    pub amount: BigInt,
    /// Currency.
    pub code: CurrencyCode,
}

/// The fields two verifications must share to count as the same voucher.
///
/// Lines and attached files are not part of the projection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparable {
    user_id: Option<Id>,
    date: String,
    #[serde(rename = "type")]
    verification_type: VerificationType,
    internal_name: Option<String>,
    total_amount: Option<ComparableAmount>,
    name: String,
}

impl Comparable {
    /// Projects a verification.
    #[must_use]
    pub fn of(verification: &Verification) -> Self {
        Self {
            user_id: verification.user_id.clone(),
            date: verification.date.clone(),
            verification_type: verification.verification_type,
            internal_name: verification.internal_name.clone(),
            total_amount: verification
                .total_amount
                .as_ref()
                .map(|total| ComparableAmount {
                    amount: total.amount().clone(),
                    code: total.code(),
                }),
            name: verification.name.clone(),
        }
    }

    /// Returns true if both projections are equal.
    #[must_use]
    pub fn is_equal_to(&self, other: &Self) -> bool {
        self == other
    }

    /// Owner.
    #[must_use]
    pub const fn user_id(&self) -> Option<&Id> {
        self.user_id.as_ref()
    }

    /// Accounting date.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }
}
