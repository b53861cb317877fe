//! Currency arithmetic errors.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors from currency arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// Rate cannot be inverted.
    #[error("Exchange rate {0} cannot be inverted")]
    RateNotInvertible(Decimal),
}
