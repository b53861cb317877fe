//! Currency conversion logic.
//!
//! Amounts are arbitrary-precision integer minor units. A rate is applied as its
//! integer mantissa followed by a division by its power-of-ten scale, so no step can
//! overflow or lose precision. Results are rounded half away from zero so that a debit
//! and its opposing credit convert to exact negatives of each other.

use num_bigint::BigInt;
use num_traits::Signed;
use rust_decimal::Decimal;

/// Minor units per whole unit.
pub const MINOR_UNITS: u32 = 100;

/// Converts an amount in minor units with the given exchange rate.
#[must_use]
pub fn to_local_amount(amount: &BigInt, rate: Decimal) -> BigInt {
    round_scaled(amount * BigInt::from(rate.mantissa()), rate.scale())
}

/// Scales a whole-unit amount (e.g. `12.5` SEK) to minor units (`1250`).
#[must_use]
pub fn to_minor_units(amount: Decimal) -> BigInt {
    round_scaled(BigInt::from(amount.mantissa()) * MINOR_UNITS, amount.scale())
}

/// Divides by `10^scale`, rounding half away from zero.
fn round_scaled(value: BigInt, scale: u32) -> BigInt {
    if scale == 0 {
        return value;
    }

    let divisor = BigInt::from(10u32).pow(scale);
    let quotient = &value / &divisor;
    let remainder = &value % &divisor;
    if remainder.abs() * 2u32 >= divisor {
        quotient + value.signum()
    } else {
        quotient
    }
}
