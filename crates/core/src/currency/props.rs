//! Property-based tests for currency conversion.

use kassabok_shared::types::CurrencyCode;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::conversion::to_local_amount;
use super::value::{Currency, CurrencyOption};

/// Amounts in minor units, up to 10 million whole units either way.
fn amount() -> impl Strategy<Value = i64> {
    -1_000_000_000i64..1_000_000_000i64
}

/// Amounts far outside the 64-bit range.
fn huge_amount() -> impl Strategy<Value = BigInt> {
    (any::<i64>(), 0u32..40)
        .prop_map(|(base, shift)| BigInt::from(base) * BigInt::from(10u32).pow(shift + 10))
}

/// Rates from 0.0001 to 10000.0000.
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Negating the amount negates the converted amount.
    #[test]
    fn prop_conversion_is_symmetric(amount in huge_amount(), rate in positive_rate()) {
        let positive = to_local_amount(&amount, rate);
        let negative = to_local_amount(&-amount, rate);
        prop_assert_eq!(positive, -negative);
    }

    /// A rate of one is the identity.
    #[test]
    fn prop_unit_rate_is_identity(amount in huge_amount()) {
        prop_assert_eq!(to_local_amount(&amount, Decimal::ONE), amount);
    }

    /// Rounding moves the result by at most half a minor unit.
    #[test]
    fn prop_rounding_error_at_most_half(amount in amount(), rate in positive_rate()) {
        let exact = Decimal::from(amount) * rate;
        let rounded = to_local_amount(&BigInt::from(amount), rate);
        let rounded = Decimal::from_str_exact(&rounded.to_string()).unwrap();
        prop_assert!((exact - rounded).abs() <= Decimal::new(5, 1));
    }

    /// Balanced foreign lines stay balanced in the local currency.
    #[test]
    fn prop_balanced_lines_stay_balanced(amount in huge_amount(), rate in positive_rate()) {
        let debit = Currency::foreign(amount.clone(), CurrencyCode::Usd, CurrencyCode::Sek, rate);
        let credit = Currency::foreign(-amount, CurrencyCode::Usd, CurrencyCode::Sek, rate);
        prop_assert!((debit.local_amount() + credit.local_amount()).is_zero());
    }

    /// Conversion never changes the sign.
    #[test]
    fn prop_conversion_keeps_sign(amount in huge_amount(), rate in positive_rate()) {
        let converted = to_local_amount(&amount, rate);
        prop_assert!(!converted.is_negative() || amount.is_negative());
    }

    /// Rebuilding from the raw fields gives an identical value.
    #[test]
    fn prop_option_round_trip(amount in huge_amount(), rate in positive_rate()) {
        let currency = Currency::foreign(amount, CurrencyCode::Eur, CurrencyCode::Sek, rate);
        let rebuilt = Currency::new(CurrencyOption::from(currency.clone()));
        prop_assert_eq!(rebuilt, currency);
    }
}
