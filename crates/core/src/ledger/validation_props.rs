//! Property-based tests for verification validation rules.

use chrono::{DateTime, TimeZone, Utc};
use kassabok_shared::types::{CurrencyCode, Id};
use num_bigint::BigInt;
use num_traits::Zero;
use proptest::prelude::*;

use super::transaction::Transaction;
use super::types::VerificationType;
use super::verification::Verification;
use crate::currency::Currency;
use crate::error::ValidationError;
use crate::validation::ValidationContext;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn ctx() -> ValidationContext {
    ValidationContext::at(now())
}

/// Non-zero amounts in minor units.
fn non_zero_amount() -> impl Strategy<Value = i64> {
    prop_oneof![-100_000_000i64..-1, 1i64..100_000_000]
}

/// Valid BAS account numbers.
fn account_number() -> impl Strategy<Value = u32> {
    1000u32..=8999
}

/// Debit lines plus one balancing credit line.
fn balanced_lines() -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec((account_number(), 1i64..10_000_000), 1..6).prop_flat_map(|debits| {
        account_number().prop_map(move |credit_account| {
            let total: i64 = debits.iter().map(|(_, amount)| amount).sum();
            let mut lines: Vec<Transaction> = debits
                .iter()
                .map(|(account, amount)| {
                    Transaction::new(*account, Currency::local(*amount, CurrencyCode::Sek))
                })
                .collect();
            lines.push(Transaction::new(
                credit_account,
                Currency::local(-total, CurrencyCode::Sek),
            ));
            lines
        })
    })
}

fn verification(transactions: Vec<Transaction>) -> Verification {
    Verification {
        user_id: Some(Id::from(1)),
        name: "Generated".to_string(),
        date: "2020-01-01".to_string(),
        verification_type: VerificationType::Transaction,
        transactions,
        ..Verification::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A valid verification always nets to zero in the local currency.
    #[test]
    fn prop_valid_implies_zero_sum(lines in balanced_lines()) {
        let v = verification(lines);
        prop_assert!(v.validate(&ctx()).is_empty());
        prop_assert!(v.local_sum().is_zero());
    }

    /// Shifting one line by a non-zero amount reports exactly that difference.
    #[test]
    fn prop_unbalanced_reports_difference(
        lines in balanced_lines(),
        shift in non_zero_amount(),
    ) {
        let mut lines = lines;
        let first = lines.remove(0);
        let amount = first.currency.amount() + shift;
        prop_assume!(!amount.is_zero());
        lines.insert(0, Transaction::new(first.account_number, Currency::local(amount, CurrencyCode::Sek)));

        let errors = verification(lines).validate(&ctx());
        prop_assert_eq!(errors, vec![ValidationError::TransactionSumIsNotZero(BigInt::from(shift))]);
    }

    /// A zero-amount line always reports `AmountIsZero`.
    #[test]
    fn prop_zero_amount_always_reported(
        lines in balanced_lines(),
        account in account_number(),
    ) {
        let mut lines = lines;
        lines.push(Transaction::new(account, Currency::local(0, CurrencyCode::Sek)));
        let errors = verification(lines).validate(&ctx());
        prop_assert!(errors.contains(&ValidationError::AmountIsZero));
    }

    /// Deleted lines never affect the balance.
    #[test]
    fn prop_deleted_lines_ignored(
        lines in balanced_lines(),
        extra in non_zero_amount(),
        account in account_number(),
    ) {
        let mut lines = lines;
        lines.push(Transaction::new(account, Currency::local(extra, CurrencyCode::Sek)).deleted(now()));
        prop_assert!(verification(lines).validate(&ctx()).is_empty());
    }

    /// Fixing the one broken rule removes exactly its error.
    #[test]
    fn prop_removing_condition_removes_error(lines in balanced_lines()) {
        let broken = Verification {
            number: Some(1),
            ..verification(lines)
        };
        prop_assert_eq!(
            broken.validate(&ctx()),
            vec![ValidationError::VerificationDateFiledMissing]
        );

        let fixed = Verification {
            date_filed: Some(now()),
            ..broken
        };
        prop_assert!(fixed.validate(&ctx()).is_empty());
    }

    /// Comparable equality is reflexive and symmetric.
    #[test]
    fn prop_comparable_equality(
        lines in balanced_lines(),
        other_lines in balanced_lines(),
    ) {
        let a = verification(lines);
        let b = verification(other_lines);
        prop_assert!(a.comparable().is_equal_to(&a.comparable()));
        prop_assert_eq!(
            a.comparable().is_equal_to(&b.comparable()),
            b.comparable().is_equal_to(&a.comparable())
        );
        // Lines are not part of the projection.
        prop_assert!(a.comparable().is_equal_to(&b.comparable()));
    }

    /// Build, validate, export and rebuild yields the same verification.
    #[test]
    fn prop_option_round_trip(lines in balanced_lines()) {
        let v = verification(lines).with_id(Id::from(42));
        prop_assert!(v.validate(&ctx()).is_empty());
        prop_assert_eq!(Verification::from(v.to_option()), v);
    }
}
