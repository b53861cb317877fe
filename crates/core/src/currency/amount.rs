//! Serde support for arbitrary-precision amounts.
//!
//! Amounts are written as JSON integers when they fit in 64 bits and as strings of
//! digits otherwise. Both forms are accepted on input.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serializes an amount.
///
/// # Errors
///
/// Returns the serializer's error.
pub fn serialize<S: Serializer>(amount: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
    if let Some(value) = amount.to_i64() {
        serializer.serialize_i64(value)
    } else if let Some(value) = amount.to_u64() {
        serializer.serialize_u64(value)
    } else {
        serializer.collect_str(amount)
    }
}

/// Deserializes an amount from an integer or a string of digits.
///
/// # Errors
///
/// Returns an error for fractional numbers and malformed strings.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigInt, D::Error> {
    deserializer.deserialize_any(AmountVisitor)
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = BigInt;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer or a string of digits")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<BigInt, E> {
        Ok(BigInt::from(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<BigInt, E> {
        Ok(BigInt::from(value))
    }

    fn visit_i128<E: de::Error>(self, value: i128) -> Result<BigInt, E> {
        Ok(BigInt::from(value))
    }

    fn visit_u128<E: de::Error>(self, value: u128) -> Result<BigInt, E> {
        Ok(BigInt::from(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<BigInt, E> {
        BigInt::from_str(value).map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
    }
}

struct Borrowed<'a>(&'a BigInt);

impl Serialize for Borrowed<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize(self.0, serializer)
    }
}

struct Owned(BigInt);

impl<'de> Deserialize<'de> for Owned {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize(deserializer).map(Owned)
    }
}

/// Serde support for optional amounts.
pub mod option {
    use num_bigint::BigInt;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{Borrowed, Owned};

    /// Serializes an optional amount.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error.
    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        amount: &Option<BigInt>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match amount {
            Some(amount) => serializer.serialize_some(&Borrowed(amount)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional amount.
    ///
    /// # Errors
    ///
    /// Returns an error for fractional numbers and malformed strings.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<BigInt>, D::Error> {
        Ok(Option::<Owned>::deserialize(deserializer)?.map(|owned| owned.0))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Line {
        #[serde(with = "super")]
        amount: BigInt,
        #[serde(default, with = "super::option", skip_serializing_if = "Option::is_none")]
        local_amount: Option<BigInt>,
    }

    #[test]
    fn test_small_amounts_are_numbers() {
        let line = Line {
            amount: BigInt::from(-1_250),
            local_amount: Some(BigInt::from(u64::MAX)),
        };
        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value, json!({"amount": -1_250, "local_amount": u64::MAX}));
        assert_eq!(serde_json::from_value::<Line>(value).unwrap(), line);
    }

    #[test]
    fn test_large_amounts_are_strings() {
        let amount = BigInt::from_str("-123456789012345678901234567890").unwrap();
        let line = Line {
            amount: amount.clone(),
            local_amount: None,
        };
        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value, json!({"amount": "-123456789012345678901234567890"}));
        assert_eq!(serde_json::from_value::<Line>(value).unwrap().amount, amount);
    }

    #[test]
    fn test_rejects_fractions_and_garbage() {
        assert!(serde_json::from_str::<Line>(r#"{"amount": 1.5}"#).is_err());
        assert!(serde_json::from_str::<Line>(r#"{"amount": "12a"}"#).is_err());
    }

    #[test]
    fn test_missing_optional_amount() {
        let line: Line = serde_json::from_str(r#"{"amount": 10000000000000000000}"#).unwrap();
        assert_eq!(line.amount, BigInt::from(10_000_000_000_000_000_000_u64));
        assert_eq!(line.local_amount, None);
    }
}
