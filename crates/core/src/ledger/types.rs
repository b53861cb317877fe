//! Ledger domain types for verification creation.

use kassabok_shared::types::{CurrencyCode, Id};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Verification type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationType {
    /// Supplier invoice received.
    InvoiceIn,
    /// Payment of a supplier invoice.
    InvoiceInPayment,
    /// Customer invoice sent.
    InvoiceOut,
    /// Payment received for a customer invoice.
    InvoiceOutPayment,
    /// Direct incoming payment without an invoice.
    PaymentDirectIn,
    /// Direct outgoing payment without an invoice.
    PaymentDirectOut,
    /// Manual transaction.
    Transaction,
    /// Unknown or unparseable type.
    #[default]
    Invalid,
}

impl VerificationType {
    /// Every known type, `Invalid` last.
    pub const ALL: [Self; 8] = [
        Self::InvoiceIn,
        Self::InvoiceInPayment,
        Self::InvoiceOut,
        Self::InvoiceOutPayment,
        Self::PaymentDirectIn,
        Self::PaymentDirectOut,
        Self::Transaction,
        Self::Invalid,
    ];

    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvoiceIn => "INVOICE_IN",
            Self::InvoiceInPayment => "INVOICE_IN_PAYMENT",
            Self::InvoiceOut => "INVOICE_OUT",
            Self::InvoiceOutPayment => "INVOICE_OUT_PAYMENT",
            Self::PaymentDirectIn => "PAYMENT_DIRECT_IN",
            Self::PaymentDirectOut => "PAYMENT_DIRECT_OUT",
            Self::Transaction => "TRANSACTION",
            Self::Invalid => "INVALID",
        }
    }

    /// Parses a wire name. Unknown input maps to `Invalid`.
    #[must_use]
    pub fn from_str_lossy(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .unwrap_or(Self::Invalid)
    }
}

impl std::fmt::Display for VerificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for VerificationType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str_lossy(&value))
    }
}

/// One line of a manually entered verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTransactionLine {
    /// Account number.
    pub account_number: u32,
    /// Signed amount in whole units (e.g. `-12.50`).
    pub amount: Decimal,
    /// Currency of the amount.
    pub currency_code: CurrencyCode,
}

/// Manually entered verification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomVerification {
    /// Display name.
    pub name: String,
    /// Accounting date, `YYYY-MM-DD`.
    pub date: String,
    /// Free text.
    #[serde(default)]
    pub description: Option<String>,
    /// Attached file references.
    #[serde(default)]
    pub files: Vec<String>,
    /// Lines.
    #[serde(default)]
    pub transactions: Vec<CustomTransactionLine>,
}

/// Input for creating a verification from manual lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTransactionInput {
    /// Owner of the verification.
    pub user_id: Id,
    /// Verification content.
    pub verification: CustomVerification,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lossy_parse() {
        assert_eq!(
            VerificationType::from_str_lossy("INVOICE_IN_PAYMENT"),
            VerificationType::InvoiceInPayment
        );
        assert_eq!(
            VerificationType::from_str_lossy("TRANSACTION"),
            VerificationType::Transaction
        );
        assert_eq!(
            VerificationType::from_str_lossy("transaction"),
            VerificationType::Invalid
        );
        assert_eq!(VerificationType::from_str_lossy(""), VerificationType::Invalid);
    }

    #[test]
    fn test_wire_names_round_trip() {
        for kind in VerificationType::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            let back: VerificationType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn test_unknown_deserializes_to_invalid() {
        let kind: VerificationType = serde_json::from_str("\"REFUND\"").unwrap();
        assert_eq!(kind, VerificationType::Invalid);
    }

    #[test]
    fn test_custom_input_json() {
        let input: CustomTransactionInput = serde_json::from_str(
            r#"{
                "userId": 1,
                "verification": {
                    "name": "Bank fee",
                    "date": "2020-03-15",
                    "transactions": [
                        {"accountNumber": 6570, "amount": "25", "currencyCode": "SEK"},
                        {"accountNumber": 1930, "amount": "-25", "currencyCode": "sek"}
                    ]
                }
            }"#,
        )
        .unwrap();
        assert_eq!(input.user_id, Id::Number(1));
        assert_eq!(input.verification.transactions.len(), 2);
        assert_eq!(
            input.verification.transactions[1].currency_code,
            CurrencyCode::Sek
        );
        assert!(input.verification.files.is_empty());
    }
}
