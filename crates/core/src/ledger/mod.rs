//! Double-entry bookkeeping logic.
//!
//! This module implements the verification side of the ledger:
//! - Transactions (ledger lines) and the verification aggregate
//! - The verification validator and its duplicate-detection projection
//! - Ports for the collaborators the service consumes
//! - The verification service

pub mod comparable;
pub mod ports;
pub mod service;
pub mod transaction;
pub mod types;
pub mod verification;

#[cfg(test)]
mod validation_props;

pub use comparable::{Comparable, ComparableAmount};
pub use ports::{
    ExchangeRateGateway, FiscalYearRepository, LocalCurrencyLookup, VerificationRepository,
};
pub use service::{SaveOutcome, VerificationService};
pub use transaction::{Transaction, TransactionOption};
pub use types::{CustomTransactionInput, CustomTransactionLine, CustomVerification, VerificationType};
pub use verification::{Verification, VerificationOption};
