//! Core bookkeeping logic for Kassabok.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Entities validate themselves against an explicit [`ValidationContext`], and every
//! lookup the services need goes through the async ports in [`ledger::ports`].
//!
//! # Modules
//!
//! - `entity` - Ids and lifecycle timestamps
//! - `currency` - Monetary values and conversion into the local currency
//! - `account` - Account number checks against the chart of accounts
//! - `ledger` - Transactions, verifications and the verification service
//! - `fiscal` - Fiscal years and date containment

pub mod account;
pub mod calendar;
pub mod clock;
pub mod currency;
pub mod entity;
pub mod error;
pub mod fiscal;
pub mod ledger;
pub mod validation;

pub use error::{ServiceError, ValidationError};
pub use validation::{ValidationContext, ValidationRules};
