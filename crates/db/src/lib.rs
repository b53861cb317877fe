//! Storage and lookup adapters for the core ports.
//!
//! This crate provides in-memory implementations of every port the verification
//! service consumes. Each store serializes its writes behind one async lock, which is
//! what makes the duplicate check and the insert atomic.

pub mod repositories;

pub use repositories::{
    MemoryFiscalYearStore, MemoryUserDirectory, MemoryVerificationStore, RateConfigError,
    StaticExchangeRates,
};
