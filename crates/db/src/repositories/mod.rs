//! Repository implementations.
//!
//! Repositories provide a clean interface for storage operations, hiding the
//! storage details from the rest of the application.

pub mod exchange_rate;
pub mod fiscal;
pub mod user;
pub mod verification;

pub use exchange_rate::{RateConfigError, StaticExchangeRates};
pub use fiscal::MemoryFiscalYearStore;
pub use user::MemoryUserDirectory;
pub use verification::MemoryVerificationStore;
