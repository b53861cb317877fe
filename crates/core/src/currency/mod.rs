//! Monetary values, conversion and exchange rates.

pub mod amount;
pub mod conversion;
pub mod error;
pub mod exchange;
pub mod value;

#[cfg(test)]
mod props;

pub use conversion::{MINOR_UNITS, to_local_amount, to_minor_units};
pub use error::CurrencyError;
pub use exchange::ExchangeRate;
pub use value::{Currency, CurrencyOption};
