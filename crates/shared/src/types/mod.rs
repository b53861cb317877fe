//! Common types used across the application.

pub mod currency_code;
pub mod id;

pub use currency_code::{CurrencyCode, UnknownCurrencyCode};
pub use id::Id;
