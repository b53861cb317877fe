//! Fiscal years and date containment.

pub mod year;

pub use year::{FiscalYear, StartingBalance, find_containing};
