//! Shared types, errors, and configuration for Kassabok.
//!
//! This crate provides common types used across all other crates:
//! - ISO 4217 currency codes
//! - Opaque entity identifiers
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
