//! Account number checks against the configured chart of accounts.

use kassabok_shared::config::{AccountClassRange, AccountsConfig};

use crate::error::ValidationError;

/// Chart of accounts as a set of class ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountChart {
    classes: Vec<AccountClassRange>,
}

impl AccountChart {
    /// Creates a chart from class ranges.
    #[must_use]
    pub fn new(classes: Vec<AccountClassRange>) -> Self {
        Self { classes }
    }

    /// Creates a chart from configuration.
    #[must_use]
    pub fn from_config(config: &AccountsConfig) -> Self {
        Self::new(config.classes.clone())
    }

    /// Returns the class an account number belongs to.
    #[must_use]
    pub fn class_of(&self, account_number: u32) -> Option<&AccountClassRange> {
        self.classes
            .iter()
            .find(|class| (class.first..=class.last).contains(&account_number))
    }

    /// Returns true if the account number belongs to a class.
    #[must_use]
    pub fn is_valid(&self, account_number: u32) -> bool {
        self.class_of(account_number).is_some()
    }

    /// Checks an account number.
    ///
    /// # Errors
    ///
    /// Returns `AccountNumberInvalid` when no class contains the number.
    pub fn validate_number(&self, account_number: u32) -> Result<(), ValidationError> {
        if self.is_valid(account_number) {
            Ok(())
        } else {
            Err(ValidationError::AccountNumberInvalid(account_number))
        }
    }
}

impl Default for AccountChart {
    fn default() -> Self {
        Self::from_config(&AccountsConfig::default())
    }
}
