//! Fiscal year store.

use async_trait::async_trait;
use kassabok_core::error::{ServiceError, ValidationError};
use kassabok_core::fiscal::{FiscalYear, find_containing};
use kassabok_core::ledger::FiscalYearRepository;
use kassabok_core::validation::ValidationContext;
use kassabok_shared::types::Id;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory fiscal year store.
#[derive(Debug, Default)]
pub struct MemoryFiscalYearStore {
    years: RwLock<Vec<FiscalYear>>,
}

impl MemoryFiscalYearStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fiscal year after validating it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the fiscal year fails validation.
    pub async fn insert(
        &self,
        year: FiscalYear,
        ctx: &ValidationContext,
    ) -> Result<(), ServiceError> {
        let errors: Vec<ValidationError> = year.validate(ctx);
        if !errors.is_empty() {
            return Err(ServiceError::InvalidInput(errors));
        }

        let mut years = self.years.write().await;
        years.retain(|existing| existing.id != year.id);
        debug!(id = %year.id, from = %year.from, to = %year.to, "Stored fiscal year");
        years.push(year);
        years.sort_by_key(|y| y.from);
        Ok(())
    }
}

#[async_trait]
impl FiscalYearRepository for MemoryFiscalYearStore {
    async fn fiscal_year_for(&self, user_id: &Id, date: &str) -> Result<FiscalYear, ServiceError> {
        let years = self.years.read().await;
        find_containing(years.iter().filter(|y| &y.user_id == user_id), date).cloned()
    }

    async fn fiscal_years(&self, user_id: &Id) -> Result<Vec<FiscalYear>, ServiceError> {
        let years = self.years.read().await;
        Ok(years
            .iter()
            .filter(|y| &y.user_id == user_id)
            .cloned()
            .collect())
    }
}
