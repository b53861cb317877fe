//! User directory: local currency per user.

use std::collections::HashMap;

use async_trait::async_trait;
use kassabok_core::error::ServiceError;
use kassabok_core::ledger::LocalCurrencyLookup;
use kassabok_shared::types::{CurrencyCode, Id};
use tokio::sync::RwLock;

/// In-memory user directory.
///
/// Codes are kept as entered so a bad stored code surfaces on lookup.
#[derive(Debug, Default)]
pub struct MemoryUserDirectory {
    users: RwLock<HashMap<Id, String>>,
}

impl MemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user with a local currency code.
    pub async fn insert(&self, user_id: Id, local_currency: impl Into<String>) {
        self.users.write().await.insert(user_id, local_currency.into());
    }
}

#[async_trait]
impl LocalCurrencyLookup for MemoryUserDirectory {
    async fn local_currency(&self, user_id: &Id) -> Result<CurrencyCode, ServiceError> {
        let users = self.users.read().await;
        let code = users
            .get(user_id)
            .ok_or_else(|| ServiceError::UserNotFound(user_id.to_string()))?;
        Ok(code.parse::<CurrencyCode>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_currency() {
        let users = MemoryUserDirectory::new();
        users.insert(Id::from(1), "sek").await;
        users.insert(Id::from(2), "KRONOR").await;

        assert_eq!(
            users.local_currency(&Id::from(1)).await,
            Ok(CurrencyCode::Sek)
        );
        assert_eq!(
            users.local_currency(&Id::from(2)).await,
            Err(ServiceError::CurrencyCodeInvalid("KRONOR".to_string()))
        );
        assert_eq!(
            users.local_currency(&Id::from(3)).await,
            Err(ServiceError::UserNotFound("3".to_string()))
        );
    }
}
