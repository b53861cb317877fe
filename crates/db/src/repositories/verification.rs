//! Verification store.

use async_trait::async_trait;
use kassabok_core::entity::Entity;
use kassabok_core::error::ServiceError;
use kassabok_core::ledger::{Comparable, Verification, VerificationRepository};
use kassabok_shared::types::Id;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Default)]
struct State {
    verifications: Vec<Verification>,
    last_id: u64,
}

/// In-memory verification store with sequential numeric ids.
#[derive(Debug, Default)]
pub struct MemoryVerificationStore {
    state: Mutex<State>,
}

impl MemoryVerificationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored verifications, deleted ones included.
    pub async fn len(&self) -> usize {
        self.state.lock().await.verifications.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn find_equal<'a>(
    verifications: &'a [Verification],
    comparable: &Comparable,
) -> Option<&'a Verification> {
    verifications.iter().find(|v| {
        v.user_id.as_ref() == comparable.user_id()
            && v.date == comparable.date()
            && v.comparable() == *comparable
    })
}

fn owned_by(verification: &Verification, user_id: &Id) -> bool {
    verification.user_id.as_ref() == Some(user_id)
}

#[async_trait]
impl VerificationRepository for MemoryVerificationStore {
    async fn save(&self, verification: &Verification) -> Result<Id, ServiceError> {
        let mut state = self.state.lock().await;

        if let Some(id) = verification.id() {
            let user_id = verification.user_id.as_ref();
            let stored = state
                .verifications
                .iter_mut()
                .find(|v| v.id() == Some(id) && v.user_id.as_ref() == user_id)
                .ok_or_else(|| ServiceError::VerificationNotFound(id.to_string()))?;
            *stored = verification.clone().with_id(id.clone());
            debug!(id = %id, "Updated verification");
            return Ok(id.clone());
        }

        if let Some(existing) = find_equal(&state.verifications, &verification.comparable()) {
            let id = existing
                .id()
                .cloned()
                .ok_or_else(|| ServiceError::Internal("stored verification has no id".into()))?;
            debug!(id = %id, "Insert lost to an equal verification");
            return Err(ServiceError::Duplicate(id));
        }

        state.last_id += 1;
        let id = Id::Number(state.last_id);
        state
            .verifications
            .push(verification.clone().with_id(id.clone()));
        debug!(id = %id, "Stored verification");
        Ok(id)
    }

    async fn find_duplicate(
        &self,
        comparable: &Comparable,
    ) -> Result<Option<Verification>, ServiceError> {
        let state = self.state.lock().await;
        Ok(find_equal(&state.verifications, comparable).cloned())
    }

    async fn add_files(
        &self,
        user_id: &Id,
        id: &Id,
        files: &[String],
    ) -> Result<Verification, ServiceError> {
        let mut state = self.state.lock().await;
        let verification = state
            .verifications
            .iter_mut()
            .find(|v| owned_by(v, user_id) && v.id() == Some(id))
            .ok_or_else(|| ServiceError::VerificationNotFound(id.to_string()))?;

        for file in files {
            if !verification.files.contains(file) {
                verification.files.push(file.clone());
            }
        }
        debug!(id = %id, count = files.len(), "Attached files");
        Ok(verification.clone())
    }

    async fn find_by_fiscal_year(
        &self,
        user_id: &Id,
        fiscal_year_id: &Id,
    ) -> Result<Vec<Verification>, ServiceError> {
        let state = self.state.lock().await;
        Ok(state
            .verifications
            .iter()
            .filter(|v| owned_by(v, user_id) && v.fiscal_year_id.as_ref() == Some(fiscal_year_id))
            .cloned()
            .collect())
    }

    async fn get(&self, user_id: &Id, id: &Id) -> Result<Verification, ServiceError> {
        let state = self.state.lock().await;
        state
            .verifications
            .iter()
            .find(|v| owned_by(v, user_id) && v.id() == Some(id))
            .cloned()
            .ok_or_else(|| ServiceError::VerificationNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use kassabok_core::currency::Currency;
    use kassabok_core::ledger::{Transaction, VerificationType};
    use kassabok_shared::types::CurrencyCode;

    use super::*;

    fn verification(name: &str) -> Verification {
        Verification {
            user_id: Some(Id::from(1)),
            name: name.to_string(),
            date: "2020-02-02".to_string(),
            verification_type: VerificationType::Transaction,
            fiscal_year_id: Some(Id::from("fy2020")),
            transactions: vec![
                Transaction::new(6110, Currency::local(2_500, CurrencyCode::Sek)),
                Transaction::new(1930, Currency::local(-2_500, CurrencyCode::Sek)),
            ],
            files: vec!["a.pdf".to_string()],
            ..Verification::default()
        }
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let store = MemoryVerificationStore::new();
        assert_eq!(store.save(&verification("Stamps")).await, Ok(Id::Number(1)));
        assert_eq!(store.save(&verification("Paper")).await, Ok(Id::Number(2)));

        let stored = store.get(&Id::from(1), &Id::Number(2)).await.unwrap();
        assert_eq!(stored.name, "Paper");
        assert!(
            stored
                .transactions
                .iter()
                .all(|t| t.verification_id == Some(Id::Number(2)))
        );
    }

    #[tokio::test]
    async fn test_save_rejects_equal_verification() {
        let store = MemoryVerificationStore::new();
        store.save(&verification("Stamps")).await.unwrap();
        assert_eq!(
            store.save(&verification("Stamps")).await,
            Err(ServiceError::Duplicate(Id::Number(1)))
        );
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_deleted_verifications_are_still_duplicates() {
        let store = MemoryVerificationStore::new();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut deleted = verification("Stamps");
        deleted.entity = deleted.entity.deleted(now);
        store.save(&deleted).await.unwrap();

        let comparable = verification("Stamps").comparable();
        let found = store.find_duplicate(&comparable).await.unwrap().unwrap();
        assert_eq!(found.id(), Some(&Id::Number(1)));
        assert!(found.is_deleted());
        assert_eq!(
            store.save(&verification("Stamps")).await,
            Err(ServiceError::Duplicate(Id::Number(1)))
        );
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_save_with_id_updates_in_place() {
        let store = MemoryVerificationStore::new();
        let id = store.save(&verification("Stamps")).await.unwrap();

        let mut edited = store.get(&Id::from(1), &id).await.unwrap();
        edited.name = "Another name".to_string();
        assert_eq!(store.save(&edited).await, Ok(id.clone()));

        assert_eq!(store.len().await, 1);
        let stored = store.get(&Id::from(1), &id).await.unwrap();
        assert_eq!(stored.name, "Another name");
        assert!(
            stored
                .transactions
                .iter()
                .all(|t| t.verification_id == Some(id.clone()))
        );
    }

    #[tokio::test]
    async fn test_update_requires_stored_verification_of_owner() {
        let store = MemoryVerificationStore::new();
        let id = store.save(&verification("Stamps")).await.unwrap();

        let unknown = verification("Paper").with_id(Id::Number(7));
        assert_eq!(
            store.save(&unknown).await,
            Err(ServiceError::VerificationNotFound("7".to_string()))
        );

        let mut foreign = store.get(&Id::from(1), &id).await.unwrap();
        foreign.user_id = Some(Id::from(2));
        assert_eq!(
            store.save(&foreign).await,
            Err(ServiceError::VerificationNotFound("1".to_string()))
        );
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_add_files_skips_known() {
        let store = MemoryVerificationStore::new();
        let id = store.save(&verification("Stamps")).await.unwrap();
        let updated = store
            .add_files(&Id::from(1), &id, &["a.pdf".to_string(), "b.pdf".to_string()])
            .await
            .unwrap();
        assert_eq!(updated.files, vec!["a.pdf".to_string(), "b.pdf".to_string()]);
    }

    #[tokio::test]
    async fn test_lookups_are_scoped_to_user() {
        let store = MemoryVerificationStore::new();
        let id = store.save(&verification("Stamps")).await.unwrap();

        assert_eq!(
            store.get(&Id::from(2), &id).await,
            Err(ServiceError::VerificationNotFound("1".to_string()))
        );
        let listed = store
            .find_by_fiscal_year(&Id::from(1), &Id::from("fy2020"))
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        let other_year = store
            .find_by_fiscal_year(&Id::from(1), &Id::from("fy2019"))
            .await
            .unwrap();
        assert!(other_year.is_empty());
    }
}
