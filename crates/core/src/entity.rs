//! Identity and lifecycle timestamps shared by every persisted entity.

use chrono::{DateTime, Utc};
use kassabok_shared::types::Id;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::ValidationContext;

/// Id and lifecycle timestamps. Timestamps travel as epoch milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMeta {
    /// Assigned by persistence; absent until the first save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    /// Creation time.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub date_created: Option<DateTime<Utc>>,
    /// Last modification time.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub date_modified: Option<DateTime<Utc>>,
    /// Logical deletion time; always equal to the last modification.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub date_deleted: Option<DateTime<Utc>>,
}

impl EntityMeta {
    /// Metadata with only an id.
    #[must_use]
    pub fn with_id(id: impl Into<Id>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Returns true if the entity carries a deletion stamp.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.date_deleted.is_some()
    }

    /// Fills in missing creation and modification times.
    pub fn stamp(&mut self, now: DateTime<Utc>) {
        if self.date_created.is_none() {
            self.date_created = Some(now);
        }
        if self.date_modified.is_none() {
            self.date_modified = Some(now);
        }
    }

    /// Records a modification at `now`. A deleted entity keeps its deletion stamp.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if self.date_created.is_none() {
            self.date_created = Some(now);
        }
        if self.date_deleted.is_none() {
            self.date_modified = Some(now);
        }
    }

    /// Returns a copy stamped as logically deleted at `now`.
    #[must_use]
    pub fn deleted(self, now: DateTime<Utc>) -> Self {
        Self {
            date_modified: Some(now),
            date_deleted: Some(now),
            ..self
        }
    }

    /// Checks the id and the ordering of the lifecycle timestamps.
    #[must_use]
    pub fn validate(&self, ctx: &ValidationContext) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.id.as_ref().is_some_and(Id::is_empty) {
            errors.push(ValidationError::IdIsEmpty);
        }

        if let Some(created) = self.date_created {
            if created < ctx.rules.earliest_date_created {
                errors.push(ValidationError::DateCreatedTooEarly);
            }
            if created > ctx.now {
                errors.push(ValidationError::DateCreatedInTheFuture);
            }
        }

        if self.date_modified.is_some_and(|modified| modified > ctx.now) {
            errors.push(ValidationError::DateModifiedInTheFuture);
        }

        if let Some(created) = self.date_created {
            // Not yet modified counts as modified now.
            let modified = self.date_modified.unwrap_or(ctx.now);
            if modified < created {
                errors.push(ValidationError::DateModifiedBeforeCreated);
            }
        }

        if self.date_deleted.is_some() && self.date_deleted != self.date_modified {
            errors.push(ValidationError::DateDeletedNotSameAsModified);
        }

        errors
    }
}

/// Anything carrying [`EntityMeta`].
pub trait Entity {
    /// Returns the entity metadata.
    fn meta(&self) -> &EntityMeta;

    /// Returns the assigned id.
    fn id(&self) -> Option<&Id> {
        self.meta().id.as_ref()
    }

    /// Returns true if the entity is logically deleted.
    fn is_deleted(&self) -> bool {
        self.meta().is_deleted()
    }
}
