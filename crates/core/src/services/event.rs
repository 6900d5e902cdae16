//! Event service: couples' events and their publication state.

use pairly_common::{AppError, AppResult, IdGenerator};
use pairly_db::{
    entities::{account, event},
    repositories::EventRepository,
};
use rust_decimal::Decimal;
use sea_orm::Set;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Deserialize;
use validator::Validate;

use crate::services::authorize::{Capability, authorize};

/// Event service.
#[derive(Clone)]
pub struct EventService {
    event_repo: EventRepository,
    id_gen: IdGenerator,
}

/// Input for creating an event.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventInput {
    #[validate(length(min = 1, max = 256))]
    pub title: String,

    #[validate(length(max = 4096))]
    pub description: Option<String>,

    #[validate(length(max = 512))]
    pub location: Option<String>,

    pub starts_at: DateTimeWithTimeZone,

    pub ends_at: Option<DateTimeWithTimeZone>,

    #[validate(range(min = 0))]
    pub capacity: i32,

    pub price: Decimal,
}

/// Input for updating an event. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventInput {
    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,

    #[validate(length(max = 4096))]
    pub description: Option<String>,

    #[validate(length(max = 512))]
    pub location: Option<String>,

    pub starts_at: Option<DateTimeWithTimeZone>,

    pub ends_at: Option<DateTimeWithTimeZone>,

    #[validate(range(min = 0))]
    pub capacity: Option<i32>,

    pub price: Option<Decimal>,

    pub is_published: Option<bool>,
}

impl EventService {
    /// Create a new event service.
    #[must_use]
    pub fn new(event_repo: EventRepository) -> Self {
        Self {
            event_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create an event. Events start unpublished.
    pub async fn create(
        &self,
        actor: &account::Model,
        input: CreateEventInput,
    ) -> AppResult<event::Model> {
        authorize(actor, Capability::ManageEvents)?;
        input.validate()?;

        if input.price.is_sign_negative() {
            return Err(AppError::Validation("Price must not be negative".to_string()));
        }
        if let Some(ends_at) = input.ends_at
            && ends_at < input.starts_at
        {
            return Err(AppError::Validation(
                "Event cannot end before it starts".to_string(),
            ));
        }

        let model = event::ActiveModel {
            id: Set(self.id_gen.generate()),
            title: Set(input.title),
            description: Set(input.description),
            location: Set(input.location),
            starts_at: Set(input.starts_at),
            ends_at: Set(input.ends_at),
            capacity: Set(input.capacity),
            price: Set(input.price),
            is_published: Set(false),
            ..Default::default()
        };

        self.event_repo.create(model).await
    }

    /// Update an event.
    pub async fn update(
        &self,
        actor: &account::Model,
        id: &str,
        input: UpdateEventInput,
    ) -> AppResult<event::Model> {
        authorize(actor, Capability::ManageEvents)?;
        input.validate()?;

        if let Some(price) = input.price
            && price.is_sign_negative()
        {
            return Err(AppError::Validation("Price must not be negative".to_string()));
        }

        let existing = self.event_repo.get_by_id(id).await?;
        let mut active: event::ActiveModel = existing.into();

        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(location) = input.location {
            active.location = Set(Some(location));
        }
        if let Some(starts_at) = input.starts_at {
            active.starts_at = Set(starts_at);
        }
        if let Some(ends_at) = input.ends_at {
            active.ends_at = Set(Some(ends_at));
        }
        if let Some(capacity) = input.capacity {
            active.capacity = Set(capacity);
        }
        if let Some(price) = input.price {
            active.price = Set(price);
        }
        if let Some(is_published) = input.is_published {
            active.is_published = Set(is_published);
        }

        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.event_repo.update(active).await
    }

    /// Delete an event.
    pub async fn delete(&self, actor: &account::Model, id: &str) -> AppResult<()> {
        authorize(actor, Capability::ManageEvents)?;

        let event = self.event_repo.get_by_id(id).await?;
        self.event_repo.delete(event).await?;

        tracing::info!(event_id = id, actor_id = %actor.id, "Event deleted");

        Ok(())
    }

    /// Get an event by ID.
    pub async fn get(&self, id: &str) -> AppResult<event::Model> {
        self.event_repo.get_by_id(id).await
    }

    /// List events. Consumers see published events only.
    pub async fn list(
        &self,
        published_only: bool,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<event::Model>> {
        self.event_repo.list(published_only, limit, offset).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use pairly_db::entities::account::{AccountStatus, AuthProvider, PermissionSet, Role};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_admin(permissions: PermissionSet) -> account::Model {
        account::Model {
            id: "actor1".to_string(),
            email: "actor@example.com".to_string(),
            email_lower: "actor@example.com".to_string(),
            password_hash: None,
            provider: AuthProvider::Email,
            email_verified: true,
            status: AccountStatus::Approved,
            role: Role::Admin,
            admin_role: None,
            permissions,
            name: None,
            token: None,
            approved_by: None,
            approved_at: None,
            review_note: None,
            added_by: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_ends_before_start() {
        let actor = test_admin(PermissionSet {
            manage_events: true,
            ..PermissionSet::default()
        });
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = EventService::new(EventRepository::new(db));

        let starts_at = Utc::now();
        let result = service
            .create(
                &actor,
                CreateEventInput {
                    title: "Sunset Cruise".to_string(),
                    description: None,
                    location: None,
                    starts_at: starts_at.into(),
                    ends_at: Some((starts_at - Duration::hours(2)).into()),
                    capacity: 20,
                    price: Decimal::new(7500, 2),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_requires_manage_events() {
        let actor = test_admin(PermissionSet::default());
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = EventService::new(EventRepository::new(db));

        let result = service
            .create(
                &actor,
                CreateEventInput {
                    title: "Sunset Cruise".to_string(),
                    description: None,
                    location: None,
                    starts_at: Utc::now().into(),
                    ends_at: None,
                    capacity: 20,
                    price: Decimal::new(7500, 2),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
