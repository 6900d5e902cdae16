//! Booking service: event reservations with a capacity guard.

use pairly_common::{AppError, AppResult, IdGenerator};
use pairly_db::{
    entities::{
        account,
        booking::{self, BookingStatus},
    },
    repositories::{BookingRepository, EventRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::services::authorize::{Capability, authorize};

/// Booking service.
#[derive(Clone)]
pub struct BookingService {
    booking_repo: BookingRepository,
    event_repo: EventRepository,
    id_gen: IdGenerator,
}

/// Input for requesting a booking.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingInput {
    pub event_id: String,

    /// Seats requested; couples book for two by default.
    #[serde(default = "default_party_size")]
    #[validate(range(min = 1, max = 12))]
    pub party_size: i32,

    pub couple_id: Option<String>,
}

const fn default_party_size() -> i32 {
    2
}

impl BookingService {
    /// Create a new booking service.
    #[must_use]
    pub fn new(booking_repo: BookingRepository, event_repo: EventRepository) -> Self {
        Self {
            booking_repo,
            event_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Request a booking for an event. Bookings start pending and take a
    /// seat only once confirmed, but requests beyond remaining capacity are
    /// refused up front.
    pub async fn book(
        &self,
        account: &account::Model,
        input: CreateBookingInput,
    ) -> AppResult<booking::Model> {
        input.validate()?;

        let event = self.event_repo.get_by_id(&input.event_id).await?;

        if !event.is_published {
            return Err(AppError::NotFound(format!(
                "Event {} not found",
                input.event_id
            )));
        }

        self.ensure_capacity(&event.id, event.capacity, input.party_size)
            .await?;

        let model = booking::ActiveModel {
            id: Set(self.id_gen.generate()),
            event_id: Set(event.id.clone()),
            account_id: Set(account.id.clone()),
            couple_id: Set(input.couple_id),
            party_size: Set(input.party_size),
            status: Set(BookingStatus::Pending),
            ..Default::default()
        };

        let created = self.booking_repo.create(model).await?;

        tracing::info!(
            booking_id = %created.id,
            event_id = %event.id,
            account_id = %account.id,
            "Booking requested"
        );

        Ok(created)
    }

    /// Confirm a pending booking. Capacity is re-checked at confirmation.
    pub async fn confirm(
        &self,
        actor: &account::Model,
        booking_id: &str,
    ) -> AppResult<booking::Model> {
        authorize(actor, Capability::ManageBookings)?;

        let booking = self.booking_repo.get_by_id(booking_id).await?;

        if booking.status != BookingStatus::Pending {
            return Err(AppError::Conflict(
                "Only pending bookings can be confirmed".to_string(),
            ));
        }

        let event = self.event_repo.get_by_id(&booking.event_id).await?;
        self.ensure_capacity(&event.id, event.capacity, booking.party_size)
            .await?;

        let mut active: booking::ActiveModel = booking.into();
        active.status = Set(BookingStatus::Confirmed);
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let confirmed = self.booking_repo.update(active).await?;

        tracing::info!(booking_id, actor_id = %actor.id, "Booking confirmed");

        Ok(confirmed)
    }

    /// Cancel a booking. Members may cancel their own; admins may cancel any.
    pub async fn cancel(
        &self,
        actor: &account::Model,
        booking_id: &str,
    ) -> AppResult<booking::Model> {
        let booking = self.booking_repo.get_by_id(booking_id).await?;

        if booking.account_id != actor.id {
            authorize(actor, Capability::ManageBookings)?;
        }

        if booking.status == BookingStatus::Completed {
            return Err(AppError::Conflict(
                "Completed bookings cannot be cancelled".to_string(),
            ));
        }

        let mut active: booking::ActiveModel = booking.into();
        active.status = Set(BookingStatus::Cancelled);
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let cancelled = self.booking_repo.update(active).await?;

        tracing::info!(booking_id, actor_id = %actor.id, "Booking cancelled");

        Ok(cancelled)
    }

    /// Mark a confirmed booking as completed after the event.
    pub async fn complete(
        &self,
        actor: &account::Model,
        booking_id: &str,
    ) -> AppResult<booking::Model> {
        authorize(actor, Capability::ManageBookings)?;

        let booking = self.booking_repo.get_by_id(booking_id).await?;

        if booking.status != BookingStatus::Confirmed {
            return Err(AppError::Conflict(
                "Only confirmed bookings can be completed".to_string(),
            ));
        }

        let mut active: booking::ActiveModel = booking.into();
        active.status = Set(BookingStatus::Completed);
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.booking_repo.update(active).await
    }

    /// Get a booking. Members can only see their own.
    pub async fn get(
        &self,
        actor: &account::Model,
        booking_id: &str,
    ) -> AppResult<booking::Model> {
        let booking = self.booking_repo.get_by_id(booking_id).await?;

        if booking.account_id != actor.id {
            authorize(actor, Capability::ManageBookings)?;
        }

        Ok(booking)
    }

    /// List the calling account's own bookings.
    pub async fn list_own(
        &self,
        account: &account::Model,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<booking::Model>> {
        self.booking_repo
            .list_by_account(&account.id, limit, offset)
            .await
    }

    /// List all bookings (admin view).
    pub async fn list(
        &self,
        actor: &account::Model,
        status: Option<BookingStatus>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<booking::Model>> {
        authorize(actor, Capability::ManageBookings)?;
        self.booking_repo.list(status, limit, offset).await
    }

    async fn ensure_capacity(
        &self,
        event_id: &str,
        capacity: i32,
        requested: i32,
    ) -> AppResult<()> {
        let confirmed = self.booking_repo.list_confirmed_for_event(event_id).await?;
        let taken: i32 = confirmed.iter().map(|b| b.party_size).sum();

        if taken + requested > capacity {
            return Err(AppError::Conflict("Event is fully booked".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pairly_db::entities::account::{AccountStatus, AuthProvider, PermissionSet, Role};
    use pairly_db::entities::event;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_member(id: &str) -> account::Model {
        account::Model {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            email_lower: format!("{id}@example.com"),
            password_hash: None,
            provider: AuthProvider::Email,
            email_verified: true,
            status: AccountStatus::Approved,
            role: Role::User,
            admin_role: None,
            permissions: PermissionSet::default(),
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

    fn test_event(id: &str, capacity: i32, is_published: bool) -> event::Model {
        event::Model {
            id: id.to_string(),
            title: "Wine Tasting".to_string(),
            description: None,
            location: None,
            starts_at: Utc::now().into(),
            ends_at: None,
            capacity,
            price: Decimal::new(5000, 2),
            is_published,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_booking(id: &str, event_id: &str, party_size: i32) -> booking::Model {
        booking::Model {
            id: id.to_string(),
            event_id: event_id.to_string(),
            account_id: "other".to_string(),
            couple_id: None,
            party_size,
            status: BookingStatus::Confirmed,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_book_unpublished_event_not_found() {
        let event_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_event("e1", 10, false)]])
                .into_connection(),
        );
        let booking_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = BookingService::new(
            BookingRepository::new(booking_db),
            EventRepository::new(event_db),
        );

        let result = service
            .book(
                &test_member("acct1"),
                CreateBookingInput {
                    event_id: "e1".to_string(),
                    party_size: 2,
                    couple_id: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_book_full_event_rejected() {
        let event_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_event("e1", 4, true)]])
                .into_connection(),
        );
        // Two confirmed couples already hold all four seats.
        let booking_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    test_booking("b1", "e1", 2),
                    test_booking("b2", "e1", 2),
                ]])
                .into_connection(),
        );
        let service = BookingService::new(
            BookingRepository::new(booking_db),
            EventRepository::new(event_db),
        );

        let result = service
            .book(
                &test_member("acct1"),
                CreateBookingInput {
                    event_id: "e1".to_string(),
                    party_size: 2,
                    couple_id: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_confirm_requires_manage_bookings() {
        let booking_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let event_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = BookingService::new(
            BookingRepository::new(booking_db),
            EventRepository::new(event_db),
        );

        let result = service.confirm(&test_member("acct1"), "b1").await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
