//! Booking repository.

use std::sync::Arc;

use crate::entities::{Booking, booking};
use pairly_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// Booking repository for database operations.
#[derive(Clone)]
pub struct BookingRepository {
    db: Arc<DatabaseConnection>,
}

impl BookingRepository {
    /// Create a new booking repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a booking by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<booking::Model>> {
        Booking::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a booking by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<booking::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {id} not found")))
    }

    /// Create a new booking.
    pub async fn create(&self, model: booking::ActiveModel) -> AppResult<booking::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a booking.
    pub async fn update(&self, model: booking::ActiveModel) -> AppResult<booking::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List bookings for an account (paginated).
    pub async fn list_by_account(
        &self,
        account_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<booking::Model>> {
        Booking::find()
            .filter(booking::Column::AccountId.eq(account_id))
            .order_by_desc(booking::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all bookings, optionally filtered by status (paginated).
    pub async fn list(
        &self,
        status: Option<booking::BookingStatus>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<booking::Model>> {
        let mut query = Booking::find().order_by_desc(booking::Column::CreatedAt);

        if let Some(s) = status {
            query = query.filter(booking::Column::Status.eq(s));
        }

        query
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Confirmed bookings for an event (used for the capacity check).
    pub async fn list_confirmed_for_event(
        &self,
        event_id: &str,
    ) -> AppResult<Vec<booking::Model>> {
        Booking::find()
            .filter(booking::Column::EventId.eq(event_id))
            .filter(booking::Column::Status.eq(booking::BookingStatus::Confirmed))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count bookings with the given status.
    pub async fn count_by_status(&self, status: booking::BookingStatus) -> AppResult<u64> {
        Booking::find()
            .filter(booking::Column::Status.eq(status))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
