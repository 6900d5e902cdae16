//! Couple repository.

use std::sync::Arc;

use crate::entities::{Couple, couple};
use pairly_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

/// Couple repository for database operations.
#[derive(Clone)]
pub struct CoupleRepository {
    db: Arc<DatabaseConnection>,
}

impl CoupleRepository {
    /// Create a new couple repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a couple by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<couple::Model>> {
        Couple::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a couple by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<couple::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Couple {id} not found")))
    }

    /// Find the couple referencing an account as either partner.
    pub async fn find_by_partner(&self, account_id: &str) -> AppResult<Option<couple::Model>> {
        Couple::find()
            .filter(
                Condition::any()
                    .add(couple::Column::PartnerOneId.eq(account_id))
                    .add(couple::Column::PartnerTwoId.eq(account_id)),
            )
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new couple.
    pub async fn create(&self, model: couple::ActiveModel) -> AppResult<couple::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a couple.
    pub async fn update(&self, model: couple::ActiveModel) -> AppResult<couple::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List couples (paginated).
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<couple::Model>> {
        Couple::find()
            .order_by_desc(couple::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all couples.
    pub async fn count(&self) -> AppResult<u64> {
        Couple::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
