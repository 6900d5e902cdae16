//! Wishlist repository.

use std::sync::Arc;

use crate::entities::{WishlistItem, wishlist_item};
use pairly_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};

/// Wishlist repository for database operations.
#[derive(Clone)]
pub struct WishlistRepository {
    db: Arc<DatabaseConnection>,
}

impl WishlistRepository {
    /// Create a new wishlist repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// List an account's wishlist, newest first.
    pub async fn list_by_account(&self, account_id: &str) -> AppResult<Vec<wishlist_item::Model>> {
        WishlistItem::find()
            .filter(wishlist_item::Column::AccountId.eq(account_id))
            .order_by_desc(wishlist_item::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a wishlist entry for an account/product pair.
    pub async fn find(
        &self,
        account_id: &str,
        product_id: &str,
    ) -> AppResult<Option<wishlist_item::Model>> {
        WishlistItem::find()
            .filter(wishlist_item::Column::AccountId.eq(account_id))
            .filter(wishlist_item::Column::ProductId.eq(product_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a wishlist entry.
    pub async fn create(
        &self,
        model: wishlist_item::ActiveModel,
    ) -> AppResult<wishlist_item::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a wishlist entry.
    pub async fn delete(&self, model: wishlist_item::Model) -> AppResult<()> {
        model
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_list_by_account() {
        let item = wishlist_item::Model {
            id: "w1".to_string(),
            account_id: "acct1".to_string(),
            product_id: "p1".to_string(),
            created_at: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[item]])
                .into_connection(),
        );

        let repo = WishlistRepository::new(db);
        let result = repo.list_by_account("acct1").await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].product_id, "p1");
    }
}
