//! Order repository.

use std::sync::Arc;

use crate::entities::{Order, order};
use pairly_common::{AppError, AppResult};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// Order repository for database operations.
#[derive(Clone)]
pub struct OrderRepository {
    db: Arc<DatabaseConnection>,
}

impl OrderRepository {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an order by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<order::Model>> {
        Order::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an order by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<order::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order {id} not found")))
    }

    /// Create a new order.
    pub async fn create(&self, model: order::ActiveModel) -> AppResult<order::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an order.
    pub async fn update(&self, model: order::ActiveModel) -> AppResult<order::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List orders for an account (paginated).
    pub async fn list_by_account(
        &self,
        account_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<order::Model>> {
        Order::find()
            .filter(order::Column::AccountId.eq(account_id))
            .order_by_desc(order::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all orders, optionally filtered by status (paginated).
    pub async fn list(
        &self,
        status: Option<order::OrderStatus>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<order::Model>> {
        let mut query = Order::find().order_by_desc(order::Column::CreatedAt);

        if let Some(s) = status {
            query = query.filter(order::Column::Status.eq(s));
        }

        query
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all orders.
    pub async fn count(&self) -> AppResult<u64> {
        Order::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Total revenue across non-cancelled orders.
    pub async fn total_revenue(&self) -> AppResult<Decimal> {
        let totals: Vec<Decimal> = Order::find()
            .filter(order::Column::Status.ne(order::OrderStatus::Cancelled))
            .select_only()
            .column(order::Column::Total)
            .into_tuple()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(totals.into_iter().sum())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::order::{OrderItem, OrderItemList, OrderStatus};
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_order(id: &str, account_id: &str) -> order::Model {
        order::Model {
            id: id.to_string(),
            account_id: account_id.to_string(),
            items: OrderItemList(vec![OrderItem {
                product_id: "p1".to_string(),
                quantity: 2,
                unit_price: Decimal::new(1500, 2),
            }]),
            total: Decimal::new(3000, 2),
            status: OrderStatus::Pending,
            shipping_address: Some("1 Main St".to_string()),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_list_by_account() {
        let o1 = create_test_order("o1", "acct1");
        let o2 = create_test_order("o2", "acct1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[o1, o2]])
                .into_connection(),
        );

        let repo = OrderRepository::new(db);
        let result = repo.list_by_account("acct1", 10, 0).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].items.0.len(), 1);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<order::Model>::new()])
                .into_connection(),
        );

        let repo = OrderRepository::new(db);
        let result = repo.get_by_id("missing").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
