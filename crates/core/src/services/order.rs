//! Order service: checkout and fulfilment status.

use pairly_common::{AppError, AppResult, IdGenerator};
use pairly_db::{
    entities::{
        account,
        order::{self, OrderItem, OrderItemList, OrderStatus},
    },
    repositories::{OrderRepository, ProductRepository},
};
use rust_decimal::Decimal;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::authorize::{Capability, authorize};

/// Order service.
#[derive(Clone)]
pub struct OrderService {
    order_repo: OrderRepository,
    product_repo: ProductRepository,
    id_gen: IdGenerator,
}

/// One line of an order request.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub product_id: String,

    #[validate(range(min = 1, max = 100))]
    pub quantity: u32,
}

/// Input for placing an order.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderInput {
    #[validate(length(min = 1, max = 50), nested)]
    pub items: Vec<OrderItemInput>,

    #[validate(length(max = 2048))]
    pub shipping_address: Option<String>,
}

impl OrderService {
    /// Create a new order service.
    #[must_use]
    pub fn new(order_repo: OrderRepository, product_repo: ProductRepository) -> Self {
        Self {
            order_repo,
            product_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Place an order. Prices are captured at order time; stock is
    /// decremented per line.
    ///
    /// Every line is validated before any stock write, so a bad line never
    /// leaves earlier products partially decremented.
    pub async fn place(
        &self,
        account: &account::Model,
        input: PlaceOrderInput,
    ) -> AppResult<order::Model> {
        input.validate()?;

        let mut lines = Vec::with_capacity(input.items.len());
        let mut reservations = Vec::with_capacity(input.items.len());
        let mut total = Decimal::ZERO;

        for item in &input.items {
            let product = self.product_repo.get_by_id(&item.product_id).await?;

            if !product.is_active {
                return Err(AppError::BadRequest(format!(
                    "Product {} is not available",
                    product.name
                )));
            }

            let quantity = i32::try_from(item.quantity)
                .map_err(|_| AppError::Validation("Quantity out of range".to_string()))?;

            if product.stock < quantity {
                return Err(AppError::Conflict(format!(
                    "Insufficient stock for {}",
                    product.name
                )));
            }

            total += product.price * Decimal::from(item.quantity);
            lines.push(OrderItem {
                product_id: product.id.clone(),
                quantity: item.quantity,
                unit_price: product.price,
            });
            reservations.push((product, quantity));
        }

        for (product, quantity) in reservations {
            let remaining = product.stock - quantity;
            let mut active: pairly_db::entities::product::ActiveModel = product.into();
            active.stock = Set(remaining);
            active.updated_at = Set(Some(chrono::Utc::now().into()));
            self.product_repo.update(active).await?;
        }

        let model = order::ActiveModel {
            id: Set(self.id_gen.generate()),
            account_id: Set(account.id.clone()),
            items: Set(OrderItemList(lines)),
            total: Set(total),
            status: Set(OrderStatus::Pending),
            shipping_address: Set(input.shipping_address),
            ..Default::default()
        };

        let placed = self.order_repo.create(model).await?;

        tracing::info!(order_id = %placed.id, account_id = %account.id, "Order placed");

        Ok(placed)
    }

    /// Advance an order's fulfilment status.
    ///
    /// Transitions only move forward; the single exception is cancellation,
    /// which is allowed from any non-terminal state.
    pub async fn update_status(
        &self,
        actor: &account::Model,
        order_id: &str,
        new_status: OrderStatus,
    ) -> AppResult<order::Model> {
        authorize(actor, Capability::ManageOrders)?;

        let existing = self.order_repo.get_by_id(order_id).await?;

        if !transition_allowed(existing.status, new_status) {
            return Err(AppError::Conflict(format!(
                "Cannot move order from {:?} to {new_status:?}",
                existing.status
            )));
        }

        let mut active: order::ActiveModel = existing.into();
        active.status = Set(new_status);
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let updated = self.order_repo.update(active).await?;

        tracing::info!(order_id, actor_id = %actor.id, status = ?new_status, "Order status updated");

        Ok(updated)
    }

    /// Cancel an order.
    ///
    /// Owners may cancel while the order is still pending; order managers
    /// may cancel from any non-terminal state.
    pub async fn cancel(
        &self,
        actor: &account::Model,
        order_id: &str,
    ) -> AppResult<order::Model> {
        let existing = self.order_repo.get_by_id(order_id).await?;

        if existing.account_id == actor.id {
            if existing.status != OrderStatus::Pending {
                return Err(AppError::Conflict(
                    "Only pending orders can be cancelled".to_string(),
                ));
            }
        } else {
            authorize(actor, Capability::ManageOrders)?;

            if existing.status.is_terminal() {
                return Err(AppError::Conflict(format!(
                    "Cannot cancel an order that is {:?}",
                    existing.status
                )));
            }
        }

        let mut active: order::ActiveModel = existing.into();
        active.status = Set(OrderStatus::Cancelled);
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let cancelled = self.order_repo.update(active).await?;

        tracing::info!(order_id, actor_id = %actor.id, "Order cancelled");

        Ok(cancelled)
    }

    /// Get an order. Members can only see their own orders.
    pub async fn get(&self, actor: &account::Model, order_id: &str) -> AppResult<order::Model> {
        let order = self.order_repo.get_by_id(order_id).await?;

        if order.account_id != actor.id {
            authorize(actor, Capability::ManageOrders)?;
        }

        Ok(order)
    }

    /// List the calling account's own orders.
    pub async fn list_own(
        &self,
        account: &account::Model,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<order::Model>> {
        self.order_repo.list_by_account(&account.id, limit, offset).await
    }

    /// List all orders (admin view).
    pub async fn list(
        &self,
        actor: &account::Model,
        status: Option<OrderStatus>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<order::Model>> {
        authorize(actor, Capability::ManageOrders)?;
        self.order_repo.list(status, limit, offset).await
    }
}

/// Whether a fulfilment transition is permitted.
#[must_use]
pub fn transition_allowed(from: OrderStatus, to: OrderStatus) -> bool {
    if from.is_terminal() {
        return false;
    }
    if to == OrderStatus::Cancelled {
        return true;
    }
    rank(to) > rank(from)
}

const fn rank(status: OrderStatus) -> u8 {
    match status {
        OrderStatus::Pending => 0,
        OrderStatus::Confirmed => 1,
        OrderStatus::Processing => 2,
        OrderStatus::Shipped => 3,
        OrderStatus::Delivered => 4,
        OrderStatus::Cancelled => 5,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pairly_db::entities::account::{AccountStatus, AuthProvider, PermissionSet, Role};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    #[test]
    fn test_forward_transitions_allowed() {
        assert!(transition_allowed(OrderStatus::Pending, OrderStatus::Confirmed));
        assert!(transition_allowed(OrderStatus::Confirmed, OrderStatus::Shipped));
        assert!(transition_allowed(OrderStatus::Shipped, OrderStatus::Delivered));
    }

    #[test]
    fn test_backward_transitions_rejected() {
        assert!(!transition_allowed(OrderStatus::Shipped, OrderStatus::Confirmed));
        assert!(!transition_allowed(OrderStatus::Confirmed, OrderStatus::Pending));
        assert!(!transition_allowed(OrderStatus::Pending, OrderStatus::Pending));
    }

    #[test]
    fn test_cancellation_from_non_terminal() {
        assert!(transition_allowed(OrderStatus::Pending, OrderStatus::Cancelled));
        assert!(transition_allowed(OrderStatus::Shipped, OrderStatus::Cancelled));
    }

    #[test]
    fn test_terminal_states_are_final() {
        assert!(!transition_allowed(OrderStatus::Delivered, OrderStatus::Cancelled));
        assert!(!transition_allowed(OrderStatus::Cancelled, OrderStatus::Confirmed));
    }

    fn test_actor(role: Role, permissions: PermissionSet) -> account::Model {
        account::Model {
            id: "actor1".to_string(),
            email: "actor@example.com".to_string(),
            email_lower: "actor@example.com".to_string(),
            password_hash: None,
            provider: AuthProvider::Email,
            email_verified: true,
            status: AccountStatus::Approved,
            role,
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

    fn test_product(id: &str, stock: i32, is_active: bool) -> pairly_db::entities::product::Model {
        pairly_db::entities::product::Model {
            id: id.to_string(),
            name: format!("Product {id}"),
            description: None,
            price: Decimal::new(1500, 2),
            stock,
            category: None,
            image_url: None,
            is_active,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_place_rejects_empty_order() {
        let actor = test_actor(Role::User, PermissionSet::default());
        let order_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let product_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = OrderService::new(
            OrderRepository::new(order_db),
            ProductRepository::new(product_db),
        );

        let result = service
            .place(
                &actor,
                PlaceOrderInput {
                    items: vec![],
                    shipping_address: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_failed_line_writes_no_stock() {
        let actor = test_actor(Role::User, PermissionSet::default());
        let order_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let product_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_product("p1", 10, true)]])
                .append_query_results([[test_product("p2", 10, false)]])
                .into_connection(),
        );
        let service = OrderService::new(
            OrderRepository::new(order_db),
            ProductRepository::new(Arc::clone(&product_db)),
        );

        let result = service
            .place(
                &actor,
                PlaceOrderInput {
                    items: vec![
                        OrderItemInput {
                            product_id: "p1".to_string(),
                            quantity: 2,
                        },
                        OrderItemInput {
                            product_id: "p2".to_string(),
                            quantity: 1,
                        },
                    ],
                    shipping_address: None,
                },
            )
            .await;

        // The second line is inactive, so the whole order is refused
        // before the first line's stock is touched.
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        drop(service);
        let log = Arc::try_unwrap(product_db).unwrap().into_transaction_log();
        assert!(!log.iter().any(|t| format!("{t:?}").contains("UPDATE")));
    }

    #[tokio::test]
    async fn test_owner_cannot_cancel_shipped_order() {
        let actor = test_actor(Role::User, PermissionSet::default());
        let order = order::Model {
            id: "o1".to_string(),
            account_id: "actor1".to_string(),
            items: OrderItemList::default(),
            total: Decimal::ZERO,
            status: OrderStatus::Shipped,
            shipping_address: None,
            created_at: Utc::now().into(),
            updated_at: None,
        };

        let order_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[order]])
                .into_connection(),
        );
        let product_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = OrderService::new(
            OrderRepository::new(order_db),
            ProductRepository::new(product_db),
        );

        let result = service.cancel(&actor, "o1").await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_status_requires_manage_orders() {
        let actor = test_actor(Role::User, PermissionSet::default());
        let order_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let product_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = OrderService::new(
            OrderRepository::new(order_db),
            ProductRepository::new(product_db),
        );

        let result = service
            .update_status(&actor, "o1", OrderStatus::Confirmed)
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
