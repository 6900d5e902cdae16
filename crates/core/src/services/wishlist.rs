//! Wishlist service.

use pairly_common::{AppError, AppResult, IdGenerator};
use pairly_db::{
    entities::{account, wishlist_item},
    repositories::{ProductRepository, WishlistRepository},
};
use sea_orm::Set;

/// Wishlist service.
#[derive(Clone)]
pub struct WishlistService {
    wishlist_repo: WishlistRepository,
    product_repo: ProductRepository,
    id_gen: IdGenerator,
}

impl WishlistService {
    /// Create a new wishlist service.
    #[must_use]
    pub fn new(wishlist_repo: WishlistRepository, product_repo: ProductRepository) -> Self {
        Self {
            wishlist_repo,
            product_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Add a product to the account's wishlist. Adding the same product
    /// twice returns the existing entry.
    pub async fn add(
        &self,
        account: &account::Model,
        product_id: &str,
    ) -> AppResult<wishlist_item::Model> {
        let product = self.product_repo.get_by_id(product_id).await?;

        if !product.is_active {
            return Err(AppError::BadRequest(format!(
                "Product {} is not available",
                product.name
            )));
        }

        if let Some(existing) = self.wishlist_repo.find(&account.id, product_id).await? {
            return Ok(existing);
        }

        let model = wishlist_item::ActiveModel {
            id: Set(self.id_gen.generate()),
            account_id: Set(account.id.clone()),
            product_id: Set(product.id),
            ..Default::default()
        };

        self.wishlist_repo.create(model).await
    }

    /// Remove a product from the account's wishlist.
    pub async fn remove(&self, account: &account::Model, product_id: &str) -> AppResult<()> {
        let item = self
            .wishlist_repo
            .find(&account.id, product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product is not on the wishlist".to_string()))?;

        self.wishlist_repo.delete(item).await
    }

    /// List the account's wishlist.
    pub async fn list(&self, account: &account::Model) -> AppResult<Vec<wishlist_item::Model>> {
        self.wishlist_repo.list_by_account(&account.id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pairly_db::entities::account::{AccountStatus, AuthProvider, PermissionSet, Role};
    use pairly_db::entities::product;
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

    fn test_product(id: &str, is_active: bool) -> product::Model {
        product::Model {
            id: id.to_string(),
            name: "Picnic Set".to_string(),
            description: None,
            price: Decimal::new(4500, 2),
            stock: 5,
            category: None,
            image_url: None,
            is_active,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_add_inactive_product_rejected() {
        let product_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_product("p1", false)]])
                .into_connection(),
        );
        let wishlist_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = WishlistService::new(
            WishlistRepository::new(wishlist_db),
            ProductRepository::new(product_db),
        );

        let result = service.add(&test_member("acct1"), "p1").await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let product_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_product("p1", true)]])
                .into_connection(),
        );
        let existing = wishlist_item::Model {
            id: "w1".to_string(),
            account_id: "acct1".to_string(),
            product_id: "p1".to_string(),
            created_at: Utc::now().into(),
        };
        let wishlist_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );
        let service = WishlistService::new(
            WishlistRepository::new(wishlist_db),
            ProductRepository::new(product_db),
        );

        let item = service.add(&test_member("acct1"), "p1").await.unwrap();
        assert_eq!(item.id, "w1");
    }
}
