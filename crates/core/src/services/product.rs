//! Product catalogue service.

use pairly_common::{AppError, AppResult, IdGenerator};
use pairly_db::{
    entities::{account, product},
    repositories::ProductRepository,
};
use rust_decimal::Decimal;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::services::authorize::{Capability, authorize};

/// Product service.
#[derive(Clone)]
pub struct ProductService {
    product_repo: ProductRepository,
    id_gen: IdGenerator,
}

/// Input for creating a product.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[validate(length(max = 4096))]
    pub description: Option<String>,

    pub price: Decimal,

    #[validate(range(min = 0))]
    pub stock: i32,

    #[validate(length(max = 128))]
    pub category: Option<String>,

    #[validate(length(max = 1024))]
    pub image_url: Option<String>,
}

/// Input for updating a product. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductInput {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,

    #[validate(length(max = 4096))]
    pub description: Option<String>,

    pub price: Option<Decimal>,

    #[validate(range(min = 0))]
    pub stock: Option<i32>,

    #[validate(length(max = 128))]
    pub category: Option<String>,

    #[validate(length(max = 1024))]
    pub image_url: Option<String>,

    pub is_active: Option<bool>,
}

impl ProductService {
    /// Create a new product service.
    #[must_use]
    pub fn new(product_repo: ProductRepository) -> Self {
        Self {
            product_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a product.
    pub async fn create(
        &self,
        actor: &account::Model,
        input: CreateProductInput,
    ) -> AppResult<product::Model> {
        authorize(actor, Capability::ManageProducts)?;
        input.validate()?;
        ensure_non_negative_price(input.price)?;

        let model = product::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            stock: Set(input.stock),
            category: Set(input.category),
            image_url: Set(input.image_url),
            is_active: Set(true),
            ..Default::default()
        };

        self.product_repo.create(model).await
    }

    /// Update a product.
    pub async fn update(
        &self,
        actor: &account::Model,
        id: &str,
        input: UpdateProductInput,
    ) -> AppResult<product::Model> {
        authorize(actor, Capability::ManageProducts)?;
        input.validate()?;

        if let Some(price) = input.price {
            ensure_non_negative_price(price)?;
        }

        let existing = self.product_repo.get_by_id(id).await?;
        let mut active: product::ActiveModel = existing.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(price) = input.price {
            active.price = Set(price);
        }
        if let Some(stock) = input.stock {
            active.stock = Set(stock);
        }
        if let Some(category) = input.category {
            active.category = Set(Some(category));
        }
        if let Some(image_url) = input.image_url {
            active.image_url = Set(Some(image_url));
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }

        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.product_repo.update(active).await
    }

    /// Delete a product.
    pub async fn delete(&self, actor: &account::Model, id: &str) -> AppResult<()> {
        authorize(actor, Capability::ManageProducts)?;

        let product = self.product_repo.get_by_id(id).await?;
        self.product_repo.delete(product).await?;

        tracing::info!(product_id = id, actor_id = %actor.id, "Product deleted");

        Ok(())
    }

    /// Get a product by ID.
    pub async fn get(&self, id: &str) -> AppResult<product::Model> {
        self.product_repo.get_by_id(id).await
    }

    /// List products. Consumers see active products only.
    pub async fn list(
        &self,
        active_only: bool,
        category: Option<&str>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<product::Model>> {
        self.product_repo
            .list(active_only, category, limit, offset)
            .await
    }
}

fn ensure_non_negative_price(price: Decimal) -> AppResult<()> {
    if price.is_sign_negative() {
        return Err(AppError::Validation("Price must not be negative".to_string()));
    }
    Ok(())
}
