//! Product catalogue endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, patch, post},
};
use pairly_common::{AppError, AppResult};
use pairly_core::{Capability, CreateProductInput, UpdateProductInput, authorize};
use pairly_db::entities::{account, product};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{AuthAccount, MaybeAuthAccount},
    middleware::AppState,
    response::{ApiResponse, ok},
};

/// Product response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

impl From<product::Model> for ProductResponse {
    fn from(p: product::Model) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            stock: p.stock,
            category: p.category,
            image_url: p.image_url,
            is_active: p.is_active,
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// List products request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsRequest {
    #[serde(default)]
    pub category: Option<String>,
    /// Catalogue managers may include inactive products.
    #[serde(default)]
    pub include_inactive: bool,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

const fn default_limit() -> u64 {
    20
}

fn manages_products(actor: Option<&account::Model>) -> bool {
    actor.is_some_and(|a| authorize(a, Capability::ManageProducts).is_ok())
}

/// List products. Consumers see active products only.
async fn list_products(
    MaybeAuthAccount(actor): MaybeAuthAccount,
    State(state): State<AppState>,
    Query(req): Query<ListProductsRequest>,
) -> AppResult<ApiResponse<Vec<ProductResponse>>> {
    let active_only = !(req.include_inactive && manages_products(actor.as_ref()));

    let products = state
        .product_service
        .list(active_only, req.category.as_deref(), req.limit, req.offset)
        .await?;

    Ok(ApiResponse::ok(products.into_iter().map(Into::into).collect()))
}

/// Get one product. Inactive products are hidden from consumers.
async fn get_product(
    MaybeAuthAccount(actor): MaybeAuthAccount,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<ProductResponse>> {
    let product = state.product_service.get(&id).await?;

    if !product.is_active && !manages_products(actor.as_ref()) {
        return Err(AppError::NotFound(format!("Product {id} not found")));
    }

    Ok(ApiResponse::ok(product.into()))
}

/// Create a product.
async fn create_product(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<ApiResponse<ProductResponse>> {
    let product = state.product_service.create(&actor, input).await?;
    Ok(ApiResponse::ok(product.into()))
}

/// Update a product.
async fn update_product(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateProductInput>,
) -> AppResult<ApiResponse<ProductResponse>> {
    let product = state.product_service.update(&actor, &id, input).await?;
    Ok(ApiResponse::ok(product.into()))
}

/// Delete a product.
async fn delete_product(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.product_service.delete(&actor, &id).await?;
    Ok(ok())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/", post(create_product))
        .route("/{id}", get(get_product))
        .route("/{id}", patch(update_product))
        .route("/{id}", delete(delete_product))
}
