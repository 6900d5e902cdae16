//! Wishlist endpoints.

use axum::{
    Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use pairly_common::AppResult;
use pairly_db::entities::wishlist_item;
use serde::Serialize;

use crate::{
    extractors::AuthAccount,
    middleware::AppState,
    response::{ApiResponse, ok},
};

/// Wishlist entry response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItemResponse {
    pub id: String,
    pub product_id: String,
    pub created_at: String,
}

impl From<wishlist_item::Model> for WishlistItemResponse {
    fn from(item: wishlist_item::Model) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id,
            created_at: item.created_at.to_rfc3339(),
        }
    }
}

/// List the calling account's wishlist.
async fn list_wishlist(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<WishlistItemResponse>>> {
    let items = state.wishlist_service.list(&account).await?;
    Ok(ApiResponse::ok(items.into_iter().map(Into::into).collect()))
}

/// Add a product to the wishlist.
async fn add_to_wishlist(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> AppResult<ApiResponse<WishlistItemResponse>> {
    let item = state.wishlist_service.add(&account, &product_id).await?;
    Ok(ApiResponse::ok(item.into()))
}

/// Remove a product from the wishlist.
async fn remove_from_wishlist(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.wishlist_service.remove(&account, &product_id).await?;
    Ok(ok())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_wishlist))
        .route("/{product_id}", post(add_to_wishlist))
        .route("/{product_id}", delete(remove_from_wishlist))
}
