//! Order endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, post},
};
use pairly_common::AppResult;
use pairly_core::PlaceOrderInput;
use pairly_db::entities::order::{self, OrderItem, OrderStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthAccount, middleware::AppState, response::ApiResponse};

/// Order response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    pub account_id: String,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub shipping_address: Option<String>,
    pub created_at: String,
}

impl From<order::Model> for OrderResponse {
    fn from(o: order::Model) -> Self {
        Self {
            id: o.id,
            account_id: o.account_id,
            items: o.items.0,
            total: o.total,
            status: o.status,
            shipping_address: o.shipping_address,
            created_at: o.created_at.to_rfc3339(),
        }
    }
}

/// List orders request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersRequest {
    /// Admins may list every account's orders.
    #[serde(default)]
    pub all: bool,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

const fn default_limit() -> u64 {
    20
}

/// Update order status request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

/// Place an order.
async fn place_order(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Json(input): Json<PlaceOrderInput>,
) -> AppResult<ApiResponse<OrderResponse>> {
    let order = state.order_service.place(&account, input).await?;
    Ok(ApiResponse::ok(order.into()))
}

/// List orders: the caller's own, or all with `all=true` (admin).
async fn list_orders(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Query(req): Query<ListOrdersRequest>,
) -> AppResult<ApiResponse<Vec<OrderResponse>>> {
    let orders = if req.all {
        state
            .order_service
            .list(&account, req.status, req.limit, req.offset)
            .await?
    } else {
        state
            .order_service
            .list_own(&account, req.limit, req.offset)
            .await?
    };

    Ok(ApiResponse::ok(orders.into_iter().map(Into::into).collect()))
}

/// Get one order.
async fn get_order(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<OrderResponse>> {
    let order = state.order_service.get(&account, &id).await?;
    Ok(ApiResponse::ok(order.into()))
}

/// Cancel an order. Owners may cancel while it is still pending.
async fn cancel_order(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<OrderResponse>> {
    let order = state.order_service.cancel(&actor, &id).await?;
    Ok(ApiResponse::ok(order.into()))
}

/// Advance an order's fulfilment status.
async fn update_order_status(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateOrderStatusRequest>,
) -> AppResult<ApiResponse<OrderResponse>> {
    let order = state
        .order_service
        .update_status(&actor, &id, req.status)
        .await?;

    Ok(ApiResponse::ok(order.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(place_order))
        .route("/", get(list_orders))
        .route("/{id}", get(get_order))
        .route("/{id}/cancel", post(cancel_order))
        .route("/{id}/status", patch(update_order_status))
}
