//! Booking endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use pairly_common::AppResult;
use pairly_core::CreateBookingInput;
use pairly_db::entities::booking::{self, BookingStatus};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthAccount, middleware::AppState, response::ApiResponse};

/// Booking response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: String,
    pub event_id: String,
    pub account_id: String,
    pub couple_id: Option<String>,
    pub party_size: i32,
    pub status: BookingStatus,
    pub created_at: String,
}

impl From<booking::Model> for BookingResponse {
    fn from(b: booking::Model) -> Self {
        Self {
            id: b.id,
            event_id: b.event_id,
            account_id: b.account_id,
            couple_id: b.couple_id,
            party_size: b.party_size,
            status: b.status,
            created_at: b.created_at.to_rfc3339(),
        }
    }
}

/// List bookings request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBookingsRequest {
    /// Admins may list every account's bookings.
    #[serde(default)]
    pub all: bool,
    #[serde(default)]
    pub status: Option<BookingStatus>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

const fn default_limit() -> u64 {
    20
}

/// Request a booking.
async fn create_booking(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Json(input): Json<CreateBookingInput>,
) -> AppResult<ApiResponse<BookingResponse>> {
    let booking = state.booking_service.book(&account, input).await?;
    Ok(ApiResponse::ok(booking.into()))
}

/// List bookings: the caller's own, or all with `all=true` (admin).
async fn list_bookings(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Query(req): Query<ListBookingsRequest>,
) -> AppResult<ApiResponse<Vec<BookingResponse>>> {
    let bookings = if req.all {
        state
            .booking_service
            .list(&account, req.status, req.limit, req.offset)
            .await?
    } else {
        state
            .booking_service
            .list_own(&account, req.limit, req.offset)
            .await?
    };

    Ok(ApiResponse::ok(bookings.into_iter().map(Into::into).collect()))
}

/// Get one booking.
async fn get_booking(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<BookingResponse>> {
    let booking = state.booking_service.get(&account, &id).await?;
    Ok(ApiResponse::ok(booking.into()))
}

/// Confirm a pending booking.
async fn confirm_booking(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<BookingResponse>> {
    let booking = state.booking_service.confirm(&actor, &id).await?;
    Ok(ApiResponse::ok(booking.into()))
}

/// Cancel a booking.
async fn cancel_booking(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<BookingResponse>> {
    let booking = state.booking_service.cancel(&actor, &id).await?;
    Ok(ApiResponse::ok(booking.into()))
}

/// Complete a confirmed booking.
async fn complete_booking(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<BookingResponse>> {
    let booking = state.booking_service.complete(&actor, &id).await?;
    Ok(ApiResponse::ok(booking.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_booking))
        .route("/", get(list_bookings))
        .route("/{id}", get(get_booking))
        .route("/{id}/confirm", post(confirm_booking))
        .route("/{id}/cancel", post(cancel_booking))
        .route("/{id}/complete", post(complete_booking))
}
