//! Couple endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, post},
};
use pairly_common::AppResult;
use pairly_core::LinkCoupleInput;
use pairly_db::entities::couple::{self, CoupleStatus};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthAccount, middleware::AppState, response::ApiResponse};

/// Couple response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoupleResponse {
    pub id: String,
    pub partner_one_id: String,
    pub partner_two_id: String,
    pub status: CoupleStatus,
    pub created_at: String,
}

impl From<couple::Model> for CoupleResponse {
    fn from(c: couple::Model) -> Self {
        Self {
            id: c.id,
            partner_one_id: c.partner_one_id,
            partner_two_id: c.partner_two_id,
            status: c.status,
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// List couples request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCouplesRequest {
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

const fn default_limit() -> u64 {
    20
}

/// Set couple status request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCoupleStatusRequest {
    pub status: CoupleStatus,
}

/// The calling account's couple.
async fn get_own_couple(
    AuthAccount(account): AuthAccount,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<CoupleResponse>> {
    let couple = state.couple_service.get_own(&account).await?;
    Ok(ApiResponse::ok(couple.into()))
}

/// Link two accounts as a couple.
async fn link_couple(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
    Json(input): Json<LinkCoupleInput>,
) -> AppResult<ApiResponse<CoupleResponse>> {
    let couple = state.couple_service.link(&actor, input).await?;
    Ok(ApiResponse::ok(couple.into()))
}

/// Set a couple's status.
async fn set_couple_status(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SetCoupleStatusRequest>,
) -> AppResult<ApiResponse<CoupleResponse>> {
    let couple = state
        .couple_service
        .set_status(&actor, &id, req.status)
        .await?;

    Ok(ApiResponse::ok(couple.into()))
}

/// List couples (admin view).
async fn list_couples(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
    Query(req): Query<ListCouplesRequest>,
) -> AppResult<ApiResponse<Vec<CoupleResponse>>> {
    let couples = state
        .couple_service
        .list(&actor, req.limit, req.offset)
        .await?;

    Ok(ApiResponse::ok(couples.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_couples))
        .route("/me", get(get_own_couple))
        .route("/link", post(link_couple))
        .route("/{id}/status", patch(set_couple_status))
}
