//! Account moderation endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use pairly_common::AppResult;
use pairly_core::{Capability, ReviewInput, authorize};
use pairly_db::entities::account::{
    self, AccountStatus, AdminRole, AuthProvider, PermissionSet, Role,
};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthAccount, middleware::AppState, response::ApiResponse};

/// Account response. Credentials and tokens are never exposed.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub provider: AuthProvider,
    pub email_verified: bool,
    pub status: AccountStatus,
    pub role: Role,
    pub admin_role: Option<AdminRole>,
    pub permissions: PermissionSet,
    pub approved_by: Option<String>,
    pub approved_at: Option<String>,
    pub review_note: Option<String>,
    pub created_at: String,
}

impl From<account::Model> for AccountResponse {
    fn from(account: account::Model) -> Self {
        Self {
            id: account.id,
            email: account.email,
            name: account.name,
            provider: account.provider,
            email_verified: account.email_verified,
            status: account.status,
            role: account.role,
            admin_role: account.admin_role,
            permissions: account.permissions,
            approved_by: account.approved_by,
            approved_at: account.approved_at.map(|t| t.to_rfc3339()),
            review_note: account.review_note,
            created_at: account.created_at.to_rfc3339(),
        }
    }
}

/// List accounts request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAccountsRequest {
    #[serde(default)]
    pub status: Option<AccountStatus>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

const fn default_limit() -> u64 {
    20
}

/// Review request carrying an optional moderation note.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub note: Option<String>,
}

/// Set email-verified request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetEmailVerifiedRequest {
    pub verified: bool,
}

/// List accounts, optionally filtered by lifecycle status.
async fn list_accounts(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
    Query(req): Query<ListAccountsRequest>,
) -> AppResult<ApiResponse<Vec<AccountResponse>>> {
    authorize(&actor, Capability::ManageUsers)?;

    let accounts = state
        .account_service
        .list(req.status, req.limit, req.offset)
        .await?;

    Ok(ApiResponse::ok(accounts.into_iter().map(Into::into).collect()))
}

/// Get one account.
async fn get_account(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<AccountResponse>> {
    authorize(&actor, Capability::ManageUsers)?;

    let account = state.account_service.get(&id).await?;
    Ok(ApiResponse::ok(account.into()))
}

/// Approve a pending account.
async fn approve_account(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ReviewRequest>,
) -> AppResult<ApiResponse<AccountResponse>> {
    authorize(&actor, Capability::ManageUsers)?;

    let account = state
        .account_service
        .approve(&actor.id, &id, ReviewInput { note: req.note })
        .await?;

    Ok(ApiResponse::ok(account.into()))
}

/// Reject a pending account.
async fn reject_account(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ReviewRequest>,
) -> AppResult<ApiResponse<AccountResponse>> {
    authorize(&actor, Capability::ManageUsers)?;

    let account = state
        .account_service
        .reject(&actor.id, &id, ReviewInput { note: req.note })
        .await?;

    Ok(ApiResponse::ok(account.into()))
}

/// Suspend an account.
async fn suspend_account(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ReviewRequest>,
) -> AppResult<ApiResponse<AccountResponse>> {
    authorize(&actor, Capability::ManageUsers)?;

    let account = state
        .account_service
        .suspend(&actor.id, &id, ReviewInput { note: req.note })
        .await?;

    Ok(ApiResponse::ok(account.into()))
}

/// Set the email-verified flag.
async fn set_email_verified(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SetEmailVerifiedRequest>,
) -> AppResult<ApiResponse<AccountResponse>> {
    authorize(&actor, Capability::ManageUsers)?;

    let account = state
        .account_service
        .set_email_verified(&id, req.verified)
        .await?;

    Ok(ApiResponse::ok(account.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_accounts))
        .route("/{id}", get(get_account))
        .route("/{id}/approve", post(approve_account))
        .route("/{id}/reject", post(reject_account))
        .route("/{id}/suspend", post(suspend_account))
        .route("/{id}/verify-email", post(set_email_verified))
}
