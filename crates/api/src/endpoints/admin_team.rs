//! Admin team endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, patch, post},
};
use pairly_common::AppResult;
use pairly_core::{GrantAdminRoleInput, PermissionOverlay};

use crate::{
    endpoints::AccountResponse, extractors::AuthAccount, middleware::AppState,
    response::ApiResponse,
};

/// List the admin team.
async fn list_admins(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<AccountResponse>>> {
    let admins = state.admin_team_service.list_admins(&actor).await?;
    Ok(ApiResponse::ok(admins.into_iter().map(Into::into).collect()))
}

/// Create a new admin account.
async fn grant_admin_role(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
    Json(input): Json<GrantAdminRoleInput>,
) -> AppResult<ApiResponse<AccountResponse>> {
    let granted = state.admin_team_service.grant_admin_role(&actor, input).await?;
    Ok(ApiResponse::ok(granted.into()))
}

/// Update an admin's permissions.
async fn update_permissions(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(overlay): Json<PermissionOverlay>,
) -> AppResult<ApiResponse<AccountResponse>> {
    let updated = state
        .admin_team_service
        .update_permissions(&actor, &id, overlay)
        .await?;

    Ok(ApiResponse::ok(updated.into()))
}

/// Revoke an admin's role.
async fn revoke_admin(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<AccountResponse>> {
    let revoked = state.admin_team_service.revoke_admin(&actor, &id).await?;
    Ok(ApiResponse::ok(revoked.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_admins))
        .route("/", post(grant_admin_role))
        .route("/{id}/permissions", patch(update_permissions))
        .route("/{id}", delete(revoke_admin))
}
