//! Authentication endpoints.

use axum::{Json, Router, extract::State, routing::get, routing::post};
use pairly_common::AppResult;
use pairly_core::{AuthenticateInput, RegisterInput};
use pairly_db::entities::account::AuthProvider;
use serde::{Deserialize, Serialize};

use crate::{
    endpoints::AccountResponse, extractors::AuthAccount, middleware::AppState,
    response::ApiResponse,
};

/// Signup request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

/// Register a new account. It stays pending until an admin approves it.
async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> AppResult<ApiResponse<AccountResponse>> {
    let account = state
        .account_service
        .register(RegisterInput {
            email: req.email,
            password: Some(req.password),
            provider: AuthProvider::Email,
            name: req.name,
        })
        .await?;

    Ok(ApiResponse::ok(account.into()))
}

/// Signin request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Signin response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninResponse {
    pub account: AccountResponse,
    pub token: String,
}

/// Sign in to an existing account.
async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SigninRequest>,
) -> AppResult<ApiResponse<SigninResponse>> {
    let (account, token) = state
        .account_service
        .authenticate(AuthenticateInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(ApiResponse::ok(SigninResponse {
        account: account.into(),
        token,
    }))
}

/// The calling account's own profile.
async fn me(AuthAccount(account): AuthAccount) -> ApiResponse<AccountResponse> {
    ApiResponse::ok(account.into())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/signin", post(signin))
        .route("/auth/me", get(me))
}
