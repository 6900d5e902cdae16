//! Reports endpoints.

use axum::{Router, extract::State, routing::get};
use pairly_common::AppResult;
use pairly_core::ReportSummary;

use crate::{extractors::AuthAccount, middleware::AppState, response::ApiResponse};

/// Admin dashboard summary.
async fn summary(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<ReportSummary>> {
    let summary = state.reports_service.summary(&actor).await?;
    Ok(ApiResponse::ok(summary))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/summary", get(summary))
}
