//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use pairly_core::{
    AccountService, AdminTeamService, BookingService, CoupleService, EventService, OrderService,
    ProductService, ReportsService, WishlistService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService,
    pub admin_team_service: AdminTeamService,
    pub product_service: ProductService,
    pub order_service: OrderService,
    pub event_service: EventService,
    pub booking_service: BookingService,
    pub couple_service: CoupleService,
    pub wishlist_service: WishlistService,
    pub reports_service: ReportsService,
}

/// Authentication middleware.
///
/// Resolves a bearer token to an account and stores it in request
/// extensions. Handlers that require authentication reject through the
/// `AuthAccount` extractor; everything else proceeds anonymously.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(account) = state.account_service.authenticate_by_token(token).await
    {
        req.extensions_mut().insert(account);
    }

    next.run(req).await
}
