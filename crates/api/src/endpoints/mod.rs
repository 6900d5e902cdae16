//! API endpoints.

mod accounts;
mod admin_team;
mod auth;
mod bookings;
mod couples;
mod events;
mod orders;
mod products;
mod reports;
mod wishlist;

pub use accounts::AccountResponse;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/accounts", accounts::router())
        .nest("/admin/team", admin_team::router())
        .nest("/products", products::router())
        .nest("/orders", orders::router())
        .nest("/events", events::router())
        .nest("/bookings", bookings::router())
        .nest("/couples", couples::router())
        .nest("/wishlist", wishlist::router())
        .nest("/reports", reports::router())
}
