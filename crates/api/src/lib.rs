//! HTTP API layer for pairly.
//!
//! REST endpoints for accounts, the admin team, the product catalogue,
//! orders, events, bookings, couples, and wishlists. Built on Axum 0.8
//! with a Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::{AppState, auth_middleware};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::Utc;
    use pairly_common::config::{AccountConfig, Config, DatabaseConfig, ServerConfig};
    use pairly_core::{
        AccountService, AdminTeamService, BookingService, CoupleService, EventService,
        OrderService, ProductService, ReportsService, WishlistService,
    };
    use pairly_db::entities::{
        account::{self, AccountStatus, AdminRole, AuthProvider, PermissionSet, Role},
        event, product,
    };
    use pairly_db::repositories::{
        AccountRepository, BookingRepository, CoupleRepository, EventRepository, OrderRepository,
        ProductRepository, WishlistRepository,
    };
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn empty_db() -> Arc<DatabaseConnection> {
        Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    fn test_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                url: "https://example.com".to_string(),
            },
            database: DatabaseConfig {
                url: "postgres://localhost/test".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            accounts: AccountConfig {
                min_password_length: 6,
            },
        }
    }

    fn test_state(
        account_db: Arc<DatabaseConnection>,
        product_db: Arc<DatabaseConnection>,
        event_db: Arc<DatabaseConnection>,
    ) -> AppState {
        let config = test_config();
        let account_repo = AccountRepository::new(account_db);
        let couple_repo = CoupleRepository::new(empty_db());
        let product_repo = ProductRepository::new(product_db);
        let order_repo = OrderRepository::new(empty_db());
        let event_repo = EventRepository::new(event_db);
        let booking_repo = BookingRepository::new(empty_db());
        let wishlist_repo = WishlistRepository::new(empty_db());

        AppState {
            account_service: AccountService::new(
                account_repo.clone(),
                couple_repo.clone(),
                &config,
            ),
            admin_team_service: AdminTeamService::new(account_repo.clone()),
            product_service: ProductService::new(product_repo.clone()),
            order_service: OrderService::new(order_repo.clone(), product_repo.clone()),
            event_service: EventService::new(event_repo.clone()),
            booking_service: BookingService::new(booking_repo.clone(), event_repo.clone()),
            couple_service: CoupleService::new(couple_repo.clone(), account_repo.clone()),
            wishlist_service: WishlistService::new(wishlist_repo, product_repo.clone()),
            reports_service: ReportsService::new(
                account_repo,
                couple_repo,
                product_repo,
                event_repo,
                order_repo,
                booking_repo,
            ),
        }
    }

    fn test_app(state: AppState) -> Router {
        Router::new()
            .nest("/api", router())
            .layer(axum::middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            ))
            .with_state(state)
    }

    fn super_admin_with_no_flags(token: &str) -> account::Model {
        account::Model {
            id: "root1".to_string(),
            email: "root@example.com".to_string(),
            email_lower: "root@example.com".to_string(),
            password_hash: None,
            provider: AuthProvider::Email,
            email_verified: true,
            status: AccountStatus::Approved,
            role: Role::Admin,
            admin_role: Some(AdminRole::SuperAdmin),
            permissions: PermissionSet::default(),
            name: None,
            token: Some(token.to_string()),
            approved_by: None,
            approved_at: None,
            review_note: None,
            added_by: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn inactive_product(id: &str) -> product::Model {
        product::Model {
            id: id.to_string(),
            name: "Retired Box".to_string(),
            description: None,
            price: Decimal::new(2999, 2),
            stock: 0,
            category: None,
            image_url: None,
            is_active: false,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn unpublished_event(id: &str) -> event::Model {
        event::Model {
            id: id.to_string(),
            title: "Draft Retreat".to_string(),
            description: None,
            location: None,
            starts_at: Utc::now().into(),
            ends_at: None,
            capacity: 20,
            price: Decimal::new(7500, 2),
            is_published: false,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let app = test_app(test_state(empty_db(), empty_db(), empty_db()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/reports/summary")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_inactive_product_hidden_from_consumers() {
        let product_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[inactive_product("p1")]])
                .into_connection(),
        );
        let app = test_app(test_state(empty_db(), product_db, empty_db()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/products/p1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_super_admin_sees_unpublished_event_despite_narrowed_flags() {
        let account_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[super_admin_with_no_flags("tok1")]])
                .into_connection(),
        );
        let event_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[unpublished_event("e1")]])
                .into_connection(),
        );
        let app = test_app(test_state(account_db, empty_db(), event_db));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/events/e1")
                    .header("Authorization", "Bearer tok1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
