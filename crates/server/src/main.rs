//! Pairly server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, middleware};
use pairly_api::{AppState, auth_middleware, router as api_router};
use pairly_common::Config;
use pairly_core::{
    AccountService, AdminTeamService, BookingService, CoupleService, EventService, OrderService,
    ProductService, ReportsService, WishlistService,
};
use pairly_db::repositories::{
    AccountRepository, BookingRepository, CoupleRepository, EventRepository, OrderRepository,
    ProductRepository, WishlistRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pairly=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting pairly server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = pairly_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    pairly_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let account_repo = AccountRepository::new(Arc::clone(&db));
    let couple_repo = CoupleRepository::new(Arc::clone(&db));
    let product_repo = ProductRepository::new(Arc::clone(&db));
    let order_repo = OrderRepository::new(Arc::clone(&db));
    let event_repo = EventRepository::new(Arc::clone(&db));
    let booking_repo = BookingRepository::new(Arc::clone(&db));
    let wishlist_repo = WishlistRepository::new(Arc::clone(&db));

    // Initialize services
    let account_service = AccountService::new(account_repo.clone(), couple_repo.clone(), &config);
    let admin_team_service = AdminTeamService::new(account_repo.clone());
    let product_service = ProductService::new(product_repo.clone());
    let order_service = OrderService::new(order_repo.clone(), product_repo.clone());
    let event_service = EventService::new(event_repo.clone());
    let booking_service = BookingService::new(booking_repo.clone(), event_repo.clone());
    let couple_service = CoupleService::new(couple_repo.clone(), account_repo.clone());
    let wishlist_service = WishlistService::new(wishlist_repo, product_repo.clone());
    let reports_service = ReportsService::new(
        account_repo,
        couple_repo,
        product_repo,
        event_repo,
        order_repo,
        booking_repo,
    );

    // Create app state
    let state = AppState {
        account_service,
        admin_team_service,
        product_service,
        order_service,
        event_service,
        booking_service,
        couple_service,
        wishlist_service,
        reports_service,
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
