//! Event endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, patch, post},
};
use pairly_common::{AppError, AppResult};
use pairly_core::{Capability, CreateEventInput, UpdateEventInput, authorize};
use pairly_db::entities::{account, event};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{AuthAccount, MaybeAuthAccount},
    middleware::AppState,
    response::{ApiResponse, ok},
};

/// Event response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: String,
    pub ends_at: Option<String>,
    pub capacity: i32,
    pub price: Decimal,
    pub is_published: bool,
    pub created_at: String,
}

impl From<event::Model> for EventResponse {
    fn from(e: event::Model) -> Self {
        Self {
            id: e.id,
            title: e.title,
            description: e.description,
            location: e.location,
            starts_at: e.starts_at.to_rfc3339(),
            ends_at: e.ends_at.map(|t| t.to_rfc3339()),
            capacity: e.capacity,
            price: e.price,
            is_published: e.is_published,
            created_at: e.created_at.to_rfc3339(),
        }
    }
}

/// List events request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsRequest {
    /// Event managers may include unpublished events.
    #[serde(default)]
    pub include_unpublished: bool,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

const fn default_limit() -> u64 {
    20
}

fn manages_events(actor: Option<&account::Model>) -> bool {
    actor.is_some_and(|a| authorize(a, Capability::ManageEvents).is_ok())
}

/// List events. Consumers see published events only.
async fn list_events(
    MaybeAuthAccount(actor): MaybeAuthAccount,
    State(state): State<AppState>,
    Query(req): Query<ListEventsRequest>,
) -> AppResult<ApiResponse<Vec<EventResponse>>> {
    let published_only = !(req.include_unpublished && manages_events(actor.as_ref()));

    let events = state
        .event_service
        .list(published_only, req.limit, req.offset)
        .await?;

    Ok(ApiResponse::ok(events.into_iter().map(Into::into).collect()))
}

/// Get one event. Unpublished events are hidden from consumers.
async fn get_event(
    MaybeAuthAccount(actor): MaybeAuthAccount,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<EventResponse>> {
    let event = state.event_service.get(&id).await?;

    if !event.is_published && !manages_events(actor.as_ref()) {
        return Err(AppError::NotFound(format!("Event {id} not found")));
    }

    Ok(ApiResponse::ok(event.into()))
}

/// Create an event.
async fn create_event(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
    Json(input): Json<CreateEventInput>,
) -> AppResult<ApiResponse<EventResponse>> {
    let event = state.event_service.create(&actor, input).await?;
    Ok(ApiResponse::ok(event.into()))
}

/// Update an event.
async fn update_event(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateEventInput>,
) -> AppResult<ApiResponse<EventResponse>> {
    let event = state.event_service.update(&actor, &id, input).await?;
    Ok(ApiResponse::ok(event.into()))
}

/// Delete an event.
async fn delete_event(
    AuthAccount(actor): AuthAccount,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl axum::response::IntoResponse> {
    state.event_service.delete(&actor, &id).await?;
    Ok(ok())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events))
        .route("/", post(create_event))
        .route("/{id}", get(get_event))
        .route("/{id}", patch(update_event))
        .route("/{id}", delete(delete_event))
}
