use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::cart::CacheState,
    notify::Notification,
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct NotificationList {
    #[schema(value_type = Vec<Notification>)]
    pub items: Vec<Notification>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(drain_notifications))
}

pub fn cache_router() -> Router<AppState> {
    Router::new().route("/{key}", get(cache_state))
}

#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "Drain pending user notifications", body = ApiResponse<NotificationList>)
    ),
    tag = "Notifications"
)]
pub async fn drain_notifications(
    State(state): State<AppState>,
) -> Json<ApiResponse<NotificationList>> {
    let items = state.notifications.drain();
    let meta = Meta::count(items.len());
    Json(ApiResponse::success("OK", NotificationList { items }, Some(meta)))
}

#[utoipa::path(
    get,
    path = "/api/cache/{key}",
    params(
        ("key" = String, Path, description = "Query cache key, e.g. cartItemsData")
    ),
    responses(
        (status = 200, description = "Staleness of a cached query", body = ApiResponse<CacheState>)
    ),
    tag = "Notifications"
)]
pub async fn cache_state(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<ApiResponse<CacheState>> {
    let entry = state.cache.entry(&key);
    Json(ApiResponse::success("OK", CacheState { key, entry }, Some(Meta::empty())))
}
