use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    cache::CART_ITEMS_KEY,
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Serialize, ToSchema)]
pub struct HealthData {
    pub status: String,
    pub cart_lines: usize,
    pub pending_notifications: usize,
    pub cart_cache_stale: bool,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service liveness and cart summary", body = ApiResponse<HealthData>),
    ),
    tag = "Health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthData>> {
    let data = HealthData {
        status: "ok".to_string(),
        cart_lines: state.store.len(),
        pending_notifications: state.notifications.len(),
        cart_cache_stale: state.cache.is_stale(CART_ITEMS_KEY),
    };

    Json(ApiResponse::success("Health check", data, Some(Meta::empty())))
}
