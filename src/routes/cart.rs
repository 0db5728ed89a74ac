use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::Redirect,
    routing::{get, patch, post, put},
};
use rust_decimal::Decimal;

use crate::{
    cache::CART_ITEMS_KEY,
    dto::{
        cart::{
            CartList, CollectionDiscountRequest, ItemSizeQuery, ReplacePersistedRequest,
            UpdateQuantityRequest,
        },
        page::{CartPageQuery, CartPageView, CheckoutQuery, Viewport},
    },
    error::{AppError, AppResult},
    models::{CartItem, QuantityKey},
    navigation::RedirectNavigator,
    response::{ApiResponse, Meta},
    services::cart_page::CartPageSession,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/page", get(cart_page))
        .route("/items", get(cart_list).post(add_item).delete(clear_cart))
        .route("/items/{id}", patch(update_quantity).delete(remove_item))
        .route("/persisted", put(replace_persisted))
        .route("/collections/{slug}/discount", put(set_collection_discount))
        .route("/checkout", post(checkout))
}

#[utoipa::path(
    get,
    path = "/api/cart/page",
    params(
        ("lang" = Option<String>, Query, description = "ru or uz, defaults to the configured language"),
        ("viewport_width" = Option<u32>, Query, description = "Viewport width in px; desktop rows from 768"),
        ("hydrated" = Option<bool>, Query, description = "Render with live totals as after client mount")
    ),
    responses(
        (status = 200, description = "Shopping cart page view", body = ApiResponse<CartPageView>),
        (status = 400, description = "Cart total out of range"),
    ),
    tag = "Cart"
)]
pub async fn cart_page(
    State(state): State<AppState>,
    Query(query): Query<CartPageQuery>,
) -> AppResult<Json<ApiResponse<CartPageView>>> {
    let language = query.lang.unwrap_or(state.default_language);
    let viewport = query
        .viewport_width
        .map(Viewport::from_width)
        .unwrap_or_default();

    let session = CartPageSession::new(state.page.clone(), language, viewport);
    if query.hydrated.unwrap_or(false) {
        session.mount();
    }
    let view = session.render()?;

    let meta = Meta::new(state.store.len(), language);
    Ok(Json(ApiResponse::success("OK", view, Some(meta))))
}

#[utoipa::path(
    get,
    path = "/api/cart/items",
    responses(
        (status = 200, description = "Local cart contents; marks the cached cart fresh", body = ApiResponse<CartList>)
    ),
    tag = "Cart"
)]
pub async fn cart_list(State(state): State<AppState>) -> Json<ApiResponse<CartList>> {
    let items = state.store.cart();
    state.cache.mark_fresh(CART_ITEMS_KEY);
    let meta = Meta::count(items.len());
    Json(ApiResponse::success("OK", CartList { items }, Some(meta)))
}

#[utoipa::path(
    post,
    path = "/api/cart/items",
    request_body = CartItem,
    responses(
        (status = 200, description = "Add an item or grow an existing line", body = ApiResponse<CartList>),
        (status = 400, description = "Bad request"),
    ),
    tag = "Cart"
)]
pub async fn add_item(
    State(state): State<AppState>,
    Json(item): Json<CartItem>,
) -> AppResult<Json<ApiResponse<CartList>>> {
    if item.quantity == 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }
    if item.price.is_sign_negative() {
        return Err(AppError::BadRequest("price must not be negative".to_string()));
    }
    if item
        .discount_percent
        .is_some_and(|p| p < Decimal::ZERO || p > Decimal::ONE_HUNDRED)
    {
        return Err(AppError::BadRequest(
            "discountPercent must be between 0 and 100".to_string(),
        ));
    }

    tracing::debug!(id = item.id, slug = %item.slug, quantity = item.quantity, "cart item added");
    state.store.add_item(item)?;

    let items = state.store.cart();
    let meta = Meta::count(items.len());
    Ok(Json(ApiResponse::success("OK", CartList { items }, Some(meta))))
}

#[utoipa::path(
    patch,
    path = "/api/cart/items/{id}",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Set the local quantity; zero removes the line", body = ApiResponse<CartList>),
        (status = 400, description = "Cart total out of range"),
        (status = 404, description = "Cart line not found"),
    ),
    tag = "Cart"
)]
pub async fn update_quantity(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> AppResult<Json<ApiResponse<CartList>>> {
    let key = QuantityKey::new(id, payload.size_id);
    if !state.store.set_quantity(key, payload.quantity)? {
        return Err(AppError::NotFound);
    }

    let items = state.store.cart();
    let meta = Meta::count(items.len());
    Ok(Json(ApiResponse::success("OK", CartList { items }, Some(meta))))
}

#[utoipa::path(
    delete,
    path = "/api/cart/items/{id}",
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("size_id" = Option<i64>, Query, description = "Size ID of the line")
    ),
    responses(
        (status = 200, description = "OK", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Cart line not found"),
    ),
    tag = "Cart"
)]
pub async fn remove_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ItemSizeQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    if !state.store.remove_item(QuantityKey::new(id, query.size_id)) {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::success(
        "Removed from cart",
        serde_json::json!({}),
        Some(Meta::count(state.store.len())),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/cart/items",
    responses(
        (status = 200, description = "Empty the local cart", body = ApiResponse<serde_json::Value>),
    ),
    tag = "Cart"
)]
pub async fn clear_cart(State(state): State<AppState>) -> Json<ApiResponse<serde_json::Value>> {
    let removed = state.store.clear();
    tracing::debug!(removed, "cart cleared");
    Json(ApiResponse::success(
        "Cart cleared",
        serde_json::json!({ "removed": removed }),
        Some(Meta::count(0)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/cart/persisted",
    request_body = ReplacePersistedRequest,
    responses(
        (status = 200, description = "Replace quantities confirmed by the cart service", body = ApiResponse<serde_json::Value>),
        (status = 400, description = "Bad request"),
    ),
    tag = "Cart"
)]
pub async fn replace_persisted(
    State(state): State<AppState>,
    Json(payload): Json<ReplacePersistedRequest>,
) -> Json<ApiResponse<serde_json::Value>> {
    let lines = payload.quantities.len();
    state.store.replace_api_quantities(payload.quantities);
    Json(ApiResponse::success(
        "OK",
        serde_json::json!({ "lines": lines }),
        Some(Meta::count(lines)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/cart/collections/{slug}/discount",
    params(
        ("slug" = String, Path, description = "Collection slug")
    ),
    request_body = CollectionDiscountRequest,
    responses(
        (status = 200, description = "Set the collection discount percent", body = ApiResponse<serde_json::Value>),
        (status = 400, description = "Bad request"),
    ),
    tag = "Cart"
)]
pub async fn set_collection_discount(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<CollectionDiscountRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    if payload.percent < Decimal::ZERO || payload.percent > Decimal::ONE_HUNDRED {
        return Err(AppError::BadRequest(
            "percent must be between 0 and 100".to_string(),
        ));
    }
    state.store.set_collection_discount(slug.clone(), payload.percent);
    Ok(Json(ApiResponse::success(
        "OK",
        serde_json::json!({ "collection": slug, "percent": payload.percent }),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/api/cart/checkout",
    params(
        ("lang" = Option<String>, Query, description = "Language of the sync notifications")
    ),
    responses(
        (status = 303, description = "Quantity sync started; redirect to the checkout route"),
    ),
    tag = "Cart"
)]
pub async fn checkout(
    State(state): State<AppState>,
    Query(query): Query<CheckoutQuery>,
) -> Redirect {
    let language = query.lang.unwrap_or(state.default_language);
    let navigator = RedirectNavigator::new();
    let outcome = state.page.checkout(language, &navigator);
    tracing::info!(
        checkout_id = %outcome.checkout_id,
        scheduled = outcome.scheduled.len(),
        "redirecting to checkout"
    );
    let route = navigator.into_target().unwrap_or(outcome.route);
    Redirect::to(&route)
}
