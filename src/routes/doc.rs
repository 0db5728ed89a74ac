use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    cache::CacheEntry,
    dto::{
        cart::{
            AdjustQuantityRequest, CacheState, CartList, CollectionDiscountRequest,
            ReplacePersistedRequest, UpdateQuantityRequest,
        },
        page::{
            CartBody, CartPageView, CartRowView, ColumnHeaders, DesktopRow, MobileRow, RenderPhase,
            RowView, Viewport,
        },
    },
    i18n::Language,
    models::CartItem,
    notify::{Notification, NotificationLevel},
    response::{ApiResponse, Meta},
    routes::{cart, health, notifications},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        cart::cart_page,
        cart::cart_list,
        cart::add_item,
        cart::clear_cart,
        cart::update_quantity,
        cart::remove_item,
        cart::replace_persisted,
        cart::set_collection_discount,
        cart::checkout,
        notifications::drain_notifications,
        notifications::cache_state
    ),
    components(
        schemas(
            CartItem,
            CartList,
            AdjustQuantityRequest,
            UpdateQuantityRequest,
            ReplacePersistedRequest,
            CollectionDiscountRequest,
            CacheEntry,
            CacheState,
            CartPageView,
            CartBody,
            CartRowView,
            RowView,
            DesktopRow,
            MobileRow,
            ColumnHeaders,
            RenderPhase,
            Viewport,
            Language,
            Notification,
            NotificationLevel,
            notifications::NotificationList,
            health::HealthData,
            Meta,
            ApiResponse<CartPageView>,
            ApiResponse<CartList>,
            ApiResponse<notifications::NotificationList>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Cart", description = "Cart page, local cart and checkout"),
        (name = "Notifications", description = "User notifications and query cache state"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
