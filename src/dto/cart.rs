use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    cache::CacheEntry,
    models::{CartItem, PersistedQuantities},
};

/// Payload of the cart service's increment/decrement call.
///
/// `quantity` is a signed delta, never an absolute quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdjustQuantityRequest {
    pub slug: String,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_slug: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CartList {
    #[schema(value_type = Vec<CartItem>)]
    pub items: Vec<CartItem>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    pub size_id: Option<i64>,
    pub quantity: u32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ItemSizeQuery {
    pub size_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ReplacePersistedRequest {
    #[schema(value_type = Object)]
    pub quantities: PersistedQuantities,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CollectionDiscountRequest {
    #[schema(value_type = String, example = "15")]
    pub percent: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CacheState {
    pub key: String,
    #[serde(flatten)]
    pub entry: CacheEntry,
}
