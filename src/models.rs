use std::{collections::HashMap, fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: i64,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_slug: Option<String>,
    pub name_ru: String,
    pub name_uz: String,
    #[schema(value_type = String, example = "100.00")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "10")]
    pub discount_percent: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_name_ru: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub images_list: Vec<String>,
}

impl CartItem {
    pub fn quantity_key(&self) -> QuantityKey {
        QuantityKey::new(self.id, self.size_id)
    }
}

/// Identity of a cart line as the remote cart service knows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuantityKey {
    pub item_id: i64,
    pub size_id: Option<i64>,
}

impl QuantityKey {
    pub fn new(item_id: i64, size_id: Option<i64>) -> Self {
        Self { item_id, size_id }
    }
}

impl fmt::Display for QuantityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.size_id {
            Some(size_id) => write!(f, "{}-{}", self.item_id, size_id),
            None => write!(f, "{}-", self.item_id),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid quantity key `{0}`")]
pub struct InvalidQuantityKey(pub String);

impl FromStr for QuantityKey {
    type Err = InvalidQuantityKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidQuantityKey(s.to_string());
        let (id, size) = s.split_once('-').ok_or_else(invalid)?;
        let item_id = id.trim().parse::<i64>().map_err(|_| invalid())?;
        let size_id = match size.trim() {
            "" | "null" | "undefined" => None,
            size => Some(size.parse::<i64>().map_err(|_| invalid())?),
        };
        Ok(Self { item_id, size_id })
    }
}

impl Serialize for QuantityKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QuantityKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Quantities last confirmed by the remote cart service.
pub type PersistedQuantities = HashMap<QuantityKey, u32>;
