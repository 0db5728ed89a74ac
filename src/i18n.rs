use std::{collections::HashMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::models::CartItem;

pub mod keys {
    pub const SHOPPING_CART: &str = "cart.shoppingCart";
    pub const PRODUCT: &str = "cart.product";
    pub const NUMBER: &str = "cart.number";
    pub const TOTAL: &str = "cart.total";
    pub const CART_EMPTY: &str = "cart.cartEmpty";
    pub const CART_UPDATED_SUCCESS: &str = "cart.cartUpdatedSuccess";
    pub const CART_UPDATED_ERROR: &str = "cart.cartUpdatedError";
    pub const MAKE_PAYMENT: &str = "checkout.makePayment";
    pub const SUM: &str = "productDetails.sum";
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    Uz,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::Uz => "uz",
        }
    }

    /// The item name shown to readers of this language.
    pub fn item_name<'a>(&self, item: &'a CartItem) -> &'a str {
        match self {
            Language::Ru => &item.name_ru,
            Language::Uz => &item.name_uz,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unsupported language `{0}`")]
pub struct UnsupportedLanguage(pub String);

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ru" => Ok(Language::Ru),
            "uz" => Ok(Language::Uz),
            other => Err(UnsupportedLanguage(other.to_string())),
        }
    }
}

/// Translation tables keyed by dotted path, e.g. `cart.total`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: HashMap<Language, HashMap<String, String>>,
}

impl Catalog {
    /// Catalog with the tables shipped in `locales/`.
    pub fn builtin() -> anyhow::Result<Self> {
        let mut catalog = Self::default();
        catalog.load_json(Language::Ru, include_str!("../locales/ru.json"))?;
        catalog.load_json(Language::Uz, include_str!("../locales/uz.json"))?;
        Ok(catalog)
    }

    pub fn load_json(&mut self, language: Language, json: &str) -> anyhow::Result<()> {
        let value: Value = serde_json::from_str(json)?;
        let table = self.tables.entry(language).or_default();
        flatten("", &value, table);
        Ok(())
    }

    /// Falls back to the key itself when no translation exists.
    pub fn t(&self, language: Language, key: &str) -> String {
        self.tables
            .get(&language)
            .and_then(|table| table.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (name, child) in map {
                let path = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}.{name}")
                };
                flatten(&path, child, out);
            }
        }
        Value::String(text) => {
            out.insert(prefix.to_string(), text.clone());
        }
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}
