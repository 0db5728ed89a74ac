use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::i18n::Language;

/// Width in CSS pixels at which the desktop layout takes over (`md`).
pub const DESKTOP_BREAKPOINT_PX: u32 = 768;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RenderPhase {
    /// Totals depend on client-only state, so a fixed placeholder is shown.
    ServerRendered,
    ClientHydrated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Viewport {
    #[default]
    Desktop,
    Mobile,
}

impl Viewport {
    pub fn from_width(width_px: u32) -> Self {
        if width_px >= DESKTOP_BREAKPOINT_PX {
            Viewport::Desktop
        } else {
            Viewport::Mobile
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub language: Language,
    pub viewport: Viewport,
    pub phase: RenderPhase,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CartPageQuery {
    pub lang: Option<Language>,
    pub viewport_width: Option<u32>,
    /// Render as the client would after mounting.
    pub hydrated: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutQuery {
    pub lang: Option<Language>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ColumnHeaders {
    pub product: String,
    pub number: String,
    pub total: String,
}

/// Row layout for wide screens.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DesktopRow {
    pub id: i64,
    pub slug: String,
    pub collection_slug: Option<String>,
    pub title: String,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub size_id: Option<i64>,
    pub image: Option<String>,
    pub qty: u32,
    #[schema(value_type = String)]
    pub discounted_total: Decimal,
}

/// Row layout for narrow screens.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MobileRow {
    pub id: i64,
    pub slug: String,
    pub title: String,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub size_id: Option<i64>,
    pub image: Option<String>,
    pub qty: u32,
    pub size_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum RowView {
    Desktop(DesktopRow),
    Mobile(MobileRow),
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CartRowView {
    /// Stable list key; not a business identity.
    pub key: String,
    pub row: RowView,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartBody {
    Items { rows: Vec<CartRowView> },
    Empty { message: String },
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CartPageView {
    pub language: Language,
    pub phase: RenderPhase,
    pub title: String,
    pub headers: ColumnHeaders,
    pub body: CartBody,
    /// Formatted total amount, e.g. `1 234.00`.
    pub total: String,
    /// Full total caption, e.g. `Итого: 1 234.00 сум`.
    pub total_line: String,
    pub checkout_label: String,
}
