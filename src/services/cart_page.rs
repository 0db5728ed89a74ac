use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::{
    dto::{
        cart::AdjustQuantityRequest,
        page::{
            CartBody, CartPageView, CartRowView, ColumnHeaders, DesktopRow, MobileRow, RenderContext,
            RenderPhase, RowView, Viewport,
        },
    },
    i18n::{Catalog, Language, keys},
    models::{CartItem, PersistedQuantities, QuantityKey},
    navigation::Navigator,
    pricing::{AmountOverflow, TOTAL_PLACEHOLDER, discounted_unit_price, format_price, to_fixed},
    services::mutation::{CartSyncMutation, MutationOutcome},
    store::CartStore,
};

/// One quantity correction owed to the cart service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjustment {
    pub key: QuantityKey,
    pub request: AdjustQuantityRequest,
}

/// Corrections needed to bring the persisted cart in line with the local one.
///
/// Lines without a persisted quantity count as zero; lines already in sync are skipped.
/// A size id of zero means "no size" to the cart service and is left out of the request.
pub fn reconciliation_plan(cart: &[CartItem], persisted: &PersistedQuantities) -> Vec<Adjustment> {
    cart.iter()
        .filter_map(|item| {
            let key = item.quantity_key();
            let persisted_qty = persisted.get(&key).copied().unwrap_or(0);
            let delta = i64::from(item.quantity) - i64::from(persisted_qty);
            (delta != 0).then(|| Adjustment {
                key,
                request: AdjustQuantityRequest {
                    slug: item.slug.clone(),
                    quantity: delta,
                    size_id: item.size_id.filter(|&size_id| size_id != 0),
                    collection_slug: item.collection_slug.clone(),
                },
            })
        })
        .collect()
}

pub struct ScheduledAdjustment {
    pub adjustment: Adjustment,
    pub handle: JoinHandle<MutationOutcome>,
}

pub struct CheckoutOutcome {
    pub checkout_id: Uuid,
    pub route: String,
    pub scheduled: Vec<ScheduledAdjustment>,
}

impl CheckoutOutcome {
    /// Waits for every scheduled adjustment. Checkout itself never does this.
    pub async fn settle(self) -> Vec<(QuantityKey, MutationOutcome)> {
        let mut results = Vec::with_capacity(self.scheduled.len());
        for scheduled in self.scheduled {
            let outcome = match scheduled.handle.await {
                Ok(outcome) => outcome,
                Err(err) => MutationOutcome::Failed(err.to_string()),
            };
            results.push((scheduled.adjustment.key, outcome));
        }
        results
    }
}

pub struct CartPage {
    store: Arc<CartStore>,
    mutation: CartSyncMutation,
    catalog: Arc<Catalog>,
    checkout_route: String,
}

impl CartPage {
    pub fn new(
        store: Arc<CartStore>,
        mutation: CartSyncMutation,
        catalog: Arc<Catalog>,
        checkout_route: impl Into<String>,
    ) -> Self {
        Self {
            store,
            mutation,
            catalog,
            checkout_route: checkout_route.into(),
        }
    }

    pub fn render(&self, ctx: RenderContext) -> Result<CartPageView, AmountOverflow> {
        let t = |key: &str| self.catalog.t(ctx.language, key);
        let cart = self.store.cart();

        let body = if cart.is_empty() {
            CartBody::Empty {
                message: t(keys::CART_EMPTY),
            }
        } else {
            let rows = cart
                .iter()
                .enumerate()
                .map(|(index, item)| self.row(item, index, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            CartBody::Items { rows }
        };

        let amount = match ctx.phase {
            RenderPhase::ServerRendered => TOTAL_PLACEHOLDER.to_string(),
            RenderPhase::ClientHydrated => to_fixed(self.store.total_sum()?),
        };
        let total = format_price(&amount);

        Ok(CartPageView {
            language: ctx.language,
            phase: ctx.phase,
            title: t(keys::SHOPPING_CART),
            headers: ColumnHeaders {
                product: t(keys::PRODUCT),
                number: t(keys::NUMBER),
                total: t(keys::TOTAL),
            },
            body,
            total_line: format!("{}: {} {}", t(keys::TOTAL), total, t(keys::SUM)),
            total,
            checkout_label: t(keys::MAKE_PAYMENT),
        })
    }

    fn row(&self, item: &CartItem, index: usize, ctx: RenderContext) -> Result<CartRowView, AmountOverflow> {
        let price = discounted_unit_price(item.price, item.discount_percent);
        let title = ctx.language.item_name(item).to_string();
        let image = item.images_list.first().cloned();
        let key = format!(
            "{}-{}-{}-{}",
            item.id,
            item.size_id.map(|s| s.to_string()).unwrap_or_default(),
            item.price,
            index
        );

        let row = match ctx.viewport {
            Viewport::Desktop => RowView::Desktop(DesktopRow {
                id: item.id,
                slug: item.slug.clone(),
                collection_slug: item.collection_slug.clone(),
                title,
                price,
                size_id: item.size_id,
                image,
                qty: item.quantity,
                discounted_total: self.store.discounted_total(
                    item.collection_slug.as_deref().unwrap_or_default(),
                    price,
                    item.quantity,
                )?,
            }),
            Viewport::Mobile => RowView::Mobile(MobileRow {
                id: item.id,
                slug: item.slug.clone(),
                title,
                price,
                size_id: item.size_id,
                image,
                qty: item.quantity,
                size_name: item.size_name_ru.clone(),
            }),
        };

        Ok(CartRowView { key, row })
    }

    /// Pushes every local/persisted quantity difference to the cart service and
    /// navigates to checkout without waiting for the requests to finish.
    pub fn checkout(&self, language: Language, navigator: &dyn Navigator) -> CheckoutOutcome {
        let checkout_id = Uuid::new_v4();
        let plan = reconciliation_plan(&self.store.cart(), &self.store.api_quantity());
        tracing::info!(%checkout_id, adjustments = plan.len(), "checkout reconciliation started");

        let scheduled = plan
            .into_iter()
            .map(|adjustment| {
                tracing::debug!(
                    %checkout_id,
                    key = %adjustment.key,
                    delta = adjustment.request.quantity,
                    "scheduling cart adjustment"
                );
                let handle = self.mutation.mutate(adjustment.request.clone(), language);
                ScheduledAdjustment { adjustment, handle }
            })
            .collect();

        navigator.push(&self.checkout_route);

        CheckoutOutcome {
            checkout_id,
            route: self.checkout_route.clone(),
            scheduled,
        }
    }
}

/// Forward-only flag flipped once the page is interactive on the client.
#[derive(Debug, Default)]
pub struct Hydration {
    hydrated: AtomicBool,
}

impl Hydration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_hydrated(&self) {
        self.hydrated.store(true, Ordering::Release);
    }

    pub fn phase(&self) -> RenderPhase {
        if self.hydrated.load(Ordering::Acquire) {
            RenderPhase::ClientHydrated
        } else {
            RenderPhase::ServerRendered
        }
    }
}

/// A single rendering of the cart page, from server render through hydration.
pub struct CartPageSession {
    page: Arc<CartPage>,
    hydration: Hydration,
    language: Language,
    viewport: Viewport,
}

impl CartPageSession {
    pub fn new(page: Arc<CartPage>, language: Language, viewport: Viewport) -> Self {
        Self {
            page,
            hydration: Hydration::new(),
            language,
            viewport,
        }
    }

    /// Called once the page becomes interactive.
    pub fn mount(&self) {
        self.hydration.mark_hydrated();
    }

    pub fn render(&self) -> Result<CartPageView, AmountOverflow> {
        self.page.render(RenderContext {
            language: self.language,
            viewport: self.viewport,
            phase: self.hydration.phase(),
        })
    }
}
