use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::{
    cache::{CART_ITEMS_KEY, QueryCache},
    dto::cart::AdjustQuantityRequest,
    i18n::{Catalog, Language, keys},
    notify::{Notification, Notifier},
    services::cart_service::CartService,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Succeeded,
    Failed(String),
}

impl MutationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, MutationOutcome::Succeeded)
    }
}

/// Sends quantity adjustments to the cart service, one background task per call.
///
/// Success invalidates the cached cart contents and raises a success notification.
/// Failure raises an error notification; nothing is retried or rolled back.
#[derive(Clone)]
pub struct CartSyncMutation {
    service: Arc<dyn CartService>,
    cache: Arc<QueryCache>,
    notifier: Arc<dyn Notifier>,
    catalog: Arc<Catalog>,
}

impl CartSyncMutation {
    pub fn new(
        service: Arc<dyn CartService>,
        cache: Arc<QueryCache>,
        notifier: Arc<dyn Notifier>,
        catalog: Arc<Catalog>,
    ) -> Self {
        Self {
            service,
            cache,
            notifier,
            catalog,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn mutate(&self, request: AdjustQuantityRequest, language: Language) -> JoinHandle<MutationOutcome> {
        let this = self.clone();
        tokio::spawn(async move { this.run(request, language).await })
    }

    async fn run(&self, request: AdjustQuantityRequest, language: Language) -> MutationOutcome {
        let slug = request.slug.clone();
        let delta = request.quantity;
        match self.service.adjust_quantity(request).await {
            Ok(()) => {
                self.cache.invalidate(CART_ITEMS_KEY);
                self.notifier.notify(Notification::success(
                    self.catalog.t(language, keys::CART_UPDATED_SUCCESS),
                ));
                tracing::info!(%slug, delta, "cart quantity synced");
                MutationOutcome::Succeeded
            }
            Err(err) => {
                self.notifier.notify(Notification::error(
                    self.catalog.t(language, keys::CART_UPDATED_ERROR),
                ));
                tracing::warn!(%slug, delta, error = %err, "cart quantity sync failed");
                MutationOutcome::Failed(err.to_string())
            }
        }
    }
}
