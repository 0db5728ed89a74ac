use std::sync::Arc;

use crate::{
    cache::QueryCache,
    config::AppConfig,
    i18n::{Catalog, Language},
    notify::NotificationCenter,
    services::{
        cart_page::CartPage,
        cart_service::{CartService, HttpCartService},
        mutation::CartSyncMutation,
    },
    store::CartStore,
};

#[derive(Clone)]
pub struct AppState {
    pub page: Arc<CartPage>,
    pub store: Arc<CartStore>,
    pub cache: Arc<QueryCache>,
    pub notifications: Arc<NotificationCenter>,
    pub default_language: Language,
}

impl AppState {
    /// Wires the page to an arbitrary cart service implementation.
    pub fn new(
        service: Arc<dyn CartService>,
        store: Arc<CartStore>,
        catalog: Catalog,
        checkout_route: impl Into<String>,
        default_language: Language,
        notification_capacity: usize,
    ) -> Self {
        let cache = Arc::new(QueryCache::new());
        let notifications = Arc::new(NotificationCenter::new(notification_capacity));
        let catalog = Arc::new(catalog);
        let mutation = CartSyncMutation::new(
            service,
            cache.clone(),
            notifications.clone(),
            catalog.clone(),
        );
        let page = Arc::new(CartPage::new(store.clone(), mutation, catalog, checkout_route));
        Self {
            page,
            store,
            cache,
            notifications,
            default_language,
        }
    }

    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let service = HttpCartService::from_config(config)?;
        tracing::info!(endpoint = %service.endpoint(), "cart service configured");
        Ok(Self::new(
            Arc::new(service),
            Arc::new(CartStore::new()),
            Catalog::builtin()?,
            config.checkout_route.clone(),
            config.default_language,
            config.notification_capacity,
        ))
    }
}
