#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use storefront_cart::{
    dto::cart::AdjustQuantityRequest,
    i18n::{Catalog, Language},
    models::CartItem,
    navigation::Navigator,
    services::cart_service::{CartService, CartServiceError},
    state::AppState,
    store::CartStore,
};
use tokio::sync::Semaphore;

/// In-process cart service that records requests and fails for chosen slugs.
#[derive(Default)]
pub struct FakeCartService {
    requests: Mutex<Vec<AdjustQuantityRequest>>,
    failing_slugs: Vec<String>,
    gate: Option<Arc<Semaphore>>,
}

impl FakeCartService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(slugs: &[&str]) -> Self {
        Self {
            failing_slugs: slugs.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Every call waits for a permit on `gate` before answering.
    pub fn gated(gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<AdjustQuantityRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CartService for FakeCartService {
    async fn adjust_quantity(&self, request: AdjustQuantityRequest) -> Result<(), CartServiceError> {
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        let fail = self.failing_slugs.contains(&request.slug);
        self.requests.lock().unwrap().push(request);
        if fail {
            return Err(CartServiceError::Status {
                status: 500,
                body: "boom".into(),
            });
        }
        Ok(())
    }
}

/// Remembers every route pushed through it, oldest first.
#[derive(Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<String> {
        self.history.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, route: &str) {
        self.history.lock().unwrap().push(route.to_string());
    }
}

pub fn item(id: i64, size_id: Option<i64>, price: Decimal, quantity: u32) -> CartItem {
    CartItem {
        id,
        slug: format!("item-{id}"),
        collection_slug: None,
        name_ru: format!("Товар {id}"),
        name_uz: format!("Mahsulot {id}"),
        price,
        discount_percent: None,
        size_id,
        size_name_ru: None,
        quantity,
        images_list: vec![format!("/images/{id}/front.jpg"), format!("/images/{id}/back.jpg")],
    }
}

pub fn app_state(service: Arc<FakeCartService>, items: Vec<CartItem>) -> AppState {
    AppState::new(
        service,
        Arc::new(CartStore::with_items(items)),
        Catalog::builtin().expect("builtin catalog"),
        "/checkouts",
        Language::Ru,
        50,
    )
}
