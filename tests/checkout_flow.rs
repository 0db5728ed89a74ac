mod common;

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use storefront_cart::{
    cache::CART_ITEMS_KEY,
    dto::page::{CartBody, RenderContext, RenderPhase, RowView, Viewport},
    i18n::Language,
    models::{PersistedQuantities, QuantityKey},
    notify::NotificationLevel,
    pricing::AmountOverflow,
    services::{cart_page::CartPageSession, mutation::MutationOutcome},
};
use tokio::sync::Semaphore;

use common::{FakeCartService, RecordingNavigator, app_state, item};

fn hydrated(language: Language, viewport: Viewport) -> RenderContext {
    RenderContext {
        language,
        viewport,
        phase: RenderPhase::ClientHydrated,
    }
}

// Discounted line, nothing persisted yet: the whole local quantity is sent.
#[tokio::test]
async fn unsynced_discounted_item_is_sent_in_full() -> anyhow::Result<()> {
    let mut shirt = item(1, None, dec!(100), 2);
    shirt.discount_percent = Some(dec!(10));
    let service = Arc::new(FakeCartService::new());
    let state = app_state(service.clone(), vec![shirt]);

    let view = state.page.render(hydrated(Language::Ru, Viewport::Desktop)).unwrap();
    let CartBody::Items { rows } = &view.body else {
        panic!("expected cart rows");
    };
    let RowView::Desktop(row) = &rows[0].row else {
        panic!("expected desktop row");
    };
    assert_eq!(row.price, dec!(90));
    assert_eq!(row.discounted_total, dec!(180));
    assert_eq!(row.image.as_deref(), Some("/images/1/front.jpg"));
    assert_eq!(rows[0].key, "1--100-0");
    assert_eq!(view.total, "180.00");

    let navigator = RecordingNavigator::new();
    let outcome = state.page.checkout(Language::Ru, &navigator);
    assert_eq!(navigator.history(), ["/checkouts"]);
    assert_eq!(outcome.scheduled.len(), 1);

    let results = outcome.settle().await;
    assert_eq!(results, [(QuantityKey::new(1, None), MutationOutcome::Succeeded)]);

    let requests = service.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].slug, "item-1");
    assert_eq!(requests[0].quantity, 2);
    assert_eq!(requests[0].size_id, None);

    assert!(state.cache.is_stale(CART_ITEMS_KEY));
    let notifications = state.notifications.drain();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].level, NotificationLevel::Success);
    assert_eq!(notifications[0].message, "Корзина обновлена");
    Ok(())
}

#[tokio::test]
async fn empty_cart_still_navigates() {
    let service = Arc::new(FakeCartService::new());
    let state = app_state(service.clone(), vec![]);

    let view = state.page.render(hydrated(Language::Uz, Viewport::Desktop)).unwrap();
    match &view.body {
        CartBody::Empty { message } => assert_eq!(message, "Savatingiz bo'sh"),
        other => panic!("expected empty body, got {other:?}"),
    }

    let navigator = RecordingNavigator::new();
    let outcome = state.page.checkout(Language::Uz, &navigator);
    assert!(outcome.scheduled.is_empty());
    assert_eq!(navigator.history(), ["/checkouts"]);
    assert!(outcome.settle().await.is_empty());
    assert!(service.requests().is_empty());
    assert!(!state.cache.is_stale(CART_ITEMS_KEY));
}

#[tokio::test]
async fn synced_line_is_not_sent() {
    let service = Arc::new(FakeCartService::new());
    let state = app_state(service.clone(), vec![item(5, Some(3), dec!(50), 1)]);
    state
        .store
        .replace_api_quantities(PersistedQuantities::from([(QuantityKey::new(5, Some(3)), 1)]));

    let navigator = RecordingNavigator::new();
    let outcome = state.page.checkout(Language::Ru, &navigator);
    assert!(outcome.scheduled.is_empty());
    assert_eq!(navigator.history().len(), 1);
    outcome.settle().await;
    assert!(service.requests().is_empty());
}

#[tokio::test]
async fn decreases_are_sent_as_negative_deltas() {
    let mut sized = item(7, Some(2), dec!(30), 1);
    sized.collection_slug = Some("summer".into());
    let service = Arc::new(FakeCartService::new());
    let state = app_state(service.clone(), vec![sized]);
    state.store.set_api_quantity(QuantityKey::new(7, Some(2)), 4);

    let navigator = RecordingNavigator::new();
    state.page.checkout(Language::Ru, &navigator).settle().await;

    let requests = service.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].quantity, -3);
    assert_eq!(requests[0].size_id, Some(2));
    assert_eq!(requests[0].collection_slug.as_deref(), Some("summer"));
}

// A failing line neither blocks the other lines nor the navigation, and the
// local cart is left as it was.
#[tokio::test]
async fn failures_are_independent_and_not_rolled_back() {
    let service = Arc::new(FakeCartService::failing(&["item-2"]));
    let state = app_state(
        service.clone(),
        vec![item(1, None, dec!(10), 1), item(2, None, dec!(20), 2), item(3, Some(9), dec!(5), 3)],
    );

    let navigator = RecordingNavigator::new();
    let outcome = state.page.checkout(Language::Ru, &navigator);
    assert_eq!(navigator.history(), ["/checkouts"]);

    let results = outcome.settle().await;
    assert_eq!(results.len(), 3);
    let failed: Vec<_> = results
        .iter()
        .filter(|(_, outcome)| !outcome.is_success())
        .map(|(key, _)| *key)
        .collect();
    assert_eq!(failed, [QuantityKey::new(2, None)]);
    assert_eq!(service.requests().len(), 3);

    let notifications = state.notifications.drain();
    let errors = notifications
        .iter()
        .filter(|n| n.level == NotificationLevel::Error)
        .count();
    assert_eq!(errors, 1);
    assert_eq!(notifications.len(), 3);
    assert!(
        notifications
            .iter()
            .any(|n| n.message == "Не удалось обновить корзину")
    );

    assert_eq!(state.store.cart().len(), 3);
    assert_eq!(state.store.cart()[1].quantity, 2);
    assert!(state.store.api_quantity().is_empty());
}

#[tokio::test]
async fn navigation_does_not_wait_for_the_cart_service() {
    let gate = Arc::new(Semaphore::new(0));
    let service = Arc::new(FakeCartService::gated(gate.clone()));
    let state = app_state(service.clone(), vec![item(1, None, dec!(10), 1), item(2, None, dec!(10), 1)]);

    let navigator = RecordingNavigator::new();
    let outcome = state.page.checkout(Language::Ru, &navigator);
    tokio::task::yield_now().await;

    assert_eq!(navigator.history(), ["/checkouts"]);
    assert!(service.requests().is_empty());

    gate.add_permits(2);
    let results = outcome.settle().await;
    assert!(results.iter().all(|(_, outcome)| outcome.is_success()));
    assert_eq!(service.requests().len(), 2);
}

#[tokio::test]
async fn total_is_placeholder_until_hydrated() {
    let service = Arc::new(FakeCartService::new());
    let state = app_state(service, vec![item(1, None, dec!(617), 2)]);
    let session = CartPageSession::new(state.page.clone(), Language::Ru, Viewport::Desktop);

    let server = session.render().unwrap();
    assert_eq!(server.phase, RenderPhase::ServerRendered);
    assert_eq!(server.total, "0.00");
    assert_eq!(server.total_line, "Итого: 0.00 сум");

    session.mount();
    let client = session.render().unwrap();
    assert_eq!(client.phase, RenderPhase::ClientHydrated);
    assert_eq!(client.total, "1 234.00");
    assert_eq!(client.total_line, "Итого: 1 234.00 сум");
    assert_eq!(client.checkout_label, "Оформить заказ");
}

#[tokio::test]
async fn mobile_rows_use_selected_language_and_size_name() {
    let mut sized = item(4, Some(1), dec!(80), 1);
    sized.size_name_ru = Some("XL".into());
    let service = Arc::new(FakeCartService::new());
    let state = app_state(service, vec![sized]);

    let view = state.page.render(hydrated(Language::Uz, Viewport::Mobile)).unwrap();
    assert_eq!(view.title, "Savat");
    assert_eq!(view.headers.number, "Soni");
    let CartBody::Items { rows } = &view.body else {
        panic!("expected cart rows");
    };
    match &rows[0].row {
        RowView::Mobile(row) => {
            assert_eq!(row.title, "Mahsulot 4");
            assert_eq!(row.size_name.as_deref(), Some("XL"));
            assert_eq!(row.qty, 1);
        }
        RowView::Desktop(_) => panic!("expected mobile row"),
    }
    assert_eq!(rows[0].key, "4-1-80-0");
}

#[tokio::test]
async fn collection_discount_flows_into_totals() {
    let mut bundled = item(1, None, dec!(200), 1);
    bundled.collection_slug = Some("capsule".into());
    bundled.discount_percent = Some(dec!(50));
    let service = Arc::new(FakeCartService::new());
    let state = app_state(service, vec![bundled]);
    state.store.set_collection_discount("capsule", dec!(10));

    let view = state.page.render(hydrated(Language::Ru, Viewport::Desktop)).unwrap();
    let CartBody::Items { rows } = &view.body else {
        panic!("expected cart rows");
    };
    let RowView::Desktop(row) = &rows[0].row else {
        panic!("expected desktop row");
    };
    assert_eq!(row.price, dec!(100));
    assert_eq!(row.discounted_total, dec!(90));
    assert_eq!(view.total, "90.00");
}

#[tokio::test]
async fn zero_size_is_not_sent_to_the_cart_service() {
    let service = Arc::new(FakeCartService::new());
    let state = app_state(service.clone(), vec![item(1, Some(0), dec!(10), 1)]);

    let navigator = RecordingNavigator::new();
    state.page.checkout(Language::Ru, &navigator).settle().await;

    let requests = service.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].size_id, None);
    assert_eq!(
        serde_json::to_value(&requests[0]).unwrap(),
        serde_json::json!({ "slug": "item-1", "quantity": 1 })
    );
}

#[tokio::test]
async fn oversized_total_is_an_error_not_a_panic() {
    let service = Arc::new(FakeCartService::new());
    let state = app_state(service, vec![item(1, None, Decimal::MAX, 2)]);

    let hydrated_view = state.page.render(hydrated(Language::Ru, Viewport::Desktop));
    assert_eq!(hydrated_view.err(), Some(AmountOverflow));

    let mobile_server_view = state.page.render(RenderContext {
        language: Language::Ru,
        viewport: Viewport::Mobile,
        phase: RenderPhase::ServerRendered,
    });
    assert_eq!(mobile_server_view.unwrap().total, "0.00");
}
