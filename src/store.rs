use std::collections::HashMap;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use rust_decimal::Decimal;

use crate::{
    models::{CartItem, PersistedQuantities, QuantityKey},
    pricing::{AmountOverflow, discounted_unit_price, line_total},
};

#[derive(Debug, Default)]
struct CartState {
    items: Vec<CartItem>,
    api_quantity: PersistedQuantities,
    collection_discounts: HashMap<String, Decimal>,
}

impl CartState {
    fn collection_percent(&self, collection_slug: &str) -> Option<Decimal> {
        if collection_slug.is_empty() {
            None
        } else {
            self.collection_discounts.get(collection_slug).copied()
        }
    }

    fn line_total(&self, collection_slug: &str, unit_price: Decimal, quantity: u32) -> Result<Decimal, AmountOverflow> {
        line_total(unit_price, quantity, self.collection_percent(collection_slug))
    }

    fn total(&self) -> Result<Decimal, AmountOverflow> {
        self.items.iter().try_fold(Decimal::ZERO, |sum, item| {
            let line = self.line_total(
                item.collection_slug.as_deref().unwrap_or_default(),
                discounted_unit_price(item.price, item.discount_percent),
                item.quantity,
            )?;
            sum.checked_add(line).ok_or(AmountOverflow)
        })
    }

    /// Applies `change` to the items, undoing it when the cart total would overflow.
    fn update_items<T>(&mut self, change: impl FnOnce(&mut Vec<CartItem>) -> T) -> Result<T, AmountOverflow> {
        let previous = self.items.clone();
        let result = change(&mut self.items);
        if let Err(err) = self.total() {
            self.items = previous;
            return Err(err);
        }
        Ok(result)
    }
}

/// Local cart contents plus the quantities last confirmed by the cart service.
///
/// Owned by the application and handed to whoever needs it; there is no global instance.
/// Actions refuse changes that would push the cart total out of `Decimal` range.
#[derive(Debug, Default)]
pub struct CartStore {
    state: RwLock<CartState>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store without validating totals.
    pub fn with_items(items: Vec<CartItem>) -> Self {
        let store = Self::new();
        store.write().items = items;
        store
    }

    fn read(&self) -> RwLockReadGuard<'_, CartState> {
        self.state.read()
    }

    fn write(&self) -> RwLockWriteGuard<'_, CartState> {
        self.state.write()
    }

    pub fn cart(&self) -> Vec<CartItem> {
        self.read().items.clone()
    }

    pub fn api_quantity(&self) -> PersistedQuantities {
        self.read().api_quantity.clone()
    }

    pub fn persisted_quantity(&self, key: &QuantityKey) -> Option<u32> {
        self.read().api_quantity.get(key).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.read().items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.read().items.len()
    }

    /// Line total for `quantity` units at `unit_price`, less the collection discount.
    pub fn discounted_total(
        &self,
        collection_slug: &str,
        unit_price: Decimal,
        quantity: u32,
    ) -> Result<Decimal, AmountOverflow> {
        self.read().line_total(collection_slug, unit_price, quantity)
    }

    pub fn total_sum(&self) -> Result<Decimal, AmountOverflow> {
        self.read().total()
    }

    /// Adds an item, merging quantities into an existing line with the same id and size.
    pub fn add_item(&self, item: CartItem) -> Result<(), AmountOverflow> {
        let key = item.quantity_key();
        self.write().update_items(|items| {
            match items.iter_mut().find(|existing| existing.quantity_key() == key) {
                Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
                None => items.push(item),
            }
        })
    }

    /// Returns false when no line matches. A zero quantity removes the line.
    pub fn set_quantity(&self, key: QuantityKey, quantity: u32) -> Result<bool, AmountOverflow> {
        if quantity == 0 {
            return Ok(self.remove_item(key));
        }
        self.write().update_items(|items| {
            match items.iter_mut().find(|item| item.quantity_key() == key) {
                Some(item) => {
                    item.quantity = quantity;
                    true
                }
                None => false,
            }
        })
    }

    pub fn remove_item(&self, key: QuantityKey) -> bool {
        let mut state = self.write();
        let before = state.items.len();
        state.items.retain(|item| item.quantity_key() != key);
        state.items.len() != before
    }

    /// Empties the cart and returns how many lines were dropped.
    pub fn clear(&self) -> usize {
        let mut state = self.write();
        let dropped = state.items.len();
        state.items.clear();
        dropped
    }

    pub fn set_api_quantity(&self, key: QuantityKey, quantity: u32) {
        self.write().api_quantity.insert(key, quantity);
    }

    pub fn replace_api_quantities(&self, quantities: PersistedQuantities) {
        self.write().api_quantity = quantities;
    }

    pub fn set_collection_discount(&self, collection_slug: impl Into<String>, percent: Decimal) {
        self.write()
            .collection_discounts
            .insert(collection_slug.into(), percent);
    }
}
