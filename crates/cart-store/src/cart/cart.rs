//! Cart contents and the three quantity transitions.

use std::collections::HashSet;

use crate::cart::item::{validate_price, CartItem, NewCartItem};
use crate::error::CartError;
use crate::ids::ProductId;

/// Outcome of [`Cart::decrement`].
#[derive(Debug, Clone, PartialEq)]
pub enum Decrement {
    /// No item carries the requested id; the cart is unchanged.
    NotFound,
    /// The item's quantity dropped but is still at least 1.
    Decremented,
    /// The item's quantity reached zero and it was removed.
    Removed {
        /// Position the item occupied before removal.
        index: usize,
        /// The removed item, carrying `quantity == 0`.
        item: CartItem,
    },
}

/// An ordered, id-unique list of line items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from persisted items, checking every invariant.
    pub fn restore(items: Vec<CartItem>) -> Result<Self, CartError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(CartError::CorruptSnapshot(format!(
                    "duplicate item id {}",
                    item.id
                )));
            }
            if item.quantity == 0 {
                return Err(CartError::CorruptSnapshot(format!(
                    "item {} has zero quantity",
                    item.id
                )));
            }
            validate_price(item.price)
                .map_err(|e| CartError::CorruptSnapshot(format!("item {}: {}", item.id, e)))?;
        }
        Ok(Self { items })
    }

    /// Add a product.
    ///
    /// A new id is appended with quantity 1. An id already in the cart has
    /// its quantity bumped in place; the candidate's other fields are
    /// ignored. Returns `true` if a new line was appended.
    pub fn add(&mut self, candidate: NewCartItem) -> bool {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == candidate.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return false;
        }

        self.items.push(candidate.into_item());
        true
    }

    /// Bump the quantity of the item matching `id`.
    ///
    /// Returns `false`, leaving the cart untouched, if nothing matches.
    pub fn increment(&mut self, id: &ProductId) -> bool {
        let mut matched = false;
        for item in self.items.iter_mut().filter(|i| &i.id == id) {
            item.quantity = item.quantity.saturating_add(1);
            matched = true;
        }
        matched
    }

    /// Lower the quantity of the item matching `id`, dropping it at zero.
    pub fn decrement(&mut self, id: &ProductId) -> Decrement {
        let Some(index) = self.items.iter().position(|i| &i.id == id) else {
            return Decrement::NotFound;
        };

        let remaining = match self.items.get_mut(index) {
            Some(item) => {
                item.quantity = item.quantity.saturating_sub(1);
                item.quantity
            }
            None => return Decrement::NotFound,
        };

        if remaining > 0 {
            return Decrement::Decremented;
        }

        let item = self.items.remove(index);
        self.items.retain(|i| i.quantity > 0);
        Decrement::Removed { index, item }
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Get an item by product id.
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Consume the cart, returning its items.
    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }
}
