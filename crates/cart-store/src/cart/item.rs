//! Cart line item types.

use serde::{Deserialize, Serialize};

use crate::error::CartError;
use crate::ids::ProductId;

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Product identifier; unique within a cart.
    pub id: ProductId,
    /// Product title (denormalized for display).
    pub title: String,
    /// Product image URL.
    #[serde(alias = "imageUrl")]
    pub image_url: String,
    /// Unit price.
    pub price: f64,
    /// Quantity. At least 1 while the item is in the cart.
    pub quantity: u32,
}

/// A product about to be added to the cart: a [`CartItem`] without quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCartItem {
    /// Product identifier.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Product image URL.
    #[serde(alias = "imageUrl")]
    pub image_url: String,
    /// Unit price.
    pub price: f64,
}

impl NewCartItem {
    /// Create a new candidate item.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }

    /// Reject prices that are negative, NaN or infinite.
    pub fn validate(&self) -> Result<(), CartError> {
        validate_price(self.price)
    }

    /// Turn the candidate into a line item with quantity 1.
    pub fn into_item(self) -> CartItem {
        CartItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity: 1,
        }
    }
}

pub(crate) fn validate_price(price: f64) -> Result<(), CartError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(CartError::InvalidPrice(price))
    }
}
