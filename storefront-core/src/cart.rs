//! Shopping cart
use crate::price::Price;
use crate::product::{Product, ProductId};
use serde::{Deserialize, Serialize};

pub const MIN_LINE_QUANTITY: u32 = 1;
pub const MAX_LINE_QUANTITY: u32 = 99;

/// A line item in the shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Shopping cart state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
    pub open: bool,
}

impl Cart {
    /// Create a new empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a cart line by product ID.
    #[must_use]
    pub fn find_line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == id)
    }

    fn find_line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product.id == id)
    }

    /// Add one unit of `product`. Returns the new quantity for that line.
    pub fn add(&mut self, product: &Product) -> u32 {
        if let Some(line) = self.find_line_mut(product.id) {
            line.quantity = (line.quantity + 1).min(MAX_LINE_QUANTITY);
            line.quantity
        } else {
            self.lines.push(CartLine {
                product: product.clone(),
                quantity: MIN_LINE_QUANTITY,
            });
            MIN_LINE_QUANTITY
        }
    }

    /// Remove a line entirely.
    pub fn remove(&mut self, id: ProductId) {
        self.lines.retain(|line| line.product.id != id);
    }

    /// Set a line's quantity, clamped to `1..=99`. Unknown ids are ignored.
    pub fn update_quantity(&mut self, id: ProductId, quantity: u32) {
        if let Some(line) = self.find_line_mut(id) {
            line.quantity = quantity.clamp(MIN_LINE_QUANTITY, MAX_LINE_QUANTITY);
        }
    }

    /// Clear the entire cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.find_line(id).map_or(0, |line| line.quantity)
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    #[must_use]
    pub fn total(&self) -> Price {
        self.lines
            .iter()
            .fold(Price::ZERO, |acc, line| acc.saturating_add(line.subtotal()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: ProductId, cents: i64) -> Product {
        Product {
            id,
            name: format!("Item {id}"),
            price: Price::from_cents(cents),
            description: String::new(),
            image: String::new(),
        }
    }

    #[test]
    fn adding_twice_increments_quantity() {
        let mut cart = Cart::new();
        let mouse = product(1, 4_999);
        assert_eq!(cart.add(&mouse), 1);
        assert_eq!(cart.add(&mouse), 2);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), Price::from_cents(9_998));
    }

    #[test]
    fn quantity_updates_are_clamped() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100));
        cart.update_quantity(1, 0);
        assert_eq!(cart.quantity_of(1), 1);
        cart.update_quantity(1, 500);
        assert_eq!(cart.quantity_of(1), 99);
        cart.update_quantity(42, 3);
        assert_eq!(cart.quantity_of(42), 0);
    }

    #[test]
    fn remove_and_clear() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100));
        cart.add(&product(2, 250));
        cart.add(&product(2, 250));
        assert_eq!(cart.item_count(), 3);
        cart.remove(1);
        assert_eq!(cart.total(), Price::from_cents(500));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }
}
