//! Shopping cart state.
//!
//! A cart is an insertion-ordered list of lines keyed by menu item id. Every
//! mutation is total over its inputs and returns the notice the host shows
//! to the user (or `None` when nothing changed).

use serde::{Deserialize, Serialize};

use crate::menu::MenuItem;
use crate::types::{MenuItemId, Price};

/// Flat delivery fee charged on any non-empty cart ($3.99).
pub const DELIVERY_FEE_CENTS: i64 = 399;

/// Notice shown once an order has been placed.
pub const ORDER_PLACED_NOTICE: &str = "Order placed successfully! Your food will arrive soon.";

/// A menu item snapshot and how many of it are in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartLine {
    /// Price of this line (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.item.price * self.quantity
    }
}

/// User-visible result of a cart mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartNotice {
    Added { item_id: MenuItemId, name: String },
    AddedAnother { item_id: MenuItemId, name: String },
    Removed { item_id: MenuItemId, name: String },
    OrderPlaced,
}

impl CartNotice {
    /// Toast text for this notice.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Added { name, .. } => format!("{name} added to cart"),
            Self::AddedAnother { name, .. } => format!("Added another {name} to cart"),
            Self::Removed { name, .. } => format!("{name} removed from cart"),
            Self::OrderPlaced => ORDER_PLACED_NOTICE.to_owned(),
        }
    }
}

/// Snapshot of a cart at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub lines: Vec<CartLine>,
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub total: Price,
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns true if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Quantity of an item, zero when absent.
    #[must_use]
    pub fn quantity_of(&self, id: MenuItemId) -> u32 {
        self.line(id).map_or(0, |line| line.quantity)
    }

    /// Total number of units across all lines, saturating at `u32::MAX`.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |count: u32, line| count.saturating_add(line.quantity))
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Delivery fee: flat when the cart has lines, otherwise zero.
    #[must_use]
    pub fn delivery_fee(&self) -> Price {
        if self.is_empty() {
            Price::ZERO
        } else {
            Price::from_cents(DELIVERY_FEE_CENTS)
        }
    }

    /// Subtotal plus delivery fee.
    #[must_use]
    pub fn total(&self) -> Price {
        self.subtotal() + self.delivery_fee()
    }

    /// Add one unit of `item`.
    pub fn add(&mut self, item: &MenuItem) -> CartNotice {
        self.add_quantity(item, 1)
    }

    /// Add `quantity` units of `item`. A zero quantity is treated as one.
    pub fn add_quantity(&mut self, item: &MenuItem, quantity: u32) -> CartNotice {
        let quantity = quantity.max(1);
        if let Some(line) = self.line_mut(item.id) {
            line.quantity = line.quantity.saturating_add(quantity);
            CartNotice::AddedAnother {
                item_id: item.id,
                name: item.name.clone(),
            }
        } else {
            self.lines.push(CartLine {
                item: item.clone(),
                quantity,
            });
            CartNotice::Added {
                item_id: item.id,
                name: item.name.clone(),
            }
        }
    }

    /// Overwrite the quantity of an existing line. Zero removes the line.
    ///
    /// Unknown ids are ignored.
    pub fn set_quantity(&mut self, id: MenuItemId, quantity: u32) -> Option<CartNotice> {
        if quantity == 0 {
            return self.remove(id);
        }
        if let Some(line) = self.line_mut(id) {
            line.quantity = quantity;
        }
        None
    }

    /// Remove a line regardless of its quantity.
    pub fn remove(&mut self, id: MenuItemId) -> Option<CartNotice> {
        let index = self.lines.iter().position(|line| line.item.id == id)?;
        let line = self.lines.remove(index);
        Some(CartNotice::Removed {
            item_id: id,
            name: line.item.name,
        })
    }

    /// Place the order: take a receipt and empty the cart.
    ///
    /// Returns `None` and leaves the cart untouched when it is empty.
    pub fn checkout(&mut self) -> Option<OrderReceipt> {
        if self.is_empty() {
            return None;
        }
        let receipt = OrderReceipt {
            subtotal: self.subtotal(),
            delivery_fee: self.delivery_fee(),
            total: self.total(),
            lines: std::mem::take(&mut self.lines),
        };
        Some(receipt)
    }

    fn line(&self, id: MenuItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item.id == id)
    }

    fn line_mut(&mut self, id: MenuItemId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.item.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::menu;

    fn item(id: i32) -> &'static MenuItem {
        menu::find(MenuItemId::new(id)).unwrap()
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let cart = Cart::new();
        assert_eq!(cart.subtotal(), Price::ZERO);
        assert_eq!(cart.delivery_fee(), Price::ZERO);
        assert_eq!(cart.total(), Price::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_creates_then_increments() {
        let mut cart = Cart::new();
        let first = cart.add(item(14));
        assert_eq!(first.message(), "Chicken Biryani added to cart");

        let second = cart.add(item(14));
        assert_eq!(second.message(), "Added another Chicken Biryani to cart");
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.quantity_of(MenuItemId::new(14)), 2);
    }

    #[test]
    fn test_totals_include_flat_fee() {
        let mut cart = Cart::new();
        cart.add(item(14)); // 13.99
        cart.add(item(14));
        cart.add(item(49)); // 2.99
        assert_eq!(cart.subtotal(), Price::from_cents(3097));
        assert_eq!(cart.delivery_fee(), Price::from_cents(399));
        assert_eq!(cart.total(), Price::from_cents(3496));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_set_quantity_overwrites_and_zero_removes() {
        let mut cart = Cart::new();
        cart.add(item(3));
        assert!(cart.set_quantity(MenuItemId::new(3), 5).is_none());
        assert_eq!(cart.quantity_of(MenuItemId::new(3)), 5);

        let notice = cart.set_quantity(MenuItemId::new(3), 0).unwrap();
        assert_eq!(notice.message(), "Samosa removed from cart");
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let mut cart = Cart::new();
        cart.add(item(1));
        assert!(cart.set_quantity(MenuItemId::new(77), 3).is_none());
        assert!(cart.remove(MenuItemId::new(77)).is_none());
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add(item(22));
        cart.add(item(9));
        cart.add(item(22));
        let names: Vec<_> = cart.lines().iter().map(|l| l.item.name.as_str()).collect();
        assert_eq!(names, ["Butter Chicken", "Plain Naan"]);
    }

    #[test]
    fn test_total_matches_lines_after_mixed_operations() {
        let mut cart = Cart::new();
        let ops: [(i32, Option<u32>); 8] = [
            (1, None),
            (2, None),
            (1, None),
            (2, Some(4)),
            (5, None),
            (1, Some(0)),
            (5, Some(2)),
            (9, None),
        ];
        for (id, qty) in ops {
            match qty {
                None => {
                    cart.add(item(id));
                }
                Some(n) => {
                    cart.set_quantity(MenuItemId::new(id), n);
                }
            }
        }
        cart.remove(MenuItemId::new(9));

        let expected: Price = cart
            .lines()
            .iter()
            .map(|line| line.item.price * line.quantity)
            .sum();
        assert_eq!(cart.subtotal(), expected);
        assert_eq!(cart.total(), expected + Price::from_cents(DELIVERY_FEE_CENTS));
        assert!(cart.lines().iter().all(|line| line.quantity >= 1));
    }

    #[test]
    fn test_item_count_saturates() {
        let mut cart = Cart::new();
        cart.add(item(1));
        cart.add(item(2));
        cart.set_quantity(MenuItemId::new(1), u32::MAX);
        assert_eq!(cart.item_count(), u32::MAX);
        assert!(cart.total() > Price::from_cents(399));
    }

    #[test]
    fn test_checkout_empties_cart() {
        let mut cart = Cart::new();
        assert!(cart.checkout().is_none());

        cart.add_quantity(item(14), 2);
        let receipt = cart.checkout().unwrap();
        assert_eq!(receipt.subtotal, Price::from_cents(2798));
        assert_eq!(receipt.total, Price::from_cents(3197));
        assert_eq!(receipt.lines.len(), 1);
        assert!(cart.is_empty());
    }
}
