//! Cart

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    items::{Item, ItemId},
    prices::money,
};

/// One item and how many of it the cart holds. The quantity is never zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    item: Item,
    quantity: u32,
}

impl CartLine {
    fn new(item: Item) -> Self {
        Self { item, quantity: 1 }
    }

    /// Returns the item on this line.
    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Returns the quantity, always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns unit price × quantity.
    pub fn line_total(&self) -> Decimal {
        self.item
            .price
            .amount()
            .saturating_mul(Decimal::from(self.quantity))
    }
}

/// The user's selected items with derived totals.
///
/// Lines are unique by item id and kept in insertion order. The totals are
/// recomputed after every mutation and cannot be set directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CartSnapshot", into = "CartSnapshot")]
pub struct Cart {
    lines: Vec<CartLine>,
    total_items: u64,
    total_price: Decimal,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from previously stored lines.
    ///
    /// Lines for the same item are merged and zero quantities dropped, so the
    /// result always satisfies the cart invariants.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();

        for line in lines {
            if line.quantity == 0 {
                continue;
            }

            match cart.line_mut(line.item.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }

        cart.recalculate();

        cart
    }

    /// Adds one of `item`, appending a new line if the cart doesn't hold it yet.
    pub fn add(&mut self, item: Item) {
        let id = item.id;

        match self.line_mut(id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::new(item)),
        }

        self.recalculate();

        debug!(item = %id, quantity = self.quantity_of(id), "added item to cart");
    }

    /// Removes the line for `id`. Does nothing if the cart doesn't hold it.
    pub fn remove(&mut self, id: ItemId) {
        let before = self.lines.len();

        self.lines.retain(|line| line.item.id != id);

        if self.lines.len() != before {
            self.recalculate();

            debug!(item = %id, "removed item from cart");
        }
    }

    /// Sets the quantity for `id`.
    ///
    /// Quantities of zero or below remove the line. Items not in the cart are
    /// ignored.
    pub fn set_quantity(&mut self, id: ItemId, quantity: i64) {
        if quantity <= 0 {
            self.remove(id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let Some(line) = self.line_mut(id) else {
            return;
        };

        line.quantity = quantity;

        self.recalculate();

        debug!(item = %id, quantity, "updated cart quantity");
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.recalculate();

        debug!("cleared cart");
    }

    /// Check if the cart holds `id`.
    pub fn contains(&self, id: ItemId) -> bool {
        self.line(id).is_some()
    }

    /// Returns the quantity held for `id`, or zero.
    pub fn quantity_of(&self, id: ItemId) -> u32 {
        self.line(id).map_or(0, CartLine::quantity)
    }

    /// Sum of all line quantities.
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Sum of price × quantity over all lines.
    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// The total price as money, rounded to cents.
    pub fn total_money(&self) -> Money<'static, Currency> {
        money(self.total_price)
    }

    /// Returns the line for `id`.
    pub fn line(&self, id: ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item.id == id)
    }

    /// The lines, in the order they were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over the lines in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Get the number of distinct items in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, id: ItemId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.item.id == id)
    }

    fn recalculate(&mut self) {
        self.total_items = self
            .lines
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum();

        self.total_price = self
            .lines
            .iter()
            .fold(Decimal::ZERO, |acc, line| acc.saturating_add(line.line_total()));
    }
}

/// Stored shape of a cart. Totals are written for readers of the blob but
/// always recomputed from the lines on the way back in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartSnapshot {
    items: Vec<CartLine>,

    #[serde(default)]
    total_items: u64,

    #[serde(default)]
    total_price: String,
}

impl From<Cart> for CartSnapshot {
    fn from(cart: Cart) -> Self {
        Self {
            total_items: cart.total_items,
            total_price: cart.total_price.to_string(),
            items: cart.lines,
        }
    }
}

impl From<CartSnapshot> for Cart {
    fn from(snapshot: CartSnapshot) -> Self {
        let cart = Cart::from_lines(snapshot.items);

        if cart.total_items != snapshot.total_items
            || snapshot.total_price.parse::<Decimal>().ok() != Some(cart.total_price)
        {
            debug!(
                stored_items = snapshot.total_items,
                stored_price = %snapshot.total_price,
                "stored cart totals disagree with lines; using recomputed totals"
            );
        }

        cart
    }
}
