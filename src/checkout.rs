//! Checkout
//!
//! Orders are simulated: nothing is charged or sent anywhere. A checkout
//! prices the cart, hands back a confirmation and empties the cart.

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    cart::{Cart, CartLine},
    prices::money,
};

/// Errors raised when placing an order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,
}

/// Sales tax applied to the subtotal (8%).
pub fn tax_rate() -> Decimal {
    Decimal::new(8, 2)
}

/// Subtotals strictly above this ship free.
pub fn free_shipping_threshold() -> Decimal {
    Decimal::new(50, 0)
}

/// Flat shipping fee below the free shipping threshold.
pub fn shipping_fee() -> Decimal {
    Decimal::new(999, 2)
}

/// Priced breakdown of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSummary {
    /// Number of units ordered
    pub items: u64,

    /// Sum of line totals
    pub subtotal: Decimal,

    /// Tax on the subtotal, rounded to cents
    pub tax: Decimal,

    /// Shipping charge; zero when free shipping applies
    pub shipping: Decimal,

    /// Subtotal + tax + shipping
    pub total: Decimal,
}

impl OrderSummary {
    /// Prices the given cart.
    pub fn for_cart(cart: &Cart) -> Self {
        let subtotal = cart.total_price();

        let tax = subtotal
            .saturating_mul(tax_rate())
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        let shipping = if subtotal > free_shipping_threshold() {
            Decimal::ZERO
        } else {
            shipping_fee()
        };

        Self {
            items: cart.total_items(),
            subtotal,
            tax,
            shipping,
            total: subtotal.saturating_add(tax).saturating_add(shipping),
        }
    }

    /// Check if free shipping applies.
    pub fn free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }

    /// Subtotal as money.
    pub fn subtotal_money(&self) -> Money<'static, Currency> {
        money(self.subtotal)
    }

    /// Tax as money.
    pub fn tax_money(&self) -> Money<'static, Currency> {
        money(self.tax)
    }

    /// Shipping as money.
    pub fn shipping_money(&self) -> Money<'static, Currency> {
        money(self.shipping)
    }

    /// Grand total as money.
    pub fn total_money(&self) -> Money<'static, Currency> {
        money(self.total)
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    /// Priced breakdown at the time of checkout
    pub summary: OrderSummary,

    /// Lines that were ordered
    pub lines: Vec<CartLine>,
}

/// Places an order for everything in `cart` and empties it.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] when the cart holds nothing; the cart
/// is left untouched.
pub fn place_order(cart: &mut Cart) -> Result<OrderConfirmation, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let confirmation = OrderConfirmation {
        summary: OrderSummary::for_cart(cart),
        lines: cart.lines().to_vec(),
    };

    cart.clear();

    Ok(confirmation)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::items::{Item, ItemId};

    use super::*;

    fn cart_with(prices: &[(u64, &str, i64)]) -> TestResult<Cart> {
        let mut cart = Cart::new();

        for (id, price, quantity) in prices {
            cart.add(Item::new(*id, format!("Item {id}"), price.parse()?));
            cart.set_quantity(ItemId::new(*id), *quantity);
        }

        Ok(cart)
    }

    #[test]
    fn small_order_pays_tax_and_shipping() -> TestResult {
        let cart = cart_with(&[(1, "10.00", 2)])?;

        let summary = OrderSummary::for_cart(&cart);

        assert_eq!(summary.items, 2);
        assert_eq!(summary.subtotal, Decimal::new(2000, 2));
        assert_eq!(summary.tax, Decimal::new(160, 2));
        assert_eq!(summary.shipping, Decimal::new(999, 2));
        assert_eq!(summary.total, Decimal::new(3159, 2));
        assert!(!summary.free_shipping());
        assert_eq!(summary.total_money().to_string(), "$31.59");

        Ok(())
    }

    #[test]
    fn shipping_is_free_above_threshold() -> TestResult {
        let cart = cart_with(&[(1, "25.50", 2)])?;

        let summary = OrderSummary::for_cart(&cart);

        assert!(summary.free_shipping());
        assert_eq!(summary.total, Decimal::new(5508, 2));

        Ok(())
    }

    #[test]
    fn exactly_fifty_still_pays_shipping() -> TestResult {
        let cart = cart_with(&[(1, "50.00", 1)])?;

        let summary = OrderSummary::for_cart(&cart);

        assert_eq!(summary.shipping, shipping_fee());

        Ok(())
    }

    #[test]
    fn tax_rounds_half_away_from_zero() -> TestResult {
        // 8% of 1.3125 is 0.105
        let cart = cart_with(&[(1, "1.3125", 1)])?;

        let summary = OrderSummary::for_cart(&cart);

        assert_eq!(summary.tax, Decimal::new(11, 2));

        Ok(())
    }

    #[test]
    fn placing_order_clears_cart() -> TestResult {
        let mut cart = cart_with(&[(1, "3.00", 2), (2, "4.00", 1)])?;

        let confirmation = place_order(&mut cart)?;

        assert_eq!(confirmation.lines.len(), 2);
        assert_eq!(confirmation.summary.subtotal, Decimal::new(1000, 2));
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn empty_cart_cannot_be_ordered() {
        let mut cart = Cart::new();

        assert_eq!(place_order(&mut cart), Err(CheckoutError::EmptyCart));
    }
}
